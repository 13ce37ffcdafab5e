//! Chart composition: layout, ranges and the render pipeline.

mod annotation;
mod legend;
mod request;
mod timeframe;

pub use annotation::{Annotation, draw_annotation, measure_annotation};
pub use legend::{LegendEntry, draw_legend, measure_legend};
pub use request::ChartRequest;
pub use timeframe::{Timeframe, TimeframeClass};

use tracing::{debug, trace};

use crate::axis::{Axis, Tick, TickDirection};
use crate::core::palette::{DEFAULT_CANVAS_PADDING, DEFAULT_SERIES_LINE_WIDTH, default_palette};
use crate::core::primitives::{min_max, unix_seconds_to_datetime};
use crate::core::{
    ContinuousRange, MarketHoursRange, MarketSession, Padding, PixelBox, Range, RangeOrientation,
    Style, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{OutputFormat, Renderer};
use crate::series::{Placement, Series, YAxisType};

/// Encoded chart bytes plus their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl RenderedChart {
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Resolved geometry of one render: canvas box, ranges and ticks.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    /// Full image box.
    pub frame: PixelBox,
    /// Image box minus padding.
    pub content: PixelBox,
    /// Plot area after axes are reserved.
    pub canvas: PixelBox,
    pub x_range: Range,
    pub y_range: Range,
    pub y_range_secondary: Option<Range>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub y_ticks_secondary: Vec<Tick>,
}

impl ChartLayout {
    /// Range used to place a series vertically.
    #[must_use]
    pub fn y_range_for(&self, axis: YAxisType) -> &Range {
        match (axis, &self.y_range_secondary) {
            (YAxisType::Secondary, Some(range)) => range,
            _ => &self.y_range,
        }
    }

    #[must_use]
    pub fn placement(&self, axis: YAxisType) -> Placement<'_> {
        Placement {
            canvas: self.canvas,
            x_range: &self.x_range,
            y_range: self.y_range_for(axis),
        }
    }
}

/// A declarative chart, created per request and dropped after rendering.
#[derive(Debug, Clone)]
pub struct Chart {
    pub width: u32,
    pub height: u32,
    pub background: Style,
    pub canvas: Style,
    pub padding: Padding,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub y_axis_secondary: Axis,
    pub series: Vec<Series>,
    pub show_legend: bool,
    pub legend_style: Style,
    pub timeframe: TimeframeClass,
    pub session: MarketSession,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 400,
            background: Style::default(),
            canvas: Style::default(),
            padding: Padding::uniform(DEFAULT_CANVAS_PADDING),
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            y_axis_secondary: Axis::default(),
            series: Vec::new(),
            show_legend: false,
            legend_style: Style::default(),
            timeframe: TimeframeClass::Continuous,
            session: MarketSession::default(),
        }
    }
}

impl Chart {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_series(mut self, series: impl Into<Series>) -> Self {
        self.series.push(series.into());
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: Axis) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: Axis) -> Self {
        self.y_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis_secondary(mut self, axis: Axis) -> Self {
        self.y_axis_secondary = axis;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    #[must_use]
    pub fn with_timeframe(mut self, timeframe: TimeframeClass) -> Self {
        self.timeframe = timeframe;
        self
    }

    #[must_use]
    pub fn with_session(mut self, session: MarketSession) -> Self {
        self.session = session;
        self
    }

    /// Renders to `format` with a freshly created backend.
    pub fn render(&self, format: OutputFormat) -> ChartResult<RenderedChart> {
        let viewport = self.validate()?;
        let mut renderer =
            format.create_renderer(viewport.width as i32, viewport.height as i32)?;
        let bytes = self.render_with(renderer.as_mut())?;
        debug!(format = %format, bytes = bytes.len(), "chart rendered");
        Ok(RenderedChart { format, bytes })
    }

    /// Runs the full pipeline against any backend and returns its bytes.
    pub fn render_with(&self, renderer: &mut dyn Renderer) -> ChartResult<Vec<u8>> {
        let layout = self.layout(renderer)?;
        let palette = default_palette();

        self.draw_background(renderer, &layout)?;

        self.x_axis
            .render_x_grid(renderer, layout.canvas, &layout.x_range, &layout.x_ticks)?;
        self.y_axis
            .render_y_grid(renderer, layout.canvas, &layout.y_range, &layout.y_ticks)?;
        self.y_axis
            .render_zero_line(renderer, layout.canvas, &layout.y_range)?;

        for (index, series) in self.series.iter().enumerate() {
            series.render(
                renderer,
                layout.placement(series.y_axis()),
                palette.series_stroke(index),
            )?;
        }

        self.x_axis
            .render_x(renderer, layout.canvas, &layout.x_range, &layout.x_ticks)?;
        self.y_axis.render_y(
            renderer,
            layout.canvas,
            &layout.y_range,
            &layout.y_ticks,
            YAxisType::Primary,
        )?;
        if let Some(secondary) = &layout.y_range_secondary {
            self.y_axis_secondary.render_y(
                renderer,
                layout.canvas,
                secondary,
                &layout.y_ticks_secondary,
                YAxisType::Secondary,
            )?;
        }

        self.draw_annotations(renderer, &layout)?;

        if self.show_legend {
            draw_legend(
                renderer,
                layout.canvas,
                &self.legend_style,
                &self.legend_entries(),
            )?;
        }

        renderer.finish()
    }

    /// Validates the chart and resolves canvas, ranges and ticks.
    pub fn layout(&self, renderer: &mut dyn Renderer) -> ChartResult<ChartLayout> {
        let viewport = self.validate()?;
        let frame = PixelBox::from_ltrb(0, 0, viewport.width as i32, viewport.height as i32);
        let content = frame.shrink(self.padding);

        let mut x_range = self.x_range()?;
        let mut y_range = self.y_range(YAxisType::Primary)?;
        let mut y_range_secondary = self.y_range_secondary()?;

        // First pass sizes the axes against the content box.
        set_domains(&mut x_range, &mut y_range, y_range_secondary.as_mut(), content);
        let ticks = self.ticks(renderer, &x_range, &y_range, y_range_secondary.as_ref());
        let canvas = self.reserve_axes(renderer, content, &x_range, &y_range, &ticks)?;

        // Second pass generates ticks for the final canvas.
        set_domains(&mut x_range, &mut y_range, y_range_secondary.as_mut(), canvas);
        let (x_ticks, y_ticks, y_ticks_secondary) =
            self.ticks(renderer, &x_range, &y_range, y_range_secondary.as_ref());

        debug!(
            canvas_left = canvas.left,
            canvas_top = canvas.top,
            canvas_width = canvas.width(),
            canvas_height = canvas.height(),
            x_range = %x_range,
            y_range = %y_range,
            "chart layout resolved"
        );

        Ok(ChartLayout {
            frame,
            content,
            canvas,
            x_range,
            y_range,
            y_range_secondary,
            x_ticks,
            y_ticks,
            y_ticks_secondary,
        })
    }

    fn validate(&self) -> ChartResult<Viewport> {
        let viewport = Viewport::new(self.width, self.height).validate()?;
        if self.series.is_empty() {
            return Err(ChartError::EmptySeries("chart has no series".to_owned()));
        }
        if !self
            .series
            .iter()
            .any(|series| !series.is_annotation() && series.is_visible() && !series.is_empty())
        {
            return Err(ChartError::EmptySeries(
                "chart has no visible series with data".to_owned(),
            ));
        }
        Ok(viewport)
    }

    // Series that define axis extents: visible, non-annotation, non-empty.
    fn ranged_series(&self) -> impl Iterator<Item = &Series> {
        self.series
            .iter()
            .filter(|series| !series.is_annotation() && series.is_visible() && !series.is_empty())
    }

    fn x_range(&self) -> ChartResult<Range> {
        if let Some(range) = &self.x_axis.range {
            return Ok(range.clone());
        }
        let (min, max) = min_max(
            self.ranged_series()
                .filter_map(Series::x_extent)
                .flat_map(|(min, max)| [min, max]),
        )
        .ok_or_else(|| ChartError::EmptySeries("no x values to range over".to_owned()))?;

        match self.timeframe {
            TimeframeClass::Continuous => Ok(ContinuousRange::from_bounds(min, max)?
                .with_orientation(RangeOrientation::LowToHigh)
                .into()),
            TimeframeClass::MarketHours => Ok(MarketHoursRange::new(
                unix_seconds_to_datetime(min),
                unix_seconds_to_datetime(max),
                self.session.clone(),
            )?
            .into()),
        }
    }

    fn y_extent(&self, axis: YAxisType) -> Option<(f64, f64)> {
        min_max(
            self.ranged_series()
                .filter(|series| series.y_axis() == axis)
                .filter_map(Series::y_extent)
                .flat_map(|(min, max)| [min, max]),
        )
    }

    fn y_range(&self, axis: YAxisType) -> ChartResult<Range> {
        let explicit = match axis {
            YAxisType::Primary => &self.y_axis.range,
            YAxisType::Secondary => &self.y_axis_secondary.range,
        };
        if let Some(range) = explicit {
            return Ok(range.clone());
        }
        // A chart plotted only against the secondary axis still needs a primary range.
        let (min, max) = self
            .y_extent(axis)
            .or_else(|| self.y_extent(YAxisType::Secondary))
            .ok_or_else(|| ChartError::EmptySeries("no y values to range over".to_owned()))?;
        Ok(ContinuousRange::from_bounds(min, max)?.into())
    }

    fn y_range_secondary(&self) -> ChartResult<Option<Range>> {
        let has_secondary = self
            .ranged_series()
            .any(|series| series.y_axis() == YAxisType::Secondary);
        if !has_secondary && self.y_axis_secondary.range.is_none() {
            return Ok(None);
        }
        self.y_range(YAxisType::Secondary).map(Some)
    }

    fn ticks(
        &self,
        renderer: &mut dyn Renderer,
        x_range: &Range,
        y_range: &Range,
        y_range_secondary: Option<&Range>,
    ) -> (Vec<Tick>, Vec<Tick>, Vec<Tick>) {
        let x_ticks = self
            .x_axis
            .ticks(renderer, x_range, TickDirection::Horizontal);
        let y_ticks = self.y_axis.ticks(renderer, y_range, TickDirection::Vertical);
        let y_ticks_secondary = match y_range_secondary {
            Some(range) => self
                .y_axis_secondary
                .ticks(renderer, range, TickDirection::Vertical),
            None => Vec::new(),
        };
        trace!(
            x_ticks = x_ticks.len(),
            y_ticks = y_ticks.len(),
            y_ticks_secondary = y_ticks_secondary.len(),
            "ticks generated"
        );
        (x_ticks, y_ticks, y_ticks_secondary)
    }

    fn reserve_axes(
        &self,
        renderer: &mut dyn Renderer,
        content: PixelBox,
        x_range: &Range,
        y_range: &Range,
        (x_ticks, y_ticks, y_ticks_secondary): &(Vec<Tick>, Vec<Tick>, Vec<Tick>),
    ) -> ChartResult<PixelBox> {
        let bottom = self.x_axis.measure_x(renderer, x_ticks);
        let mut right = self.y_axis.measure_y(renderer, y_ticks);
        let mut top = self.y_axis.measure_y_name(renderer);
        let mut left = 0;
        if !y_ticks_secondary.is_empty() || self.y_axis_secondary.ticks.is_some() {
            left = self.y_axis_secondary.measure_y(renderer, y_ticks_secondary);
            top = top.max(self.y_axis_secondary.measure_y_name(renderer));
        }

        // Last-value labels hang off the right edge of the plot.
        let provisional = PixelBox::from_ltrb(
            content.left + left,
            content.top + top,
            content.right - right,
            content.bottom - bottom,
        );
        for series in self.visible_annotations() {
            let AnnotationSource { annotations, style } = series;
            for annotation in annotations {
                let x = provisional.left + x_range.translate(annotation.x);
                let y = provisional.top + y_range.translate(annotation.y);
                let bounds = measure_annotation(renderer, style, x, y, &annotation.label);
                right = right.max(bounds.right - provisional.right);
            }
        }

        let canvas = PixelBox::from_ltrb(
            content.left + left,
            content.top + top,
            content.right - right,
            content.bottom - bottom,
        );
        if canvas.width() <= 0 || canvas.height() <= 0 {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(canvas)
    }

    fn visible_annotations(&self) -> impl Iterator<Item = AnnotationSource<'_>> {
        self.series
            .iter()
            .filter(|series| series.is_visible())
            .filter_map(|series| match series {
                Series::Annotation(annotations) => Some(AnnotationSource {
                    annotations: annotations.annotations(),
                    style: series.style(),
                }),
                _ => None,
            })
    }

    fn draw_background(&self, renderer: &mut dyn Renderer, layout: &ChartLayout) -> ChartResult<()> {
        let palette = default_palette();
        let background = self.background.fill_color_or(palette.background);
        renderer.set_fill_color(background);
        renderer.set_stroke_color(self.background.stroke_color_or(background));
        renderer.set_stroke_width(self.background.stroke_width());
        renderer.set_dash_array(&[]);
        renderer.draw_box(layout.frame)?;

        let canvas = self.canvas.fill_color_or(palette.canvas);
        renderer.set_fill_color(canvas);
        renderer.set_stroke_color(self.canvas.stroke_color_or(canvas));
        renderer.set_stroke_width(self.canvas.stroke_width());
        renderer.draw_box(layout.canvas)
    }

    fn draw_annotations(&self, renderer: &mut dyn Renderer, layout: &ChartLayout) -> ChartResult<()> {
        for series in &self.series {
            let Series::Annotation(annotations) = series else {
                continue;
            };
            if !series.is_visible() {
                continue;
            }
            let placement = layout.placement(series.y_axis());
            for annotation in annotations.annotations() {
                draw_annotation(
                    renderer,
                    series.style(),
                    placement.x(annotation.x),
                    placement.y(annotation.y),
                    &annotation.label,
                )?;
            }
        }
        Ok(())
    }

    /// Legend rows: visible non-annotation series in chart order.
    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        let palette = default_palette();
        self.series
            .iter()
            .enumerate()
            .filter(|(_, series)| series.is_visible() && !series.is_annotation())
            .map(|(index, series)| LegendEntry {
                label: series.name().to_owned(),
                style: series.style().inherit_from(
                    &Style::default()
                        .with_stroke_color(palette.series_stroke(index))
                        .with_stroke_width(DEFAULT_SERIES_LINE_WIDTH),
                ),
            })
            .collect()
    }
}

struct AnnotationSource<'a> {
    annotations: &'a [Annotation],
    style: &'a Style,
}

fn set_domains(
    x_range: &mut Range,
    y_range: &mut Range,
    y_range_secondary: Option<&mut Range>,
    bounds: PixelBox,
) {
    x_range.set_domain(bounds.width());
    y_range.set_domain(bounds.height());
    if let Some(range) = y_range_secondary {
        range.set_domain(bounds.height());
    }
}
