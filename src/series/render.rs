use tracing::trace;

use crate::core::palette::{DEFAULT_SERIES_LINE_WIDTH, default_palette};
use crate::core::{BoundedPoint, DataPoint, PixelBox, Range, Style, project_candle};
use crate::error::ChartResult;
use crate::render::{Color, Renderer};
use crate::series::{BollingerBandsSeries, CandlestickSeries, Series};

const CANDLE_BODY_RATIO: f64 = 0.7;
const HISTOGRAM_BAR_RATIO: f64 = 0.6;
const BAND_FILL_ALPHA: u8 = 32;

/// Canvas placement shared by every series drawn in one pass.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub canvas: PixelBox,
    pub x_range: &'a Range,
    pub y_range: &'a Range,
}

impl Placement<'_> {
    #[must_use]
    pub fn x(&self, value: f64) -> i32 {
        self.canvas.left + self.x_range.translate(value)
    }

    #[must_use]
    pub fn y(&self, value: f64) -> i32 {
        self.canvas.top + self.y_range.translate(value)
    }

    #[must_use]
    pub fn point(&self, point: DataPoint) -> (i32, i32) {
        (self.x(point.x), self.y(point.y))
    }
}

impl Series {
    /// Draws the series body. Annotations are drawn in their own pass.
    ///
    /// `default_color` applies when the style leaves the stroke unset.
    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        placement: Placement<'_>,
        default_color: Color,
    ) -> ChartResult<()> {
        if !self.is_visible() || self.is_annotation() || self.is_empty() {
            return Ok(());
        }
        let style = self.style().inherit_from(
            &Style::default()
                .with_stroke_color(default_color)
                .with_stroke_width(DEFAULT_SERIES_LINE_WIDTH),
        );
        trace!(series = self.name(), kind = self.kind(), len = self.len(), "render series");
        match self {
            Self::BollingerBands(bands) => render_bands(renderer, placement, bands, &style),
            Self::MacdHistogram(_) => render_histogram(renderer, placement, &self.points(), &style),
            Self::Candlestick(candles) => render_candles(renderer, placement, candles, &style),
            _ => render_line(renderer, placement, &self.points(), &style),
        }
    }
}

fn render_line(
    renderer: &mut dyn Renderer,
    placement: Placement<'_>,
    points: &[DataPoint],
    style: &Style,
) -> ChartResult<()> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };
    let (x0, y0) = placement.point(*first);

    if !style.fill_color.is_zero() {
        renderer.set_fill_color(style.fill_color);
        renderer.move_to(x0, y0);
        let mut last_x = x0;
        for point in rest {
            let (x, y) = placement.point(*point);
            renderer.line_to(x, y);
            last_x = x;
        }
        renderer.line_to(last_x, placement.canvas.bottom);
        renderer.line_to(x0, placement.canvas.bottom);
        renderer.close();
        renderer.fill()?;
    }

    style.write_stroke_to(renderer);
    renderer.move_to(x0, y0);
    for point in rest {
        let (x, y) = placement.point(*point);
        renderer.line_to(x, y);
    }
    renderer.stroke()
}

fn render_bands(
    renderer: &mut dyn Renderer,
    placement: Placement<'_>,
    bands: &BollingerBandsSeries,
    style: &Style,
) -> ChartResult<()> {
    let bounds: Vec<_> = (0..bands.len())
        .filter_map(|index| bands.bounded_value_at(index))
        .collect();
    let Some(first) = bounds.first() else {
        return Ok(());
    };

    let fill = style.fill_color_or(style.stroke_color.with_alpha(BAND_FILL_ALPHA));
    renderer.set_fill_color(fill);
    renderer.move_to(placement.x(first.x), placement.y(first.upper));
    for bound in &bounds[1..] {
        renderer.line_to(placement.x(bound.x), placement.y(bound.upper));
    }
    for bound in bounds.iter().rev() {
        renderer.line_to(placement.x(bound.x), placement.y(bound.lower));
    }
    renderer.close();
    renderer.fill()?;

    style.write_stroke_to(renderer);
    stroke_band(renderer, placement, &bounds, |bound| bound.upper)?;
    stroke_band(renderer, placement, &bounds, |bound| bound.lower)
}

fn stroke_band(
    renderer: &mut dyn Renderer,
    placement: Placement<'_>,
    bounds: &[BoundedPoint],
    pick: fn(&BoundedPoint) -> f64,
) -> ChartResult<()> {
    let Some((first, rest)) = bounds.split_first() else {
        return Ok(());
    };
    renderer.move_to(placement.x(first.x), placement.y(pick(first)));
    for bound in rest {
        renderer.line_to(placement.x(bound.x), placement.y(pick(bound)));
    }
    renderer.stroke()
}

fn render_histogram(
    renderer: &mut dyn Renderer,
    placement: Placement<'_>,
    points: &[DataPoint],
    style: &Style,
) -> ChartResult<()> {
    let half = bar_width(placement.canvas, points.len(), HISTOGRAM_BAR_RATIO) / 2;
    let zero = placement.y(0.0);
    style.write_stroke_to(renderer);
    renderer.set_fill_color(style.fill_color_or(style.stroke_color));
    for point in points {
        let (x, y) = placement.point(*point);
        renderer.draw_box(PixelBox::from_ltrb(
            x - half,
            y.min(zero),
            x + half.max(1),
            y.max(zero),
        ))?;
    }
    Ok(())
}

fn render_candles(
    renderer: &mut dyn Renderer,
    placement: Placement<'_>,
    candles: &CandlestickSeries,
    style: &Style,
) -> ChartResult<()> {
    let palette = default_palette();
    let body_width = bar_width(placement.canvas, candles.len(), CANDLE_BODY_RATIO);
    renderer.set_stroke_width(style.stroke_width());
    renderer.set_dash_array(&[]);
    for bar in candles.bars() {
        let geometry = project_candle(
            *bar,
            placement.x_range,
            placement.y_range,
            placement.canvas.left,
            placement.canvas.top,
            body_width,
        );
        let color = if geometry.is_bullish {
            palette.bullish
        } else {
            palette.bearish
        };
        renderer.set_stroke_color(color);
        renderer.set_fill_color(color);

        renderer.move_to(geometry.center_x, geometry.wick_top);
        renderer.line_to(geometry.center_x, geometry.wick_bottom);
        renderer.stroke()?;

        renderer.draw_box(PixelBox::from_ltrb(
            geometry.body_left,
            geometry.body_top,
            geometry.body_right,
            geometry.body_bottom,
        ))?;
    }
    Ok(())
}

// Pixel width of one bar given `count` evenly spread slots.
fn bar_width(canvas: PixelBox, count: usize, ratio: f64) -> i32 {
    let slot = f64::from(canvas.width()) / count.max(1) as f64;
    ((slot * ratio).floor() as i32).max(1)
}
