//! Axes: tick generation, measurement and drawing.

mod formatter;
mod ticks;
mod x_axis;
mod y_axis;

pub use formatter::{
    DEFAULT_DATE_FORMAT, DEFAULT_DATE_HOUR_FORMAT, DEFAULT_TIME_HOUR_FORMAT, ValueFormatter,
    date_hour_value_formatter, date_value_formatter, float_value_formatter,
    percent_value_formatter, time_hour_value_formatter,
};
pub use ticks::{
    Tick, TickDirection, continuous_ticks, generate_ticks, market_hours_ticks, normalize_ticks,
};

use crate::core::palette::{
    DEFAULT_MINIMUM_TICK_HORIZONTAL_SPACING, DEFAULT_MINIMUM_TICK_VERTICAL_SPACING,
    default_font, default_palette,
};
use crate::core::{Range, Style};
use crate::render::Renderer;

/// One chart axis.
///
/// `range` and `ticks` are normally derived at render time; setting them
/// pins the axis to caller-provided values.
#[derive(Debug, Clone)]
pub struct Axis {
    pub name: String,
    pub style: Style,
    pub grid_style: Style,
    pub zero_line: Style,
    pub value_formatter: ValueFormatter,
    pub range: Option<Range>,
    pub ticks: Option<Vec<Tick>>,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            name: String::new(),
            style: Style::default(),
            grid_style: Style::hidden(),
            zero_line: Style::hidden(),
            value_formatter: float_value_formatter,
            range: None,
            ticks: None,
        }
    }
}

impl Axis {
    #[must_use]
    pub fn new(value_formatter: ValueFormatter) -> Self {
        Self {
            value_formatter,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_grid_style(mut self, style: Style) -> Self {
        self.grid_style = style;
        self
    }

    #[must_use]
    pub fn with_zero_line(mut self, style: Style) -> Self {
        self.zero_line = style;
        self
    }

    #[must_use]
    pub fn with_value_formatter(mut self, value_formatter: ValueFormatter) -> Self {
        self.value_formatter = value_formatter;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: impl Into<Range>) -> Self {
        self.range = Some(range.into());
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: Vec<Tick>) -> Self {
        self.ticks = Some(ticks);
        self
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.style.show
    }

    /// Explicit ticks verbatim, otherwise ticks generated for `range`.
    pub fn ticks(
        &self,
        renderer: &mut dyn Renderer,
        range: &Range,
        direction: TickDirection,
    ) -> Vec<Tick> {
        if let Some(ticks) = &self.ticks {
            return ticks.clone();
        }
        self.apply_font(renderer);
        let spacing = match direction {
            TickDirection::Horizontal => DEFAULT_MINIMUM_TICK_HORIZONTAL_SPACING,
            TickDirection::Vertical => DEFAULT_MINIMUM_TICK_VERTICAL_SPACING,
        };
        generate_ticks(renderer, range, self.value_formatter, direction, spacing)
    }

    pub(crate) fn apply_font(&self, renderer: &mut dyn Renderer) {
        renderer.set_font(default_font());
        renderer.set_font_size(self.style.font_size());
        renderer.set_font_color(self.style.font_color_or(default_palette().axis));
    }

    pub(crate) fn apply_stroke(&self, renderer: &mut dyn Renderer) {
        renderer.set_stroke_color(self.style.stroke_color_or(default_palette().axis));
        renderer.set_stroke_width(self.style.stroke_width());
        renderer.set_dash_array(&[]);
    }

    pub(crate) fn apply_grid_stroke(&self, renderer: &mut dyn Renderer) {
        renderer.set_stroke_color(self.grid_style.stroke_color_or(default_palette().grid));
        renderer.set_stroke_width(self.grid_style.stroke_width());
        renderer.set_dash_array(&self.grid_style.dash_array);
    }
}
