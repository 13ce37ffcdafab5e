use smallvec::SmallVec;

use crate::core::palette::{DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH, default_palette};
use crate::render::{Color, Renderer};

/// Dash pattern in pixels; empty means a solid line.
pub type DashArray = SmallVec<[f64; 4]>;

/// Presentation attributes shared by series, axes, annotations and legends.
///
/// Zero-valued fields are "unset" and resolve through the `*_or` getters.
/// Only an explicit `show = false` hides an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub show: bool,
    pub stroke_color: Color,
    pub fill_color: Color,
    pub font_color: Color,
    pub stroke_width: f64,
    pub dash_array: DashArray,
    pub font_size: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            show: true,
            stroke_color: Color::TRANSPARENT,
            fill_color: Color::TRANSPARENT,
            font_color: Color::TRANSPARENT,
            stroke_width: 0.0,
            dash_array: DashArray::new(),
            font_size: 0.0,
        }
    }
}

impl Style {
    /// A style that renders nothing.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            show: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    #[must_use]
    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    #[must_use]
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    #[must_use]
    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = color;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_dash_array(mut self, dashes: &[f64]) -> Self {
        self.dash_array = DashArray::from_slice(dashes);
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn stroke_color_or(&self, default: Color) -> Color {
        if self.stroke_color.is_zero() {
            default
        } else {
            self.stroke_color
        }
    }

    #[must_use]
    pub fn fill_color_or(&self, default: Color) -> Color {
        if self.fill_color.is_zero() {
            default
        } else {
            self.fill_color
        }
    }

    #[must_use]
    pub fn font_color_or(&self, default: Color) -> Color {
        if self.font_color.is_zero() {
            default
        } else {
            self.font_color
        }
    }

    #[must_use]
    pub fn stroke_width_or(&self, default: f64) -> f64 {
        if self.stroke_width > 0.0 {
            self.stroke_width
        } else {
            default
        }
    }

    #[must_use]
    pub fn font_size_or(&self, default: f64) -> f64 {
        if self.font_size > 0.0 {
            self.font_size
        } else {
            default
        }
    }

    #[must_use]
    pub fn stroke_color(&self) -> Color {
        self.stroke_color_or(default_palette().stroke)
    }

    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width_or(DEFAULT_STROKE_WIDTH)
    }

    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.font_size_or(DEFAULT_FONT_SIZE)
    }

    #[must_use]
    pub fn font_color(&self) -> Color {
        self.font_color_or(default_palette().text)
    }

    /// Fills unset fields from `defaults`; `show` is kept from `self`.
    #[must_use]
    pub fn inherit_from(&self, defaults: &Style) -> Style {
        Style {
            show: self.show,
            stroke_color: self.stroke_color_or(defaults.stroke_color),
            fill_color: self.fill_color_or(defaults.fill_color),
            font_color: self.font_color_or(defaults.font_color),
            stroke_width: self.stroke_width_or(defaults.stroke_width),
            dash_array: if self.dash_array.is_empty() {
                defaults.dash_array.clone()
            } else {
                self.dash_array.clone()
            },
            font_size: self.font_size_or(defaults.font_size),
        }
    }

    /// Pushes stroke attributes onto the renderer.
    pub fn write_stroke_to(&self, renderer: &mut dyn Renderer) {
        renderer.set_stroke_color(self.stroke_color());
        renderer.set_stroke_width(self.stroke_width());
        renderer.set_dash_array(&self.dash_array);
    }
}
