use serde::{Deserialize, Serialize};

use crate::core::palette::{
    DEFAULT_ANNOTATION_DELTA_WIDTH, DEFAULT_ANNOTATION_FONT_SIZE, DEFAULT_ANNOTATION_PADDING,
    default_font, default_palette,
};
use crate::core::{PixelBox, Style};
use crate::error::ChartResult;
use crate::render::Renderer;

/// A labelled point in domain coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

impl Annotation {
    #[must_use]
    pub fn new(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: label.into(),
        }
    }
}

fn apply_text_style(renderer: &mut dyn Renderer, style: &Style) {
    renderer.set_font(default_font());
    renderer.set_font_size(style.font_size_or(DEFAULT_ANNOTATION_FONT_SIZE));
    renderer.set_font_color(style.font_color());
}

/// Bounds of the label box anchored at pixel `(x, y)`.
///
/// The box is left-anchored: a pointed tip sits on the point and the label
/// extends to the right, vertically centred.
pub fn measure_annotation(
    renderer: &mut dyn Renderer,
    style: &Style,
    x: i32,
    y: i32,
    label: &str,
) -> PixelBox {
    apply_text_style(renderer, style);
    let text = renderer.measure_text(label);
    let half_height = text.height / 2 + DEFAULT_ANNOTATION_PADDING;
    PixelBox::from_ltrb(
        x,
        y - half_height,
        x + DEFAULT_ANNOTATION_DELTA_WIDTH + text.width + 2 * DEFAULT_ANNOTATION_PADDING,
        y + half_height,
    )
}

/// Draws a filled, stroked label box with its tip on pixel `(x, y)`.
pub fn draw_annotation(
    renderer: &mut dyn Renderer,
    style: &Style,
    x: i32,
    y: i32,
    label: &str,
) -> ChartResult<()> {
    let bounds = measure_annotation(renderer, style, x, y, label);
    let text = renderer.measure_text(label);
    let shoulder = x + DEFAULT_ANNOTATION_DELTA_WIDTH;

    renderer.set_fill_color(style.fill_color_or(default_palette().annotation_fill));
    renderer.set_stroke_color(style.stroke_color());
    renderer.set_stroke_width(style.stroke_width());
    renderer.set_dash_array(&[]);
    renderer.move_to(x, y);
    renderer.line_to(shoulder, bounds.top);
    renderer.line_to(bounds.right, bounds.top);
    renderer.line_to(bounds.right, bounds.bottom);
    renderer.line_to(shoulder, bounds.bottom);
    renderer.close();
    renderer.fill_stroke()?;

    renderer.text(
        label,
        shoulder + DEFAULT_ANNOTATION_PADDING,
        y + text.height / 2,
    )
}
