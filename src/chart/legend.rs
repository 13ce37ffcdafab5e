use crate::core::palette::{
    DEFAULT_LEGEND_FONT_SIZE, DEFAULT_LEGEND_LABEL_GAP, DEFAULT_LEGEND_LINE_LENGTH,
    DEFAULT_LEGEND_PADDING, DEFAULT_LEGEND_ROW_SPACING, default_font, default_palette,
};
use crate::core::{PixelBox, Style};
use crate::error::ChartResult;
use crate::render::Renderer;

/// One legend row: the series name and the resolved style of its line.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub style: Style,
}

/// Box needed to list `entries` with its top-left corner at `(left, top)`.
///
/// Width is the longest label plus the swatch; height stacks every label
/// with row spacing between them.
pub fn measure_legend(
    renderer: &mut dyn Renderer,
    style: &Style,
    entries: &[LegendEntry],
    left: i32,
    top: i32,
) -> PixelBox {
    apply_text_style(renderer, style);
    let mut label_width = 0;
    let mut height = 0;
    for (index, entry) in entries.iter().enumerate() {
        let text = renderer.measure_text(&entry.label);
        label_width = label_width.max(text.width);
        height += text.height;
        if index > 0 {
            height += DEFAULT_LEGEND_ROW_SPACING;
        }
    }
    PixelBox::from_ltrb(
        left,
        top,
        left + label_width
            + DEFAULT_LEGEND_LABEL_GAP
            + DEFAULT_LEGEND_LINE_LENGTH
            + 2 * DEFAULT_LEGEND_PADDING,
        top + height + 2 * DEFAULT_LEGEND_PADDING,
    )
}

/// Draws the legend box at the canvas top-left. Does nothing without entries.
pub fn draw_legend(
    renderer: &mut dyn Renderer,
    canvas: PixelBox,
    style: &Style,
    entries: &[LegendEntry],
) -> ChartResult<()> {
    if entries.is_empty() || !style.show {
        return Ok(());
    }
    let bounds = measure_legend(renderer, style, entries, canvas.left, canvas.top);
    let palette = default_palette();

    renderer.set_fill_color(style.fill_color_or(palette.legend_fill));
    renderer.set_stroke_color(style.stroke_color_or(palette.axis));
    renderer.set_stroke_width(style.stroke_width());
    renderer.set_dash_array(&[]);
    renderer.draw_box(bounds)?;

    let label_width = entries
        .iter()
        .map(|entry| renderer.measure_text(&entry.label).width)
        .max()
        .unwrap_or(0);
    let swatch_left =
        bounds.left + DEFAULT_LEGEND_PADDING + label_width + DEFAULT_LEGEND_LABEL_GAP;

    let mut cursor = bounds.top + DEFAULT_LEGEND_PADDING;
    for entry in entries {
        let text = renderer.measure_text(&entry.label);
        apply_text_style(renderer, style);
        renderer.text(&entry.label, bounds.left + DEFAULT_LEGEND_PADDING, cursor + text.height)?;

        let swatch_y = cursor + text.height / 2;
        entry.style.write_stroke_to(renderer);
        renderer.move_to(swatch_left, swatch_y);
        renderer.line_to(swatch_left + DEFAULT_LEGEND_LINE_LENGTH, swatch_y);
        renderer.stroke()?;

        cursor += text.height + DEFAULT_LEGEND_ROW_SPACING;
    }
    Ok(())
}

fn apply_text_style(renderer: &mut dyn Renderer, style: &Style) {
    renderer.set_font(default_font());
    renderer.set_font_size(style.font_size_or(DEFAULT_LEGEND_FONT_SIZE));
    renderer.set_font_color(style.font_color());
}
