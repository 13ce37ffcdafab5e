use crate::render::TextBox;

// Average advance of a proportional sans face, as a fraction of the em size.
const AVERAGE_ADVANCE: f64 = 0.6;
const NARROW_ADVANCE: f64 = 0.3;

/// Deterministic text extent used by backends without a font engine.
///
/// Narrow glyphs (punctuation, `i`, `l`, spaces) count for half an advance.
#[must_use]
pub fn estimate_text_box(body: &str, font_size: f64) -> TextBox {
    let size = if font_size > 0.0 { font_size } else { 0.0 };
    let advance: f64 = body
        .chars()
        .map(|ch| {
            if matches!(ch, '.' | ',' | ':' | ';' | '\'' | '!' | '|' | 'i' | 'l' | 'I' | ' ') {
                NARROW_ADVANCE
            } else {
                AVERAGE_ADVANCE
            }
        })
        .sum();
    TextBox {
        width: (advance * size).ceil() as i32,
        height: if body.is_empty() { 0 } else { size.ceil() as i32 },
    }
}
