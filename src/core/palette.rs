//! Process-wide defaults used when a style field is unset.

use std::sync::OnceLock;

use crate::render::{Color, Font};

pub const DEFAULT_FONT_SIZE: f64 = 10.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;
pub const DEFAULT_SERIES_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_ANNOTATION_FONT_SIZE: f64 = 10.0;
pub const DEFAULT_LEGEND_FONT_SIZE: f64 = 8.0;

/// Pixels between the canvas edge and axis labels.
pub const DEFAULT_X_AXIS_MARGIN: i32 = 10;
pub const DEFAULT_Y_AXIS_MARGIN: i32 = 10;
pub const DEFAULT_VERTICAL_TICK_HEIGHT: i32 = 5;
pub const DEFAULT_HORIZONTAL_TICK_WIDTH: i32 = 5;
pub const DEFAULT_MINIMUM_TICK_HORIZONTAL_SPACING: i32 = 20;
pub const DEFAULT_MINIMUM_TICK_VERTICAL_SPACING: i32 = 20;
pub const DEFAULT_CANVAS_PADDING: i32 = 5;

pub const DEFAULT_ANNOTATION_DELTA_WIDTH: i32 = 10;
pub const DEFAULT_ANNOTATION_PADDING: i32 = 5;

pub const DEFAULT_LEGEND_PADDING: i32 = 5;
pub const DEFAULT_LEGEND_ROW_SPACING: i32 = 5;
pub const DEFAULT_LEGEND_LINE_LENGTH: i32 = 25;
pub const DEFAULT_LEGEND_LABEL_GAP: i32 = 5;

pub const DEFAULT_FONT_FAMILY: &str = "Roboto, Helvetica, Arial, sans-serif";

/// Immutable defaults shared by every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub canvas: Color,
    pub stroke: Color,
    pub text: Color,
    pub axis: Color,
    pub grid: Color,
    pub annotation_fill: Color,
    pub legend_fill: Color,
    pub bullish: Color,
    pub bearish: Color,
    pub series: Vec<Color>,
}

impl Palette {
    /// Series stroke color by index, cycling through the palette.
    #[must_use]
    pub fn series_stroke(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return self.stroke;
        }
        self.series[index % self.series.len()]
    }
}

#[must_use]
pub fn default_palette() -> &'static Palette {
    static PALETTE: OnceLock<Palette> = OnceLock::new();
    PALETTE.get_or_init(|| Palette {
        background: Color::WHITE,
        canvas: Color::WHITE,
        stroke: Color::from_rgb8(0x33, 0x33, 0x33),
        text: Color::from_rgb8(0x33, 0x33, 0x33),
        axis: Color::from_rgb8(0x33, 0x33, 0x33),
        grid: Color::from_rgb8(0xdd, 0xdd, 0xdd),
        annotation_fill: Color::WHITE,
        legend_fill: Color::WHITE,
        bullish: Color::from_rgb8(0x26, 0xa6, 0x9a),
        bearish: Color::from_rgb8(0xef, 0x53, 0x50),
        series: vec![
            Color::from_rgb8(0x00, 0x74, 0xd9),
            Color::from_rgb8(0x00, 0xdb, 0x6a),
            Color::from_rgb8(0xff, 0x41, 0x36),
            Color::from_rgb8(0xff, 0xdc, 0x00),
            Color::from_rgb8(0x85, 0x14, 0x4b),
            Color::from_rgb8(0x39, 0xcc, 0xcc),
        ],
    })
}

#[must_use]
pub fn default_font() -> &'static Font {
    static FONT: OnceLock<Font> = OnceLock::new();
    FONT.get_or_init(|| Font::new(DEFAULT_FONT_FAMILY))
}
