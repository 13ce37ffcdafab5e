use std::fmt::Write as _;

use smallvec::SmallVec;

use crate::core::palette::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Font, Renderer, TextBox, estimate_text_box};

/// SVG markup backend.
///
/// Output is a pure function of the command sequence, so identical charts
/// produce byte-identical documents.
#[derive(Debug)]
pub struct SvgRenderer {
    width: i32,
    height: i32,
    body: String,
    path: String,
    stroke_color: Color,
    fill_color: Color,
    stroke_width: f64,
    dash_array: SmallVec<[f64; 4]>,
    font_family: String,
    font_size: f64,
    font_color: Color,
    finished: bool,
}

impl SvgRenderer {
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
            path: String::new(),
            stroke_color: Color::BLACK,
            fill_color: Color::TRANSPARENT,
            stroke_width: DEFAULT_STROKE_WIDTH,
            dash_array: SmallVec::new(),
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            font_color: Color::BLACK,
            finished: false,
        }
    }

    fn emit_path(&mut self, stroke: bool, fill: bool) -> ChartResult<()> {
        self.ensure_open()?;
        if self.path.is_empty() {
            return Ok(());
        }
        let stroke_style = if stroke && !self.stroke_color.is_zero() {
            let mut style = format!(
                "stroke:{};stroke-width:{}",
                self.stroke_color.to_css(),
                format_number(self.stroke_width)
            );
            if !self.dash_array.is_empty() {
                let dashes: Vec<String> =
                    self.dash_array.iter().map(|dash| format_number(*dash)).collect();
                let _ = write!(style, ";stroke-dasharray:{}", dashes.join(","));
            }
            style
        } else {
            "stroke:none".to_owned()
        };
        let fill_style = if fill && !self.fill_color.is_zero() {
            format!("fill:{}", self.fill_color.to_css())
        } else {
            "fill:none".to_owned()
        };
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" style=\"{stroke_style};{fill_style}\"/>",
            self.path.trim_end()
        );
        self.path.clear();
        Ok(())
    }

    fn ensure_open(&self) -> ChartResult<()> {
        if self.finished {
            return Err(ChartError::RenderBackend(
                "svg renderer already finished".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width;
    }

    fn set_dash_array(&mut self, dashes: &[f64]) {
        self.dash_array = SmallVec::from_slice(dashes);
    }

    fn set_font(&mut self, font: &Font) {
        self.font_family.clone_from(&font.family);
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn set_font_color(&mut self, color: Color) {
        self.font_color = color;
    }

    fn move_to(&mut self, x: i32, y: i32) {
        let _ = write!(self.path, "M {x} {y} ");
    }

    fn line_to(&mut self, x: i32, y: i32) {
        let _ = write!(self.path, "L {x} {y} ");
    }

    fn close(&mut self) {
        self.path.push_str("Z ");
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.emit_path(true, false)
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.emit_path(false, true)
    }

    fn fill_stroke(&mut self) -> ChartResult<()> {
        self.emit_path(true, true)
    }

    fn text(&mut self, body: &str, x: i32, y: i32) -> ChartResult<()> {
        self.ensure_open()?;
        let _ = writeln!(
            self.body,
            "<text x=\"{x}\" y=\"{y}\" style=\"fill:{};font-size:{}px;font-family:{}\">{}</text>",
            self.font_color.to_css(),
            format_number(self.font_size),
            escape_xml(&self.font_family),
            escape_xml(body)
        );
        Ok(())
    }

    fn measure_text(&self, body: &str) -> TextBox {
        estimate_text_box(body, self.font_size)
    }

    fn finish(&mut self) -> ChartResult<Vec<u8>> {
        self.ensure_open()?;
        self.finished = true;
        let mut document = String::with_capacity(self.body.len() + 160);
        let _ = writeln!(
            document,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height
        );
        document.push_str(&std::mem::take(&mut self.body));
        document.push_str("</svg>\n");
        Ok(document.into_bytes())
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
