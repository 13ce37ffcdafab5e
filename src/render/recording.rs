use serde::Serialize;

use crate::core::palette::{DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Font, Renderer, TextBox, estimate_text_box};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathOp {
    MoveTo { x: i32, y: i32 },
    LineTo { x: i32, y: i32 },
    Close,
}

/// One committed drawing operation with the state it was drawn with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RecordedCommand {
    Stroke {
        path: Vec<PathOp>,
        color: Color,
        width: f64,
        dashes: Vec<f64>,
    },
    Fill {
        path: Vec<PathOp>,
        color: Color,
    },
    FillStroke {
        path: Vec<PathOp>,
        fill: Color,
        stroke: Color,
        width: f64,
    },
    Text {
        body: String,
        x: i32,
        y: i32,
        size: f64,
        color: Color,
        #[serde(skip_serializing_if = "Option::is_none")]
        family: Option<String>,
    },
}

/// Headless backend that records commands instead of drawing.
///
/// Text metrics match `SvgRenderer`, so layouts computed here are the ones
/// an SVG render produces. `finish` returns the command list as JSON.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<RecordedCommand>,
    path: Vec<PathOp>,
    stroke_color: Color,
    fill_color: Color,
    stroke_width: f64,
    dash_array: Vec<f64>,
    font_size: f64,
    font_color: Color,
    font: Option<Font>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn commands(&self) -> &[RecordedCommand] {
        &self.commands
    }

    /// Text commands in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, i32, i32)> {
        self.commands.iter().filter_map(|command| match command {
            RecordedCommand::Text { body, x, y, .. } => Some((body.as_str(), *x, *y)),
            _ => None,
        })
    }

    /// Stroked paths drawn with `color`, in draw order.
    pub fn strokes_with_color(&self, color: Color) -> impl Iterator<Item = &[PathOp]> {
        self.commands.iter().filter_map(move |command| match command {
            RecordedCommand::Stroke {
                path, color: c, ..
            } if *c == color => Some(path.as_slice()),
            _ => None,
        })
    }

    fn take_path(&mut self) -> Vec<PathOp> {
        std::mem::take(&mut self.path)
    }
}

impl Renderer for RecordingRenderer {
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
        self.dash_array = dashes.to_vec();
    }

    fn set_font(&mut self, font: &Font) {
        self.font = Some(font.clone());
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn set_font_color(&mut self, color: Color) {
        self.font_color = color;
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.path.push(PathOp::MoveTo { x, y });
    }

    fn line_to(&mut self, x: i32, y: i32) {
        self.path.push(PathOp::LineTo { x, y });
    }

    fn close(&mut self) {
        self.path.push(PathOp::Close);
    }

    fn stroke(&mut self) -> ChartResult<()> {
        let path = self.take_path();
        self.commands.push(RecordedCommand::Stroke {
            path,
            color: self.stroke_color,
            width: self.stroke_width,
            dashes: self.dash_array.clone(),
        });
        Ok(())
    }

    fn fill(&mut self) -> ChartResult<()> {
        let path = self.take_path();
        self.commands.push(RecordedCommand::Fill {
            path,
            color: self.fill_color,
        });
        Ok(())
    }

    fn fill_stroke(&mut self) -> ChartResult<()> {
        let path = self.take_path();
        self.commands.push(RecordedCommand::FillStroke {
            path,
            fill: self.fill_color,
            stroke: self.stroke_color,
            width: self.stroke_width,
        });
        Ok(())
    }

    fn text(&mut self, body: &str, x: i32, y: i32) -> ChartResult<()> {
        self.commands.push(RecordedCommand::Text {
            body: body.to_owned(),
            x,
            y,
            size: self.font_size,
            color: self.font_color,
            family: self.font.as_ref().map(|font| font.family.clone()),
        });
        Ok(())
    }

    fn measure_text(&self, body: &str) -> TextBox {
        estimate_text_box(body, self.font_size)
    }

    fn finish(&mut self) -> ChartResult<Vec<u8>> {
        serde_json::to_vec(&self.commands).map_err(|err| {
            ChartError::RenderBackend(format!("failed to serialize recorded commands: {err}"))
        })
    }
}
