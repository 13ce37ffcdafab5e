mod primitives;
mod recording;
mod svg;
mod text_metrics;

use std::fmt;
use std::str::FromStr;

pub use primitives::{Color, Font, TextBox};
pub use recording::{PathOp, RecordedCommand, RecordingRenderer};
pub use svg::SvgRenderer;
pub use text_metrics::estimate_text_box;

use crate::core::PixelBox;
use crate::error::{ChartError, ChartResult};

/// Contract implemented by any drawing backend.
///
/// State setters and path building never fail; operations that commit
/// pixels or bytes return `ChartResult` so backend failures abort a render.
/// Coordinates are integer pixels with a top-left origin. The `y` passed to
/// `text` is the baseline.
pub trait Renderer {
    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_width(&mut self, width: f64);
    fn set_dash_array(&mut self, dashes: &[f64]);
    fn set_font(&mut self, font: &Font);
    fn set_font_size(&mut self, size: f64);
    fn set_font_color(&mut self, color: Color);

    fn move_to(&mut self, x: i32, y: i32);
    fn line_to(&mut self, x: i32, y: i32);
    fn close(&mut self);

    fn stroke(&mut self) -> ChartResult<()>;
    fn fill(&mut self) -> ChartResult<()>;
    fn fill_stroke(&mut self) -> ChartResult<()>;

    fn text(&mut self, body: &str, x: i32, y: i32) -> ChartResult<()>;

    /// Extent of `body` at the current font and size.
    fn measure_text(&self, body: &str) -> TextBox;

    /// Closed rectangle path, filled then stroked with the current state.
    fn draw_box(&mut self, bounds: PixelBox) -> ChartResult<()> {
        self.move_to(bounds.left, bounds.top);
        self.line_to(bounds.right, bounds.top);
        self.line_to(bounds.right, bounds.bottom);
        self.line_to(bounds.left, bounds.bottom);
        self.close();
        self.fill_stroke()
    }

    /// Serializes the drawing; the renderer is spent afterwards.
    fn finish(&mut self) -> ChartResult<Vec<u8>>;
}

/// Encoded output kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    #[default]
    Png,
}

impl OutputFormat {
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// Creates the backend for this format at the given pixel size.
    ///
    /// PNG needs the `cairo-backend` feature; without it the request is an
    /// `InvalidConfiguration`.
    pub fn create_renderer(self, width: i32, height: i32) -> ChartResult<Box<dyn Renderer>> {
        match self {
            Self::Svg => Ok(Box::new(SvgRenderer::new(width, height))),
            Self::Png => create_raster_renderer(width, height),
        }
    }
}

#[cfg(feature = "cairo-backend")]
fn create_raster_renderer(width: i32, height: i32) -> ChartResult<Box<dyn Renderer>> {
    Ok(Box::new(RasterRenderer::new(width, height)?))
}

#[cfg(not(feature = "cairo-backend"))]
fn create_raster_renderer(_width: i32, _height: i32) -> ChartResult<Box<dyn Renderer>> {
    Err(ChartError::config(
        "png output requires the `cairo-backend` feature",
    ))
}

impl FromStr for OutputFormat {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(ChartError::config(format!(
                "unsupported output format `{other}`"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::RasterRenderer;
