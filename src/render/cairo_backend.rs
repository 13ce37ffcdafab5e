use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::palette::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Font, Renderer, TextBox};

/// Cairo + Pango + PangoCairo raster backend encoding PNG.
///
/// Paths are built directly on the Cairo context; text goes through a Pango
/// layout so measured extents match what is drawn.
#[derive(Debug)]
pub struct RasterRenderer {
    surface: ImageSurface,
    context: Context,
    stroke_color: Color,
    fill_color: Color,
    font_family: String,
    font_size: f64,
    font_color: Color,
}

impl RasterRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidViewport {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        context.set_line_width(DEFAULT_STROKE_WIDTH);
        Ok(Self {
            surface,
            context,
            stroke_color: Color::BLACK,
            fill_color: Color::TRANSPARENT,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            font_color: Color::BLACK,
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    fn layout(&self, body: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description =
            FontDescription::from_string(&format!("{} {}px", self.font_family, self.font_size));
        layout.set_font_description(Some(&font_description));
        layout.set_text(body);
        layout
    }
}

impl Renderer for RasterRenderer {
    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_dash_array(&mut self, dashes: &[f64]) {
        self.context.set_dash(dashes, 0.0);
    }

    fn set_font(&mut self, font: &Font) {
        // Pango takes a comma separated family list.
        self.font_family.clone_from(&font.family);
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn set_font_color(&mut self, color: Color) {
        self.font_color = color;
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.context.move_to(f64::from(x), f64::from(y));
    }

    fn line_to(&mut self, x: i32, y: i32) {
        self.context.line_to(f64::from(x), f64::from(y));
    }

    fn close(&mut self) {
        self.context.close_path();
    }

    fn stroke(&mut self) -> ChartResult<()> {
        apply_color(&self.context, self.stroke_color);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill(&mut self) -> ChartResult<()> {
        apply_color(&self.context, self.fill_color);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn fill_stroke(&mut self) -> ChartResult<()> {
        apply_color(&self.context, self.fill_color);
        self.context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill path", err))?;
        self.stroke()
    }

    fn text(&mut self, body: &str, x: i32, y: i32) -> ChartResult<()> {
        let layout = self.layout(body);
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        apply_color(&self.context, self.font_color);
        self.context.move_to(f64::from(x), f64::from(y) - baseline);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context.new_path();
        Ok(())
    }

    fn measure_text(&self, body: &str) -> TextBox {
        let (width, height) = self.layout(body).pixel_size();
        TextBox { width, height }
    }

    fn finish(&mut self) -> ChartResult<Vec<u8>> {
        self.surface.flush();
        let mut encoded = Vec::new();
        self.surface
            .write_to_png(&mut encoded)
            .map_err(|err| ChartError::RenderBackend(format!("failed to encode png: {err}")))?;
        Ok(encoded)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::RenderBackend(format!("{prefix}: {err}"))
}
