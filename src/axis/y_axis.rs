use crate::axis::{Axis, Tick};
use crate::core::palette::{DEFAULT_HORIZONTAL_TICK_WIDTH, DEFAULT_Y_AXIS_MARGIN, default_palette};
use crate::core::{PixelBox, Range};
use crate::error::ChartResult;
use crate::render::Renderer;
use crate::series::YAxisType;

impl Axis {
    /// Pixels reserved beside the canvas for a vertical axis.
    pub fn measure_y(&self, renderer: &mut dyn Renderer, ticks: &[Tick]) -> i32 {
        if !self.is_shown() {
            return 0;
        }
        self.apply_font(renderer);
        let label_width = ticks
            .iter()
            .map(|tick| renderer.measure_text(&tick.label).width)
            .max()
            .unwrap_or(0);
        let name_width = if self.name.is_empty() {
            0
        } else {
            renderer.measure_text(&self.name).width
        };
        DEFAULT_Y_AXIS_MARGIN + label_width.max(name_width)
    }

    /// Pixels reserved above the canvas for the axis name.
    pub fn measure_y_name(&self, renderer: &mut dyn Renderer) -> i32 {
        if !self.is_shown() || self.name.is_empty() {
            return 0;
        }
        self.apply_font(renderer);
        renderer.measure_text(&self.name).height + DEFAULT_Y_AXIS_MARGIN / 2
    }

    /// Baseline along the canvas edge for `side`, then tick marks and labels.
    ///
    /// The primary axis sits on the right, the secondary on the left.
    pub fn render_y(
        &self,
        renderer: &mut dyn Renderer,
        canvas: PixelBox,
        range: &Range,
        ticks: &[Tick],
        side: YAxisType,
    ) -> ChartResult<()> {
        if !self.is_shown() {
            return Ok(());
        }
        let edge = match side {
            YAxisType::Primary => canvas.right,
            YAxisType::Secondary => canvas.left,
        };
        self.apply_stroke(renderer);
        renderer.move_to(edge, canvas.top);
        renderer.line_to(edge, canvas.bottom);
        renderer.stroke()?;

        self.apply_font(renderer);
        for tick in ticks {
            let y = canvas.top + range.translate(tick.value);
            let label = renderer.measure_text(&tick.label);
            let (label_x, tick_end) = match side {
                YAxisType::Primary => (
                    edge + DEFAULT_Y_AXIS_MARGIN,
                    edge + DEFAULT_HORIZONTAL_TICK_WIDTH,
                ),
                YAxisType::Secondary => (
                    edge - DEFAULT_Y_AXIS_MARGIN - label.width,
                    edge - DEFAULT_HORIZONTAL_TICK_WIDTH,
                ),
            };
            renderer.text(&tick.label, label_x, y + label.height / 2)?;

            renderer.move_to(edge, y);
            renderer.line_to(tick_end, y);
            renderer.stroke()?;
        }

        if !self.name.is_empty() {
            let name = renderer.measure_text(&self.name);
            let name_x = match side {
                YAxisType::Primary => edge + DEFAULT_Y_AXIS_MARGIN,
                YAxisType::Secondary => edge - DEFAULT_Y_AXIS_MARGIN - name.width,
            };
            renderer.text(&self.name, name_x, canvas.top - DEFAULT_Y_AXIS_MARGIN / 2)?;
        }
        Ok(())
    }

    /// Horizontal grid lines at each tick.
    pub fn render_y_grid(
        &self,
        renderer: &mut dyn Renderer,
        canvas: PixelBox,
        range: &Range,
        ticks: &[Tick],
    ) -> ChartResult<()> {
        if !self.grid_style.show {
            return Ok(());
        }
        self.apply_grid_stroke(renderer);
        for tick in ticks {
            let y = canvas.top + range.translate(tick.value);
            if y <= canvas.top || y >= canvas.bottom {
                continue;
            }
            renderer.move_to(canvas.left, y);
            renderer.line_to(canvas.right, y);
            renderer.stroke()?;
        }
        Ok(())
    }

    /// Line at value zero when the range straddles it.
    pub fn render_zero_line(
        &self,
        renderer: &mut dyn Renderer,
        canvas: PixelBox,
        range: &Range,
    ) -> ChartResult<()> {
        if !self.zero_line.show || !(range.min() < 0.0 && range.max() > 0.0) {
            return Ok(());
        }
        let y = canvas.top + range.translate(0.0);
        renderer.set_stroke_color(self.zero_line.stroke_color_or(default_palette().axis));
        renderer.set_stroke_width(self.zero_line.stroke_width());
        renderer.set_dash_array(&self.zero_line.dash_array);
        renderer.move_to(canvas.left, y);
        renderer.line_to(canvas.right, y);
        renderer.stroke()
    }
}
