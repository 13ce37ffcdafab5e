use crate::axis::{Axis, Tick};
use crate::core::palette::{DEFAULT_VERTICAL_TICK_HEIGHT, DEFAULT_X_AXIS_MARGIN};
use crate::core::{PixelBox, Range};
use crate::error::ChartResult;
use crate::render::Renderer;

impl Axis {
    /// Pixels reserved below the canvas for the horizontal axis.
    pub fn measure_x(&self, renderer: &mut dyn Renderer, ticks: &[Tick]) -> i32 {
        if !self.is_shown() {
            return 0;
        }
        self.apply_font(renderer);
        let label_height = ticks
            .iter()
            .map(|tick| renderer.measure_text(&tick.label).height)
            .max()
            .unwrap_or(0);
        DEFAULT_X_AXIS_MARGIN + label_height
    }

    /// Baseline along the canvas bottom, then a tick mark and centred label
    /// per tick.
    pub fn render_x(
        &self,
        renderer: &mut dyn Renderer,
        canvas: PixelBox,
        range: &Range,
        ticks: &[Tick],
    ) -> ChartResult<()> {
        if !self.is_shown() {
            return Ok(());
        }
        self.apply_stroke(renderer);
        renderer.move_to(canvas.left, canvas.bottom);
        renderer.line_to(canvas.right, canvas.bottom);
        renderer.stroke()?;

        self.apply_font(renderer);
        for tick in ticks {
            let x = canvas.left + range.translate(tick.value);
            let label = renderer.measure_text(&tick.label);
            renderer.text(
                &tick.label,
                x - label.width / 2,
                canvas.bottom + DEFAULT_X_AXIS_MARGIN + label.height,
            )?;

            renderer.move_to(x, canvas.bottom);
            renderer.line_to(x, canvas.bottom + DEFAULT_VERTICAL_TICK_HEIGHT);
            renderer.stroke()?;
        }
        Ok(())
    }

    /// Vertical grid lines at each tick.
    pub fn render_x_grid(
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
            let x = canvas.left + range.translate(tick.value);
            if x <= canvas.left || x >= canvas.right {
                continue;
            }
            renderer.move_to(x, canvas.top);
            renderer.line_to(x, canvas.bottom);
            renderer.stroke()?;
        }
        Ok(())
    }
}
