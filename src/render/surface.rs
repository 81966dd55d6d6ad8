use crate::eval::frame::{DrawCommand, EvaluatedFrame};
use crate::foundation::core::Canvas;
use crate::foundation::error::ChalkResult;

/// A 2D target the player draws onto.
///
/// A surface owns its own styling (background, grid, stroke width, font) and works in the fixed
/// board coordinate space; it never rescales content.
pub trait Surface {
    /// Logical size of the surface.
    fn canvas(&self) -> Canvas {
        Canvas::BOARD
    }

    /// Erase everything to transparent.
    fn clear(&mut self) -> ChalkResult<()>;

    /// Paint the background fill and decorative grid.
    fn draw_backdrop(&mut self) -> ChalkResult<()>;

    /// Draw one element primitive on top of what is already there.
    fn draw(&mut self, cmd: &DrawCommand) -> ChalkResult<()>;

    /// Make everything drawn since the last clear visible.
    fn present(&mut self) -> ChalkResult<()> {
        Ok(())
    }
}

/// Replace the surface contents with `frame`: clear, backdrop, elements in order, present.
pub fn paint_frame<S: Surface + ?Sized>(surface: &mut S, frame: &EvaluatedFrame) -> ChalkResult<()> {
    surface.clear()?;
    surface.draw_backdrop()?;
    for cmd in &frame.commands {
        surface.draw(cmd)?;
    }
    surface.present()
}

/// Clear the surface and present the empty result.
pub fn blank<S: Surface + ?Sized>(surface: &mut S) -> ChalkResult<()> {
    surface.clear()?;
    surface.present()
}
