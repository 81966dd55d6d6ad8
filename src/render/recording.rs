use crate::eval::frame::DrawCommand;
use crate::foundation::error::{ChalkError, ChalkResult};
use crate::render::surface::Surface;

/// One call received by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    Clear,
    Backdrop,
    Draw(DrawCommand),
    Present,
}

/// Surface that records calls instead of drawing.
///
/// Useful for headless hosts that forward commands elsewhere, and for asserting exactly what a
/// player drew.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
    presented_frames: u64,
    fail: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose every call fails, standing in for an unobtainable drawing context.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Draw commands recorded so far, in order.
    pub fn draws(&self) -> impl Iterator<Item = &DrawCommand> {
        self.events.iter().filter_map(|e| match e {
            SurfaceEvent::Draw(cmd) => Some(cmd),
            _ => None,
        })
    }

    /// Number of `present` calls so far.
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    /// Draw commands since the most recent clear, i.e. what is currently on screen.
    pub fn visible(&self) -> Vec<&DrawCommand> {
        let start = self
            .events
            .iter()
            .rposition(|e| *e == SurfaceEvent::Clear)
            .map_or(0, |i| i + 1);
        self.events[start..]
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Draw(cmd) => Some(cmd),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, event: SurfaceEvent) -> ChalkResult<()> {
        if self.fail {
            return Err(ChalkError::render("drawing context unavailable"));
        }
        self.events.push(event);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) -> ChalkResult<()> {
        self.record(SurfaceEvent::Clear)
    }

    fn draw_backdrop(&mut self) -> ChalkResult<()> {
        self.record(SurfaceEvent::Backdrop)
    }

    fn draw(&mut self, cmd: &DrawCommand) -> ChalkResult<()> {
        self.record(SurfaceEvent::Draw(cmd.clone()))
    }

    fn present(&mut self) -> ChalkResult<()> {
        self.record(SurfaceEvent::Present)?;
        self.presented_frames += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
