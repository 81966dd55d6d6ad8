use std::sync::Arc;

use crate::eval::frame::{EvaluatedFrame, Evaluator};
use crate::player::clock::{FrameClock, TickId};
use crate::render::surface::{Surface, blank, paint_frame};
use crate::scene::model::Scene;

/// Where a [`ScenePlayer`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PlaybackPhase {
    /// No scene loaded.
    Idle,
    /// Scene loaded, no tick pending. The surface shows the rest frame or the last drawn frame.
    Paused,
    /// Exactly one tick pending.
    Playing,
    /// The scene reached its duration and completion has been signalled.
    Completed,
}

/// Result of delivering a tick to [`ScenePlayer::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// The tick was cancelled or superseded; nothing was drawn.
    Stale,
    /// A frame was drawn and the next tick is scheduled.
    Continue { elapsed_ms: f64, progress_percent: f64 },
    /// The final frame was drawn and completion fired.
    Completed { elapsed_ms: f64 },
}

impl TickOutcome {
    /// `true` when this tick drew a frame.
    pub fn drew(self) -> bool {
        !matches!(self, TickOutcome::Stale)
    }
}

type CompleteFn = Box<dyn FnMut(&Scene)>;

/// Plays one scene at a time onto a surface, driven by host frame ticks.
///
/// Transitions:
///
/// - `load_scene` from any phase: cancel the pending tick, reset the clock, clear the surface;
///   go to `Playing` when playback is requested, else to `Paused` after drawing the rest frame.
/// - `set_playing(true)`: `Paused -> Playing`. Elapsed time carries over.
/// - `set_playing(false)`: `Playing -> Paused`, cancelling the pending tick.
/// - a tick reaching the scene duration: `Playing -> Completed`, firing `on_complete` once.
///
/// A missing or failing surface never interrupts scheduling; failures are logged.
pub struct ScenePlayer<C: FrameClock, S: Surface> {
    clock: C,
    surface: Option<S>,
    scene: Option<Arc<Scene>>,
    phase: PlaybackPhase,
    playing_requested: bool,
    elapsed_ms: f64,
    // Timestamp that maps to elapsed 0; unset until the first tick after playback starts.
    anchor_ms: Option<f64>,
    pending: Option<TickId>,
    progress_percent: f64,
    on_complete: Option<CompleteFn>,
}

impl<C: FrameClock, S: Surface> ScenePlayer<C, S> {
    pub fn new(clock: C, surface: S) -> Self {
        Self::with_surface(clock, Some(surface))
    }

    /// Player with no drawing surface; it keeps time and signals completion but draws nothing.
    pub fn without_surface(clock: C) -> Self {
        Self::with_surface(clock, None)
    }

    pub fn with_surface(clock: C, surface: Option<S>) -> Self {
        Self {
            clock,
            surface,
            scene: None,
            phase: PlaybackPhase::Idle,
            playing_requested: false,
            elapsed_ms: 0.0,
            anchor_ms: None,
            pending: None,
            progress_percent: 0.0,
            on_complete: None,
        }
    }

    /// Register the completion callback, replacing any previous one.
    ///
    /// The callback cannot reach back into the player; hosts that need to react by loading the
    /// next scene should act on [`TickOutcome::Completed`] instead.
    pub fn on_complete(&mut self, f: impl FnMut(&Scene) + 'static) {
        self.on_complete = Some(Box::new(f));
    }

    pub fn load_scene(&mut self, scene: impl Into<Arc<Scene>>) {
        let scene = scene.into();
        self.cancel_pending();
        tracing::debug!(
            title = %scene.title,
            duration_s = scene.duration_seconds,
            elements = scene.elements.len(),
            playing = self.playing_requested,
            "loading scene"
        );

        self.elapsed_ms = 0.0;
        self.anchor_ms = None;
        self.progress_percent = 0.0;
        self.scene = Some(Arc::clone(&scene));
        self.blank_surface();

        if self.playing_requested {
            self.phase = PlaybackPhase::Playing;
            self.schedule();
        } else {
            self.phase = PlaybackPhase::Paused;
            self.paint(&Evaluator::eval_rest_frame(&scene));
        }
    }

    /// Reload the current scene from the start. No-op when idle.
    pub fn replay(&mut self) {
        if let Some(scene) = self.scene.clone() {
            self.load_scene(scene);
        }
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing {
            self.playing_requested = true;
            if self.phase == PlaybackPhase::Paused {
                tracing::debug!(elapsed_ms = self.elapsed_ms, "playback resumed");
                self.phase = PlaybackPhase::Playing;
                self.anchor_ms = None;
                self.schedule();
            }
        } else {
            self.playing_requested = false;
            if self.phase == PlaybackPhase::Playing {
                tracing::debug!(elapsed_ms = self.elapsed_ms, "playback paused");
                self.cancel_pending();
                self.anchor_ms = None;
                self.phase = PlaybackPhase::Paused;
            }
        }
    }

    /// Deliver a host frame tick. Only the currently pending handle is honoured.
    pub fn tick(&mut self, id: TickId, timestamp_ms: f64) -> TickOutcome {
        if self.pending != Some(id) {
            tracing::trace!(?id, "ignoring stale tick");
            return TickOutcome::Stale;
        }
        self.pending = None;

        let Some(scene) = self.scene.clone() else {
            return TickOutcome::Stale;
        };
        if self.phase != PlaybackPhase::Playing {
            return TickOutcome::Stale;
        }

        let anchor = *self
            .anchor_ms
            .get_or_insert(timestamp_ms - self.elapsed_ms);
        let elapsed_ms = (timestamp_ms - anchor).max(self.elapsed_ms);
        self.elapsed_ms = elapsed_ms;

        let frame = Evaluator::eval_frame(&scene, elapsed_ms);
        self.progress_percent = frame.progress_percent;
        self.paint(&frame);

        if elapsed_ms < scene.duration_ms() {
            self.schedule();
            return TickOutcome::Continue {
                elapsed_ms,
                progress_percent: self.progress_percent,
            };
        }

        self.phase = PlaybackPhase::Completed;
        tracing::debug!(title = %scene.title, elapsed_ms, "scene complete");
        if let Some(cb) = self.on_complete.as_mut() {
            cb(&scene);
        }
        TickOutcome::Completed { elapsed_ms }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Whether the host currently asks for playback (independent of the phase).
    pub fn is_playing_requested(&self) -> bool {
        self.playing_requested
    }

    pub fn scene(&self) -> Option<&Arc<Scene>> {
        self.scene.as_ref()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Scene progress for UI feedback, `0..=100`.
    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn pending_tick(&self) -> Option<TickId> {
        self.pending
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Swap in a surface, returning the previous one. Takes effect from the next drawn frame.
    pub fn attach_surface(&mut self, surface: S) -> Option<S> {
        self.surface.replace(surface)
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    fn schedule(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.clock.request_tick());
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.clock.cancel_tick(id);
        }
    }

    fn blank_surface(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Err(e) = blank(surface) {
            tracing::warn!(error = %e, "surface failed to clear");
        }
    }

    fn paint(&mut self, frame: &EvaluatedFrame) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Err(e) = paint_frame(surface, frame) {
            tracing::warn!(error = %e, elapsed_ms = frame.elapsed_ms, "surface failed to draw frame");
        }
    }
}

impl<C: FrameClock, S: Surface> Drop for ScenePlayer<C, S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/scene_player.rs"]
mod tests;
