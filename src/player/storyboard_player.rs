use serde::{Deserialize, Serialize};

use crate::foundation::error::{ChalkError, ChalkResult};
use crate::player::clock::{FrameClock, TickId};
use crate::player::scene_player::{ScenePlayer, TickOutcome};
use crate::render::surface::Surface;
use crate::scene::storyboard::Storyboard;

/// Sequencing options for [`StoryboardPlayer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryboardOpts {
    /// Pause between a scene completing and the next one starting.
    pub advance_delay_ms: f64,
}

impl Default for StoryboardOpts {
    fn default() -> Self {
        Self {
            advance_delay_ms: 500.0,
        }
    }
}

/// What a delivered tick did to the storyboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoryboardEvent {
    /// Superseded tick; nothing happened.
    Stale,
    /// Scene frame drawn.
    Frame {
        scene_index: usize,
        progress_percent: f64,
    },
    /// Scene finished; the next one starts after the advance delay.
    SceneCompleted { scene_index: usize },
    /// Inside the pause between scenes.
    Waiting { scene_index: usize },
    /// The next scene was loaded and is playing.
    Advanced { scene_index: usize },
    /// The last scene finished and playback stopped.
    Finished { scene_index: usize },
}

#[derive(Clone, Copy, Debug)]
struct PendingAdvance {
    tick: Option<TickId>,
    due_ms: Option<f64>,
}

/// Plays a [`Storyboard`] scene after scene on one [`ScenePlayer`].
pub struct StoryboardPlayer<C: FrameClock, S: Surface> {
    player: ScenePlayer<C, S>,
    storyboard: Storyboard,
    opts: StoryboardOpts,
    index: usize,
    advance: Option<PendingAdvance>,
    finished: bool,
}

impl<C: FrameClock, S: Surface> StoryboardPlayer<C, S> {
    /// Load the first scene onto `player`.
    pub fn new(
        mut player: ScenePlayer<C, S>,
        storyboard: Storyboard,
        opts: StoryboardOpts,
    ) -> ChalkResult<Self> {
        if !opts.advance_delay_ms.is_finite() || opts.advance_delay_ms < 0.0 {
            return Err(ChalkError::validation(
                "advance_delay_ms must be finite and >= 0",
            ));
        }
        let first = storyboard
            .scene(0)
            .cloned()
            .ok_or_else(|| ChalkError::validation("storyboard has no scenes"))?;
        player.load_scene(first);
        Ok(Self {
            player,
            storyboard,
            opts,
            index: 0,
            advance: None,
            finished: false,
        })
    }

    /// Start or resume. After the last scene has finished, starts over from the first.
    pub fn play(&mut self) {
        if self.finished {
            self.select_scene(0);
        }
        self.player.set_playing(true);
        if let Some(adv) = self.advance.as_mut()
            && adv.tick.is_none()
        {
            adv.due_ms = None;
            adv.tick = Some(self.player.clock_mut().request_tick());
        }
    }

    pub fn pause(&mut self) {
        self.player.set_playing(false);
        if let Some(adv) = self.advance.as_mut()
            && let Some(id) = adv.tick.take()
        {
            self.player.clock_mut().cancel_tick(id);
        }
    }

    /// Jump to scene `index`, keeping the current play/pause state.
    ///
    /// Out-of-range indices are ignored and return `false`.
    pub fn select_scene(&mut self, index: usize) -> bool {
        let Some(scene) = self.storyboard.scene(index).cloned() else {
            return false;
        };
        self.cancel_advance();
        self.index = index;
        self.finished = false;
        self.player.load_scene(scene);
        true
    }

    pub fn tick(&mut self, id: TickId, timestamp_ms: f64) -> StoryboardEvent {
        if self.advance.is_some_and(|a| a.tick == Some(id)) {
            return self.tick_advance(timestamp_ms);
        }

        match self.player.tick(id, timestamp_ms) {
            TickOutcome::Stale => StoryboardEvent::Stale,
            TickOutcome::Continue {
                progress_percent, ..
            } => StoryboardEvent::Frame {
                scene_index: self.index,
                progress_percent,
            },
            TickOutcome::Completed { .. } => {
                let scene_index = self.index;
                if scene_index + 1 < self.storyboard.len() {
                    self.advance = Some(PendingAdvance {
                        tick: Some(self.player.clock_mut().request_tick()),
                        due_ms: Some(timestamp_ms + self.opts.advance_delay_ms),
                    });
                    StoryboardEvent::SceneCompleted { scene_index }
                } else {
                    tracing::debug!(scenes = self.storyboard.len(), "storyboard finished");
                    self.player.set_playing(false);
                    self.finished = true;
                    StoryboardEvent::Finished { scene_index }
                }
            }
        }
    }

    fn tick_advance(&mut self, timestamp_ms: f64) -> StoryboardEvent {
        let delay = self.opts.advance_delay_ms;
        let Some(adv) = self.advance.as_mut() else {
            return StoryboardEvent::Stale;
        };
        adv.tick = None;
        let due = *adv.due_ms.get_or_insert(timestamp_ms + delay);
        if timestamp_ms < due {
            adv.tick = Some(self.player.clock_mut().request_tick());
            return StoryboardEvent::Waiting {
                scene_index: self.index,
            };
        }

        self.advance = None;
        let next = self.index + 1;
        if !self.select_scene(next) {
            return StoryboardEvent::Stale;
        }
        self.player.set_playing(true);
        tracing::debug!(scene_index = next, "advanced to next scene");
        StoryboardEvent::Advanced { scene_index: next }
    }

    fn cancel_advance(&mut self) {
        if let Some(id) = self.advance.take().and_then(|a| a.tick) {
            self.player.clock_mut().cancel_tick(id);
        }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// `true` while waiting out the pause between two scenes.
    pub fn is_advancing(&self) -> bool {
        self.advance.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing_requested()
    }

    /// Storyboard time: completed scene durations plus elapsed time in the current scene.
    pub fn elapsed_total_ms(&self) -> f64 {
        let before: f64 = self.storyboard.scenes()[..self.index]
            .iter()
            .map(|s| s.duration_ms())
            .sum();
        before + self.player.elapsed_ms()
    }

    pub fn storyboard(&self) -> &Storyboard {
        &self.storyboard
    }

    pub fn opts(&self) -> &StoryboardOpts {
        &self.opts
    }

    pub fn player(&self) -> &ScenePlayer<C, S> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut ScenePlayer<C, S> {
        &mut self.player
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/storyboard_player.rs"]
mod tests;
