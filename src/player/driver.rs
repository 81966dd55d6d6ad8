//! Headless playback at a fixed frame rate.
//!
//! The driver stands in for a display: it delivers every tick a [`ManualClock`] has scheduled
//! at the timestamp of the next frame, and hands each drawn frame to a callback.

use std::sync::Arc;

use crate::foundation::core::Fps;
use crate::foundation::error::{ChalkError, ChalkResult};
use crate::player::clock::ManualClock;
use crate::player::scene_player::{ScenePlayer, TickOutcome};
use crate::player::storyboard_player::{StoryboardEvent, StoryboardPlayer};
use crate::render::surface::Surface;
use crate::scene::model::Scene;

/// One frame handed to the driver callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrivenFrame {
    /// Sequential output index, starting at 0.
    pub index: u64,
    pub timestamp_ms: f64,
    pub scene_index: usize,
    pub progress_percent: f64,
    /// `true` when nothing was redrawn and the surface still shows the previous frame.
    pub held: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveStats {
    pub frames: u64,
    pub ticks: u64,
    pub scenes_completed: usize,
    pub end_ms: f64,
}

/// Play `scene` to completion, calling `on_frame` after every drawn frame.
///
/// `on_frame` gets the player's surface, or `None` for a player without one.
#[tracing::instrument(level = "debug", skip_all, fields(fps = fps.as_f64()))]
pub fn drive_scene<S, F>(
    player: &mut ScenePlayer<ManualClock, S>,
    scene: impl Into<Arc<Scene>>,
    fps: Fps,
    mut on_frame: F,
) -> ChalkResult<DriveStats>
where
    S: Surface,
    F: FnMut(&DrivenFrame, Option<&S>) -> ChalkResult<()>,
{
    let scene = scene.into();
    let budget = frame_budget(scene.duration_ms(), 1, fps);

    player.set_playing(true);
    player.load_scene(scene);

    let mut stats = DriveStats::default();
    let mut frame_no = 0u64;
    loop {
        if frame_no > budget {
            player.set_playing(false);
            return Err(ChalkError::render(format!(
                "scene did not complete within {budget} frames"
            )));
        }
        let ts = fps.frame_timestamp_ms(frame_no);
        frame_no += 1;

        let ids = player.clock_mut().take_scheduled();
        if ids.is_empty() {
            break;
        }
        let mut done = false;
        for id in ids {
            stats.ticks += 1;
            let outcome = player.tick(id, ts);
            if !outcome.drew() {
                continue;
            }
            let frame = DrivenFrame {
                index: stats.frames,
                timestamp_ms: ts,
                scene_index: 0,
                progress_percent: player.progress_percent(),
                held: false,
            };
            on_frame(&frame, player.surface())?;
            stats.frames += 1;
            stats.end_ms = ts;
            if matches!(outcome, TickOutcome::Completed { .. }) {
                stats.scenes_completed += 1;
                done = true;
            }
        }
        if done {
            break;
        }
    }

    player.set_playing(false);
    tracing::debug!(frames = stats.frames, ticks = stats.ticks, "scene drive finished");
    Ok(stats)
}

/// Play a storyboard from its current scene to the end.
///
/// Frames inside the pause between scenes are emitted as `held` so the output keeps
/// wall-clock timing.
#[tracing::instrument(level = "debug", skip_all, fields(fps = fps.as_f64()))]
pub fn drive_storyboard<S, F>(
    board: &mut StoryboardPlayer<ManualClock, S>,
    fps: Fps,
    mut on_frame: F,
) -> ChalkResult<DriveStats>
where
    S: Surface,
    F: FnMut(&DrivenFrame, Option<&S>) -> ChalkResult<()>,
{
    let remaining = &board.storyboard().scenes()[board.current_index()..];
    let total_ms: f64 = remaining.iter().map(|s| s.duration_ms()).sum::<f64>()
        + board.opts().advance_delay_ms * remaining.len() as f64;
    let budget = frame_budget(total_ms, remaining.len(), fps);

    board.play();

    let mut stats = DriveStats::default();
    let mut frame_no = 0u64;
    loop {
        if frame_no > budget {
            board.pause();
            return Err(ChalkError::render(format!(
                "storyboard did not finish within {budget} frames"
            )));
        }
        let ts = fps.frame_timestamp_ms(frame_no);
        frame_no += 1;

        let ids = board.player_mut().clock_mut().take_scheduled();
        if ids.is_empty() {
            break;
        }
        let mut finished = false;
        for id in ids {
            stats.ticks += 1;
            let event = board.tick(id, ts);
            let (scene_index, held) = match event {
                StoryboardEvent::Stale | StoryboardEvent::Advanced { .. } => continue,
                StoryboardEvent::Waiting { scene_index } => (scene_index, true),
                StoryboardEvent::Frame { scene_index, .. } => (scene_index, false),
                StoryboardEvent::SceneCompleted { scene_index } => {
                    stats.scenes_completed += 1;
                    (scene_index, false)
                }
                StoryboardEvent::Finished { scene_index } => {
                    stats.scenes_completed += 1;
                    finished = true;
                    (scene_index, false)
                }
            };
            let frame = DrivenFrame {
                index: stats.frames,
                timestamp_ms: ts,
                scene_index,
                progress_percent: board.player().progress_percent(),
                held,
            };
            on_frame(&frame, board.player().surface())?;
            stats.frames += 1;
            stats.end_ms = ts;
        }
        if finished {
            break;
        }
    }

    tracing::debug!(
        frames = stats.frames,
        scenes = stats.scenes_completed,
        "storyboard drive finished"
    );
    Ok(stats)
}

// Frames needed to cover `total_ms`, with slack for the first tick of each scene and gap.
fn frame_budget(total_ms: f64, scenes: usize, fps: Fps) -> u64 {
    let frames = (total_ms / fps.frame_duration_ms()).ceil();
    let frames = if frames.is_finite() && frames > 0.0 {
        frames as u64
    } else {
        0
    };
    frames + 4 * scenes as u64 + 4
}

#[cfg(test)]
#[path = "../../tests/unit/player/driver.rs"]
mod tests;
