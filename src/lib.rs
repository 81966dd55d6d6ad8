//! Chalkline plays lesson storyboards as a hand-drawn whiteboard.
//!
//! Each scene carries a list of drawing elements (text, rectangles, circles, lines) that are
//! revealed over one second after their individual delay. The public API is player-oriented:
//!
//! - Load a [`Storyboard`] (or build [`Scene`]s directly)
//! - Create a [`ScenePlayer`] over a [`FrameClock`] and a [`Surface`]
//! - Deliver host ticks, or run headless with [`drive_scene`] / [`drive_storyboard`]
#![forbid(unsafe_code)]

pub mod assets;
pub mod eval;
pub mod foundation;
pub mod player;
pub mod render;
pub mod scene;

pub use crate::assets::color::Color;
pub use crate::eval::frame::{DrawCommand, EvaluatedFrame, Evaluator, RevealedElement};
pub use crate::foundation::core::{
    BOARD_HEIGHT, BOARD_WIDTH, Canvas, Fps, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{ChalkError, ChalkResult};
pub use crate::player::clock::{FrameClock, ManualClock, TickId};
pub use crate::player::driver::{DriveStats, DrivenFrame, drive_scene, drive_storyboard};
pub use crate::player::scene_player::{PlaybackPhase, ScenePlayer, TickOutcome};
pub use crate::player::storyboard_player::{StoryboardEvent, StoryboardOpts, StoryboardPlayer};
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::recording::{RecordingSurface, SurfaceEvent};
pub use crate::render::style::BoardStyle;
pub use crate::render::surface::Surface;
pub use crate::scene::model::{DrawingElement, ElementKind, REVEAL_WINDOW_MS, Scene};
pub use crate::scene::storyboard::{RevealCutoff, Storyboard};
