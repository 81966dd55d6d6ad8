use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::eval::frame::DrawCommand;
use crate::player::clock::ManualClock;
use crate::render::recording::{RecordingSurface, SurfaceEvent};
use crate::scene::model::DrawingElement;

type Player = ScenePlayer<ManualClock, RecordingSurface>;

fn player() -> Player {
    ScenePlayer::new(ManualClock::new(), RecordingSurface::new())
}

fn scene(duration_s: f64) -> Scene {
    Scene::new(
        "s",
        duration_s,
        vec![
            DrawingElement::text("Hello", 10.0, 30.0, "#000"),
            DrawingElement::rectangle(100.0, 100.0, "#22c55e").with_delay_ms(2000.0),
        ],
    )
}

/// Fire the clock at `ts`, delivering the one scheduled tick.
fn step(p: &mut Player, ts: f64) -> TickOutcome {
    let ids = p.clock_mut().take_scheduled();
    assert_eq!(ids, p.pending_tick().into_iter().collect::<Vec<_>>());
    let id = ids.first().copied().expect("a tick should be pending");
    p.tick(id, ts)
}

#[test]
fn starts_idle_and_ignores_play_without_scene() {
    let mut p = player();
    assert_eq!(p.phase(), PlaybackPhase::Idle);
    p.set_playing(true);
    assert_eq!(p.phase(), PlaybackPhase::Idle);
    assert!(p.pending_tick().is_none());
    assert!(p.is_playing_requested());
}

#[test]
fn paused_load_draws_the_rest_frame() {
    let mut p = player();
    p.load_scene(scene(5.0));
    assert_eq!(p.phase(), PlaybackPhase::Paused);
    assert!(p.pending_tick().is_none());
    assert_eq!(p.progress_percent(), 0.0);

    let s = p.surface().unwrap();
    // Delayed rectangle is drawn in full even though no time has passed.
    let visible = s.visible();
    assert_eq!(visible.len(), 2);
    assert!(matches!(visible[1], DrawCommand::Rect { rect, .. } if rect.width() == 100.0));
    assert_eq!(s.events()[0], SurfaceEvent::Clear);
}

#[test]
fn load_while_playing_requested_starts_ticking_from_zero() {
    let mut p = player();
    p.set_playing(true);
    p.load_scene(scene(5.0));
    assert_eq!(p.phase(), PlaybackPhase::Playing);

    let out = step(&mut p, 1234.0);
    assert_eq!(
        out,
        TickOutcome::Continue {
            elapsed_ms: 0.0,
            progress_percent: 0.0
        }
    );
    // Nothing has passed its delay at elapsed 0.
    assert!(p.surface().unwrap().visible().is_empty());
}

#[test]
fn only_one_tick_is_ever_pending() {
    let mut p = player();
    p.load_scene(scene(5.0));
    p.set_playing(true);
    p.set_playing(true);
    assert_eq!(p.clock().scheduled().len(), 1);
    step(&mut p, 0.0);
    assert_eq!(p.clock().scheduled().len(), 1);
}

#[test]
fn completion_fires_once_at_first_tick_past_duration() {
    let fired = Rc::new(Cell::new(0u32));
    let at = Rc::new(Cell::new(f64::NAN));
    let mut p = player();
    {
        let fired = Rc::clone(&fired);
        p.on_complete(move |_| fired.set(fired.get() + 1));
    }
    p.load_scene(scene(2.0));
    p.set_playing(true);

    let mut ts = 0.0;
    while ts <= 2500.0 {
        if let Some(id) = p.pending_tick()
            && let TickOutcome::Completed { elapsed_ms } = p.tick(id, ts)
        {
            at.set(elapsed_ms);
        }
        ts += 16.0;
    }
    assert_eq!(fired.get(), 1);
    assert_eq!(at.get(), 2000.0);
    assert_eq!(p.phase(), PlaybackPhase::Completed);
    assert_eq!(p.progress_percent(), 100.0);
    assert!(p.pending_tick().is_none());
}

#[test]
fn pause_and_resume_preserve_elapsed_time() {
    let mut p = player();
    p.load_scene(scene(5.0));
    p.set_playing(true);
    step(&mut p, 10_000.0);
    step(&mut p, 10_500.0);
    assert_eq!(p.elapsed_ms(), 500.0);

    p.set_playing(false);
    assert_eq!(p.phase(), PlaybackPhase::Paused);
    assert!(p.pending_tick().is_none());
    assert!(p.clock().scheduled().is_empty());

    // A second of wall time passes with nothing scheduled.
    p.set_playing(true);
    let out = step(&mut p, 11_500.0);
    assert_eq!(
        out,
        TickOutcome::Continue {
            elapsed_ms: 500.0,
            progress_percent: 10.0
        }
    );
    step(&mut p, 11_600.0);
    assert_eq!(p.elapsed_ms(), 600.0);
}

#[test]
fn pausing_keeps_the_last_frame() {
    let mut p = player();
    p.load_scene(scene(5.0));
    p.set_playing(true);
    step(&mut p, 0.0);
    step(&mut p, 600.0);
    let before = p.surface().unwrap().events().len();
    p.set_playing(false);
    assert_eq!(p.surface().unwrap().events().len(), before);
    assert_eq!(p.surface().unwrap().visible().len(), 1);
}

#[test]
fn scene_switch_cancels_and_resets() {
    let mut p = player();
    p.load_scene(scene(5.0));
    p.set_playing(true);
    step(&mut p, 0.0);
    step(&mut p, 3000.0);
    assert!(p.progress_percent() > 0.0);
    let stale = p.pending_tick().unwrap();

    let next = Scene::new(
        "next",
        3.0,
        vec![DrawingElement::text("World", 0.0, 0.0, "#000")],
    );
    p.load_scene(next);
    assert_eq!(p.progress_percent(), 0.0);
    assert_eq!(p.elapsed_ms(), 0.0);
    assert!(!p.clock().is_scheduled(stale));

    let mark = p.surface().unwrap().events().len();
    assert_eq!(p.tick(stale, 3016.0), TickOutcome::Stale);
    assert_eq!(p.surface().unwrap().events().len(), mark);

    step(&mut p, 5000.0);
    step(&mut p, 5500.0);
    let s = p.surface().unwrap();
    for cmd in s.events()[mark..].iter().filter_map(|e| match e {
        SurfaceEvent::Draw(c) => Some(c),
        _ => None,
    }) {
        match cmd {
            DrawCommand::Text { text, .. } => assert!("World".starts_with(text.as_str())),
            other => panic!("old scene drew after switch: {other:?}"),
        }
    }
    assert!((p.progress_percent() - 500.0 / 30.0).abs() < 1e-9);
}

#[test]
fn completed_player_ignores_play_until_reloaded() {
    let mut p = player();
    p.load_scene(scene(0.5));
    p.set_playing(true);
    step(&mut p, 0.0);
    assert!(matches!(step(&mut p, 500.0), TickOutcome::Completed { .. }));

    p.set_playing(false);
    p.set_playing(true);
    assert_eq!(p.phase(), PlaybackPhase::Completed);
    assert!(p.pending_tick().is_none());

    p.replay();
    assert_eq!(p.phase(), PlaybackPhase::Playing);
    assert!(step(&mut p, 9000.0).drew());
}

#[test]
fn completion_frame_keeps_late_elements_mid_reveal() {
    let mut p = player();
    p.load_scene(Scene::new(
        "late",
        2.0,
        vec![DrawingElement::rectangle(0.0, 0.0, "#000").with_delay_ms(1500.0)],
    ));
    p.set_playing(true);
    step(&mut p, 0.0);
    step(&mut p, 1000.0);
    assert!(matches!(
        step(&mut p, 2000.0),
        TickOutcome::Completed { elapsed_ms } if elapsed_ms == 2000.0
    ));

    // No extra full-progress redraw: the last frame is the one at 2000ms.
    let s = p.surface().unwrap();
    assert_eq!(s.events().last(), Some(&SurfaceEvent::Present));
    let visible = s.visible();
    assert_eq!(visible.len(), 1);
    match visible[0] {
        DrawCommand::Rect { rect, .. } => {
            assert_eq!(rect.width(), 50.0);
            assert_eq!(rect.height(), 50.0);
        }
        other => panic!("expected rect, got {other:?}"),
    }
    assert_eq!(p.progress_percent(), 100.0);
}

#[test]
fn element_starting_at_scene_end_shows_on_an_overshooting_final_tick() {
    let mut p = player();
    p.load_scene(Scene::new(
        "edge",
        2.0,
        vec![DrawingElement::line(0.0, 0.0, "#000").with_delay_ms(2000.0)],
    ));
    p.set_playing(true);
    step(&mut p, 0.0);
    assert!(matches!(step(&mut p, 2016.0), TickOutcome::Completed { .. }));
    assert_eq!(p.surface().unwrap().visible().len(), 1);
}

#[test]
fn missing_surface_keeps_time() {
    let mut p: Player = ScenePlayer::without_surface(ManualClock::new());
    p.load_scene(scene(1.0));
    p.set_playing(true);
    step(&mut p, 0.0);
    assert!(matches!(step(&mut p, 1000.0), TickOutcome::Completed { .. }));
}

#[test]
fn failing_surface_does_not_stop_scheduling() {
    let mut p = ScenePlayer::new(ManualClock::new(), RecordingSurface::failing());
    p.load_scene(scene(1.0));
    p.set_playing(true);
    let id = p.pending_tick().unwrap();
    assert!(matches!(p.tick(id, 0.0), TickOutcome::Continue { .. }));
    assert!(p.pending_tick().is_some());
}

#[test]
fn surface_can_be_swapped() {
    let mut p = player();
    p.load_scene(scene(1.0));
    let old = p.attach_surface(RecordingSurface::new()).unwrap();
    assert!(!old.events().is_empty());
    assert!(p.surface().unwrap().events().is_empty());
    assert!(p.detach_surface().is_some());
    assert!(p.surface().is_none());
}

#[test]
fn non_positive_duration_completes_on_first_tick() {
    let mut p = player();
    p.load_scene(Scene::new("zero", 0.0, vec![]));
    p.set_playing(true);
    assert!(matches!(step(&mut p, 0.0), TickOutcome::Completed { .. }));
    assert_eq!(p.progress_percent(), 100.0);
}

#[test]
fn dropping_cancels_pending_tick() {
    let mut p = player();
    p.load_scene(scene(1.0));
    p.set_playing(true);
    assert!(p.pending_tick().is_some());
    drop(p);
}
