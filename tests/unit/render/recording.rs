use super::*;
use crate::assets::color::Color;
use crate::foundation::core::Point;

fn line() -> DrawCommand {
    DrawCommand::Line {
        element: 0,
        from: Point::new(0.0, 0.0),
        to: Point::new(10.0, 0.0),
        color: Color::BLACK,
    }
}

#[test]
fn records_calls_in_order() {
    let mut s = RecordingSurface::new();
    s.clear().unwrap();
    s.draw_backdrop().unwrap();
    s.draw(&line()).unwrap();
    s.present().unwrap();

    assert_eq!(
        s.events(),
        &[
            SurfaceEvent::Clear,
            SurfaceEvent::Backdrop,
            SurfaceEvent::Draw(line()),
            SurfaceEvent::Present,
        ]
    );
    assert_eq!(s.presented_frames(), 1);
    assert_eq!(s.draws().count(), 1);
}

#[test]
fn visible_only_counts_since_last_clear() {
    let mut s = RecordingSurface::new();
    s.draw(&line()).unwrap();
    s.clear().unwrap();
    assert!(s.visible().is_empty());
    s.draw(&line()).unwrap();
    assert_eq!(s.visible().len(), 1);
    assert_eq!(s.take_events().len(), 3);
    assert!(s.events().is_empty());
}

#[test]
fn failing_surface_errors_and_records_nothing() {
    let mut s = RecordingSurface::failing();
    assert!(s.clear().is_err());
    assert!(s.present().is_err());
    assert!(s.events().is_empty());
    assert_eq!(s.presented_frames(), 0);
}
