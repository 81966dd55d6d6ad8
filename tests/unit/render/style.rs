use super::*;
use serde_json::json;

#[test]
fn defaults_match_the_whiteboard_look() {
    let s = BoardStyle::default();
    assert_eq!(s.background, Color::WHITE);
    assert_eq!(s.grid_color.to_hex(), "#f1f5f9");
    assert_eq!(s.grid_spacing, 40.0);
    assert_eq!(s.stroke_width, 3.0);
    assert_eq!(s.font_size, 24.0);
    assert_eq!(s.font_families[0], "Comic Sans MS");
    assert!(s.validate().is_ok());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let s: BoardStyle = serde_json::from_value(json!({
        "background": "#0f172a",
        "stroke_width": 5
    }))
    .unwrap();
    assert_eq!(s.background, Color::rgb(0x0f, 0x17, 0x2a));
    assert_eq!(s.stroke_width, 5.0);
    assert_eq!(s.grid_spacing, 40.0);
}

#[test]
fn validate_rejects_nonsense() {
    let mut s = BoardStyle::default();
    s.font_size = 0.0;
    assert!(s.validate().is_err());

    let mut s = BoardStyle::default();
    s.grid_spacing = -1.0;
    assert!(s.validate().is_err());
}

#[test]
fn grid_lines_cover_the_board_from_zero() {
    let (xs, ys) = BoardStyle::default().grid_lines(800.0, 450.0);
    assert_eq!(xs.len(), 20);
    assert_eq!(xs[0], 0.0);
    assert_eq!(*xs.last().unwrap(), 760.0);
    assert_eq!(ys.len(), 12);
    assert_eq!(*ys.last().unwrap(), 440.0);

    let off = BoardStyle {
        grid_spacing: 0.0,
        ..BoardStyle::default()
    };
    let (xs, ys) = off.grid_lines(800.0, 450.0);
    assert!(xs.is_empty() && ys.is_empty());
}

#[test]
fn sub_pixel_grid_spacing_is_rejected_and_not_drawn() {
    let tiny = BoardStyle {
        grid_spacing: 1e-9,
        ..BoardStyle::default()
    };
    assert!(tiny.validate().is_err());
    let (xs, ys) = tiny.grid_lines(800.0, 450.0);
    assert!(xs.is_empty() && ys.is_empty());

    let one = BoardStyle {
        grid_spacing: 1.0,
        ..BoardStyle::default()
    };
    assert!(one.validate().is_ok());
    assert_eq!(one.grid_lines(800.0, 450.0).0.len(), 800);
}
