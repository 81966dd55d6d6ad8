use super::*;

#[test]
fn board_canvas_is_800_by_450() {
    assert_eq!(Canvas::BOARD.width, 800);
    assert_eq!(Canvas::BOARD.height, 450);
    assert_eq!(Canvas::default(), Canvas::BOARD);
    assert_eq!(Canvas::BOARD.rect(), Rect::new(0.0, 0.0, 800.0, 450.0));
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_frame_timestamps() {
    let fps = Fps::new(50, 1).unwrap();
    assert!((fps.frame_duration_ms() - 20.0).abs() < 1e-9);
    assert!((fps.frame_timestamp_ms(3) - 60.0).abs() < 1e-9);

    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert!((ntsc.as_f64() - 29.97).abs() < 0.01);
}

#[test]
fn premul_rounds_and_keeps_opaque() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 255);
    assert_eq!(p.to_array(), [255, 128, 0, 255]);

    let half = Rgba8Premul::from_straight_rgba(200, 100, 50, 128);
    assert_eq!(half.a, 128);
    assert_eq!(half.r, ((200u16 * 128 + 127) / 255) as u8);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}
