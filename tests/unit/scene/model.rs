use super::*;
use serde_json::json;

#[test]
fn parses_generator_wire_format() {
    let scene: Scene = serde_json::from_value(json!({
        "sceneNumber": 1,
        "title": "Introduction",
        "visualDescription": "A bright sun shining on a green leaf.",
        "narrationScript": "Hello students!",
        "duration": 10,
        "elements": [
            { "type": "circle", "x": 100, "y": 100, "width": 80, "height": 80, "color": "#FDB813", "animationDelay": 0 },
            { "type": "text", "content": "Sunlight", "x": 200, "y": 120, "color": "#000", "animationDelay": 1000 }
        ]
    }))
    .unwrap();

    assert_eq!(scene.scene_number, Some(1));
    assert_eq!(scene.duration_ms(), 10_000.0);
    assert_eq!(scene.elements.len(), 2);
    assert_eq!(scene.elements[0].kind, ElementKind::Circle);
    assert_eq!(scene.elements[0].width, Some(80.0));
    assert_eq!(scene.elements[1].content.as_deref(), Some("Sunlight"));
    assert_eq!(scene.elements[1].reveal_delay_ms, 1000.0);
}

#[test]
fn accepts_descriptive_aliases() {
    let scene: Scene = serde_json::from_value(json!({
        "title": "t",
        "durationSeconds": 2.5,
        "elements": [{ "kind": "line", "x": 0, "y": 0, "color": "red", "revealDelayMs": 250 }]
    }))
    .unwrap();
    assert_eq!(scene.duration_seconds, 2.5);
    assert_eq!(scene.elements[0].kind, ElementKind::Line);
    assert_eq!(scene.elements[0].reveal_delay_ms, 250.0);
}

#[test]
fn unknown_kind_is_tolerated() {
    let el: DrawingElement =
        serde_json::from_value(json!({ "type": "arrow", "x": 1, "y": 2, "color": "#000" })).unwrap();
    assert_eq!(el.kind, ElementKind::Unknown);
    assert_eq!(el.resolved_size(), None);
}

#[test]
fn missing_sizes_use_per_kind_defaults() {
    assert_eq!(
        DrawingElement::rectangle(0.0, 0.0, "#000").resolved_size(),
        Some((100.0, 50.0))
    );
    assert_eq!(
        DrawingElement::circle(0.0, 0.0, "#000").resolved_size(),
        Some((50.0, 50.0))
    );
    assert_eq!(
        DrawingElement::line(0.0, 0.0, "#000").resolved_size(),
        Some((100.0, 0.0))
    );
    // Circles take their diameter from width only.
    assert_eq!(
        DrawingElement::circle(0.0, 0.0, "#000")
            .with_size(80.0, 10.0)
            .resolved_size(),
        Some((80.0, 80.0))
    );
    assert_eq!(DrawingElement::text("hi", 0.0, 0.0, "#000").resolved_size(), None);
}

#[test]
fn zero_sizes_fall_back_to_defaults() {
    assert_eq!(
        DrawingElement::rectangle(0.0, 0.0, "#000")
            .with_size(0.0, 0.0)
            .resolved_size(),
        Some((100.0, 50.0))
    );
    assert_eq!(
        DrawingElement::rectangle(0.0, 0.0, "#000")
            .with_size(30.0, 0.0)
            .resolved_size(),
        Some((30.0, 50.0))
    );
    assert_eq!(
        DrawingElement::circle(0.0, 0.0, "#000")
            .with_width(0.0)
            .resolved_size(),
        Some((50.0, 50.0))
    );
    assert_eq!(
        DrawingElement::line(0.0, 0.0, "#000")
            .with_width(f64::NAN)
            .resolved_size(),
        Some((100.0, 0.0))
    );

    let el: DrawingElement = serde_json::from_value(json!({
        "type": "rectangle", "x": 1, "y": 2, "width": 0, "height": 0, "color": "#000"
    }))
    .unwrap();
    assert_eq!(el.resolved_size(), Some((100.0, 50.0)));
}

#[test]
fn progress_percent_is_clamped() {
    let scene = Scene::new("s", 2.0, vec![]);
    assert_eq!(scene.progress_percent(0.0), 0.0);
    assert_eq!(scene.progress_percent(500.0), 25.0);
    assert_eq!(scene.progress_percent(2500.0), 100.0);
    assert_eq!(scene.progress_percent(-10.0), 0.0);

    let degenerate = Scene::new("s", 0.0, vec![]);
    assert_eq!(degenerate.progress_percent(0.0), 100.0);
}

#[test]
fn reveal_window_ignores_negative_delay() {
    let el = DrawingElement::rectangle(0.0, 0.0, "#000").with_delay_ms(-300.0);
    assert_eq!(el.reveal_start_ms(), 0.0);
    assert_eq!(el.reveal_end_ms(), REVEAL_WINDOW_MS);
}
