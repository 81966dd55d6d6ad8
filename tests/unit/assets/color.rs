use super::*;
use serde_json::json;

#[test]
fn parses_all_hex_lengths() {
    assert_eq!(Color::parse("#000").unwrap(), Color::BLACK);
    assert_eq!(Color::parse("#fff8").unwrap(), Color::rgba(255, 255, 255, 136));
    assert_eq!(Color::parse("#FDB813").unwrap(), Color::rgb(0xfd, 0xb8, 0x13));
    assert_eq!(Color::parse("22c55e80").unwrap(), Color::rgba(0x22, 0xc5, 0x5e, 0x80));
}

#[test]
fn parses_css_names_case_insensitively() {
    assert_eq!(Color::parse("Red").unwrap(), Color::rgb(255, 0, 0));
    assert_eq!(Color::parse(" grey ").unwrap(), Color::rgb(128, 128, 128));
}

#[test]
fn garbage_falls_back_to_black() {
    assert!(Color::parse("#12").is_err());
    assert!(Color::parse("#gggggg").is_err());
    assert!(Color::parse("é€").is_err());
    assert_eq!(Color::parse_or_black("not a color"), Color::BLACK);
    assert_eq!(Color::parse_or_black(""), Color::BLACK);
}

#[test]
fn hex_output_omits_opaque_alpha() {
    assert_eq!(Color::rgb(30, 64, 175).to_hex(), "#1e40af");
    assert_eq!(Color::rgba(30, 64, 175, 0).to_hex(), "#1e40af00");
}

#[test]
fn serde_accepts_strings_and_arrays() {
    let c: Color = serde_json::from_value(json!("#1e40af")).unwrap();
    assert_eq!(c, Color::rgb(30, 64, 175));

    let c: Color = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 4));

    assert!(serde_json::from_value::<Color>(json!([1, 2])).is_err());
    assert_eq!(serde_json::to_value(Color::WHITE).unwrap(), json!("#ffffff"));
}
