use super::*;

#[test]
fn explicit_missing_font_is_an_error() {
    let missing = std::env::temp_dir().join("covshrink_definitely_missing_font.ttf");
    assert!(resolve_font(Some(&missing)).is_err());
}

#[test]
fn explicit_existing_file_is_returned_verbatim() {
    let path = std::env::temp_dir().join(format!("covshrink_font_{}.bin", std::process::id()));
    std::fs::write(&path, b"not really a font").unwrap();
    assert_eq!(resolve_font(Some(&path)).unwrap(), Some(path.clone()));
    assert_eq!(load_font_bytes(&path).unwrap().len(), 17);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn garbage_bytes_register_no_family() {
    assert!(TextLayoutEngine::new(b"definitely not a font").is_err());
}

#[test]
fn system_font_lays_out_when_available() {
    let Some(path) = resolve_font(None).unwrap() else {
        return;
    };
    let bytes = load_font_bytes(&path).unwrap();
    let mut engine = TextLayoutEngine::new(&bytes).unwrap();
    let layout = engine
        .layout_line("λ = 0.40", 32.0, TextBrushRgba8::default())
        .unwrap();
    assert!(layout.width() > 0.0);
    assert!(engine
        .layout_line("x", 0.0, TextBrushRgba8::default())
        .is_err());
}
