use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ShrinkError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ShrinkError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        ShrinkError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        ShrinkError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ShrinkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: ShrinkError = serde_json::from_str::<u32>("not json").unwrap_err().into();
    assert!(matches!(err, ShrinkError::Serde(_)));
}
