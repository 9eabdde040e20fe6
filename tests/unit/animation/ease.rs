use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::Smooth,
];

#[test]
fn endpoints_are_fixed() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-9, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-9, "{e:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::Linear.apply(-3.0), 0.0);
    assert_eq!(Ease::Linear.apply(7.0), 1.0);
}

#[test]
fn smooth_is_symmetric_and_monotonic() {
    assert!((Ease::Smooth.apply(0.5) - 0.5).abs() < 1e-9);
    let a = Ease::Smooth.apply(0.2);
    let b = Ease::Smooth.apply(0.8);
    assert!((a + b - 1.0).abs() < 1e-9);
    let mut prev = 0.0;
    for i in 0..=50 {
        let v = Ease::Smooth.apply(f64::from(i) / 50.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn serde_names_are_snake_case() {
    assert_eq!(
        serde_json::to_string(&Ease::InOutCubic).unwrap(),
        "\"in_out_cubic\""
    );
    let e: Ease = serde_json::from_str("\"linear\"").unwrap();
    assert_eq!(e, Ease::Linear);
}
