use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn with_len_saturates_and_counts() {
    let r = FrameRange::with_len(FrameIndex(10), 5);
    assert_eq!(r.end, FrameIndex(15));
    assert_eq!(r.len_frames(), 5);
    assert!(FrameRange::with_len(FrameIndex(3), 0).is_empty());
    assert_eq!(FrameRange::with_len(FrameIndex(u64::MAX), 4).end, FrameIndex(u64::MAX));
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30000, 1001).unwrap().as_f64(), 30000.0 / 1001.0);
}

#[test]
fn fps_round_is_exact_for_whole_seconds() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(4.0), 120);
    assert_eq!(fps.secs_to_frames_round(0.0), 0);
    assert_eq!(fps.secs_to_frames_round(1.0 / 3.0), 10);
}

#[test]
fn canvas_unit_matches_frame_height() {
    let c = Canvas {
        width: 1280,
        height: 720,
    };
    assert_eq!(c.unit_px(), 90.0);
    assert_eq!(c.center_x(), 640.0);
}
