use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: Fps { num: 30, den: 1 },
    }
}

fn frame(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: vec![0; (width * height * 4) as usize],
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_collects_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(3), &frame(2, 1)).unwrap();
    sink.push_frame(FrameIndex(4), &frame(2, 1)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg()));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![3, 4]);
    assert_eq!(sink.into_frames().len(), 2);
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(4), &frame(2, 1)).unwrap();
    let err = sink.push_frame(FrameIndex(4), &frame(2, 1)).unwrap_err();
    assert!(err.to_string().contains("out-of-order"));
}

#[test]
fn size_mismatch_is_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    assert!(sink.push_frame(FrameIndex(0), &frame(1, 2)).is_err());

    let mut short = frame(2, 1);
    short.data.pop();
    assert!(sink.push_frame(FrameIndex(0), &short).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &frame(2, 1)).is_err());
}

#[test]
fn begin_resets_previous_capture() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(2, 1)).unwrap();
    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
}
