use super::*;
use crate::foundation::core::FrameIndex;

fn list(width: u32, height: u32, ops: Vec<DrawOp>) -> DrawList {
    DrawList {
        frame: FrameIndex(0),
        canvas: Canvas { width, height },
        background: [10, 20, 30, 255],
        ops,
    }
}

fn hline(opacity: f32) -> DrawOp {
    DrawOp::Stroke {
        points: vec![Point::new(2.0, 8.0), Point::new(14.0, 8.0)],
        width_px: 4.0,
        color: [255, 255, 0, 255],
        opacity,
    }
}

fn close(a: [u8; 4], b: [u8; 4], tol: u8) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= tol)
}

#[test]
fn background_fills_every_pixel() {
    let mut be = CpuBackend::new(RenderSettings::default()).unwrap();
    let f = be.render(&list(8, 6, vec![])).unwrap();
    assert_eq!((f.width, f.height), (8, 6));
    assert!(f.premultiplied);
    for y in 0..6 {
        for x in 0..8 {
            assert!(close(f.pixel(x, y).unwrap(), [10, 20, 30, 255], 1));
        }
    }
}

#[test]
fn stroke_covers_its_band_only() {
    let mut be = CpuBackend::new(RenderSettings::default()).unwrap();
    let f = be.render(&list(16, 16, vec![hline(1.0)])).unwrap();
    assert!(close(f.pixel(8, 8).unwrap(), [255, 255, 0, 255], 1));
    assert!(close(f.pixel(8, 1).unwrap(), [10, 20, 30, 255], 1));
    assert!(close(f.pixel(8, 14).unwrap(), [10, 20, 30, 255], 1));
}

#[test]
fn stroke_opacity_blends_with_background() {
    let mut be = CpuBackend::new(RenderSettings::default()).unwrap();
    let f = be.render(&list(16, 16, vec![hline(0.5)])).unwrap();
    let [r, g, b, a] = f.pixel(8, 8).unwrap();
    assert_eq!(a, 255);
    assert!(r.abs_diff(133) <= 3, "r={r}");
    assert!(g.abs_diff(138) <= 3, "g={g}");
    assert!(b.abs_diff(15) <= 3, "b={b}");
}

#[test]
fn text_without_font_is_skipped() {
    let mut be = CpuBackend::new(RenderSettings::default()).unwrap();
    let op = DrawOp::Text {
        text: "0.80".to_owned(),
        size_px: 12.0,
        rect: Rect::new(0.0, 0.0, 16.0, 16.0),
        color: [255, 255, 255, 255],
        opacity: 1.0,
        reveal: 1.0,
    };
    let with_text = be.render(&list(16, 16, vec![op])).unwrap();
    let without = be.render(&list(16, 16, vec![])).unwrap();
    assert_eq!(with_text, without);
}

#[test]
fn context_is_rebuilt_when_canvas_changes() {
    let mut be = CpuBackend::new(RenderSettings::default()).unwrap();
    let a = be.render(&list(8, 8, vec![])).unwrap();
    let b = be.render(&list(16, 4, vec![])).unwrap();
    assert_eq!(a.data.len(), 8 * 8 * 4);
    assert_eq!((b.width, b.height), (16, 4));
    assert_eq!(b.data.len(), 16 * 4 * 4);
}

#[test]
fn oversized_canvas_is_rejected() {
    let mut be = CpuBackend::new(RenderSettings::default()).unwrap();
    let err = be.render(&list(70_000, 2, vec![])).unwrap_err();
    assert!(err.to_string().contains("exceeds u16"));
}

#[test]
fn invalid_font_bytes_fail_construction() {
    let settings = RenderSettings {
        font_bytes: Some(Arc::new(vec![0u8; 16])),
    };
    assert!(CpuBackend::new(settings).is_err());
}

#[test]
fn exposes_worker_settings() {
    let be = CpuBackend::new(RenderSettings::default()).unwrap();
    let s = be.worker_render_settings().unwrap();
    assert!(s.font_bytes.is_none());
}
