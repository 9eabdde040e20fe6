use crate::compile::plan::{DrawList, DrawOp};
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// Stable per-frame fingerprint used by static-frame elision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    /// High 64 bits of the xxh3-128 digest.
    pub hi: u64,
    /// Low 64 bits of the xxh3-128 digest.
    pub lo: u64,
}

/// Fingerprint everything that affects pixels in a draw list.
///
/// The frame index is not hashed, so a still frame elides across time.
pub fn fingerprint_draw_list(list: &DrawList) -> FrameFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(list.canvas.width);
    h.write_u32(list.canvas.height);
    h.write_bytes(&list.background);
    h.write_u64(list.ops.len() as u64);
    for op in &list.ops {
        match op {
            DrawOp::Text {
                text,
                size_px,
                rect,
                color,
                opacity,
                reveal,
            } => {
                h.write_u8(1);
                h.write_str(text);
                h.write_f32(*size_px);
                for v in [rect.x0, rect.y0, rect.x1, rect.y1] {
                    h.write_f64(v);
                }
                h.write_bytes(color);
                h.write_f32(*opacity);
                h.write_f32(*reveal);
            }
            DrawOp::Stroke {
                points,
                width_px,
                color,
                opacity,
            } => {
                h.write_u8(2);
                h.write_u64(points.len() as u64);
                for p in points {
                    h.write_f64(p.x);
                    h.write_f64(p.y);
                }
                h.write_f64(*width_px);
                h.write_bytes(color);
                h.write_f32(*opacity);
            }
        }
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
