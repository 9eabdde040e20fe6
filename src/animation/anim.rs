use crate::{
    animation::ease::Ease,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ShrinkError, ShrinkResult},
};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Keyframed animation, eased between adjacent keys.
pub struct Keyframes<T> {
    /// Keyframes sorted by `frame`.
    pub keys: Vec<Keyframe<T>>,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Sample at an absolute timeline frame. Values hold before the first and after the last key.
    pub fn sample(&self, frame: FrameIndex) -> ShrinkResult<T> {
        let Some(last) = self.keys.last() else {
            return Err(ShrinkError::animation("Keyframes has no keys"));
        };

        let f = frame.0;
        let idx = self.keys.partition_point(|k| k.frame.0 <= f);

        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(last.value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame.0.saturating_sub(a.frame.0);
        if denom == 0 {
            return Ok(a.value.clone());
        }

        let t = ((f - a.frame.0) as f64) / (denom as f64);
        Ok(T::lerp(&a.value, &b.value, a.ease.apply(t)))
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One keyframe in a keyframed animation.
pub struct Keyframe<T> {
    /// Absolute frame index for this key.
    pub frame: FrameIndex,
    /// Value at `frame`.
    pub value: T,
    /// Easing function applied toward the next keyframe.
    pub ease: Ease,
}

/// A scalar whose value is scripted over time with `animate_to` calls.
///
/// Between scripted segments the last value holds, so the tracker reads like a sequence of
/// "set value over this range" statements.
#[derive(Clone, Debug)]
pub struct ValueTracker {
    track: Keyframes<f64>,
}

impl ValueTracker {
    /// Start at `initial` from frame 0.
    pub fn new(initial: f64) -> Self {
        Self {
            track: Keyframes {
                keys: vec![Keyframe {
                    frame: FrameIndex(0),
                    value: initial,
                    ease: Ease::Linear,
                }],
            },
        }
    }

    /// Value after all scripted segments.
    pub fn final_value(&self) -> f64 {
        self.track.keys.last().map(|k| k.value).unwrap_or(0.0)
    }

    /// Animate from the current value to `value` across `range` using `ease`.
    ///
    /// Segments must be appended in timeline order. An empty range is a jump cut.
    pub fn animate_to(&mut self, value: f64, range: FrameRange, ease: Ease) -> ShrinkResult<()> {
        let Some(last) = self.track.keys.last() else {
            return Err(ShrinkError::animation("value tracker has no keys"));
        };
        if range.start.0 < last.frame.0 {
            return Err(ShrinkError::animation(format!(
                "value tracker segment at frame {} starts before frame {}",
                range.start.0, last.frame.0
            )));
        }
        let from = last.value;
        self.track.keys.push(Keyframe {
            frame: range.start,
            value: from,
            ease,
        });
        self.track.keys.push(Keyframe {
            frame: range.end,
            value,
            ease: Ease::Linear,
        });
        Ok(())
    }

    /// Value at `frame`.
    pub fn get_value(&self, frame: FrameIndex) -> ShrinkResult<f64> {
        self.track.sample(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
