use crate::animation::anim::ValueTracker;
use crate::animation::ease::Ease;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::ShrinkResult;
use crate::scene::config::SceneConfig;
use crate::shrink::estimator::{format_matrix, shrink};

/// Frame ranges of each beat, contiguous and in playback order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Beats {
    /// Formula, label and matrix appear.
    pub intro: FrameRange,
    /// Hold before the sweep.
    pub pre_sweep_wait: FrameRange,
    /// λ moves from start to end.
    pub sweep: FrameRange,
    /// Hold on the final matrix.
    pub post_sweep_wait: FrameRange,
    /// Highlight rectangles and caption are drawn.
    pub highlight: FrameRange,
    /// Hold with highlights visible.
    pub highlight_hold: FrameRange,
    /// Every element fades out.
    pub fade_out: FrameRange,
    /// Empty frames before the end.
    pub tail: FrameRange,
}

impl Beats {
    fn from_config(cfg: &SceneConfig) -> Self {
        let mut cursor = FrameIndex(0);
        let mut next = |secs: f64| {
            let r = FrameRange::with_len(cursor, cfg.fps.secs_to_frames_round(secs));
            cursor = r.end;
            r
        };
        let b = &cfg.beats;
        Self {
            intro: next(b.intro_secs),
            pre_sweep_wait: next(b.pre_sweep_wait_secs),
            sweep: next(b.sweep_secs),
            post_sweep_wait: next(b.post_sweep_wait_secs),
            highlight: next(b.highlight_secs),
            highlight_hold: next(b.highlight_hold_secs),
            fade_out: next(b.fade_out_secs),
            tail: next(b.tail_secs),
        }
    }

    /// One past the last frame of the animation.
    pub fn end(&self) -> FrameIndex {
        self.tail.end
    }
}

/// Visibility of one scene element over time.
///
/// `opacity` drives fades; `reveal` drives Write/Create style progressive drawing.
#[derive(Clone, Debug)]
pub struct ElementTrack {
    opacity: ValueTracker,
    reveal: ValueTracker,
}

impl ElementTrack {
    /// Hidden element that is fully drawn once it becomes visible.
    fn faded() -> Self {
        Self {
            opacity: ValueTracker::new(0.0),
            reveal: ValueTracker::new(1.0),
        }
    }

    /// Hidden element that is drawn progressively by [`ElementTrack::write`].
    fn drawn() -> Self {
        Self {
            opacity: ValueTracker::new(0.0),
            reveal: ValueTracker::new(0.0),
        }
    }

    fn fade_in(&mut self, range: FrameRange, ease: Ease) -> ShrinkResult<()> {
        self.opacity.animate_to(1.0, range, ease)
    }

    fn write(&mut self, range: FrameRange, ease: Ease) -> ShrinkResult<()> {
        self.opacity
            .animate_to(1.0, FrameRange::with_len(range.start, 0), Ease::Linear)?;
        self.reveal.animate_to(1.0, range, ease)
    }

    fn fade_out(&mut self, range: FrameRange, ease: Ease) -> ShrinkResult<()> {
        self.opacity.animate_to(0.0, range, ease)
    }

    /// `(opacity, reveal)` at `frame`, both in `[0, 1]`.
    pub fn sample(&self, frame: FrameIndex) -> ShrinkResult<(f64, f64)> {
        Ok((
            self.opacity.get_value(frame)?.clamp(0.0, 1.0),
            self.reveal.get_value(frame)?.clamp(0.0, 1.0),
        ))
    }
}

/// The scripted animation: beat ranges, the coefficient tracker and one track per element.
#[derive(Clone, Debug)]
pub struct Timeline {
    config: SceneConfig,
    beats: Beats,
    lambda: ValueTracker,
    pub(crate) formula: ElementTrack,
    pub(crate) label: ElementTrack,
    pub(crate) matrix: ElementTrack,
    pub(crate) highlight: ElementTrack,
    pub(crate) caption: ElementTrack,
    final_entries: Vec<Vec<String>>,
}

impl Timeline {
    /// Validate `config` and script every element.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build(config: &SceneConfig) -> ShrinkResult<Self> {
        config.validate()?;
        if !config.sigma.is_symmetric(1e-12) {
            tracing::warn!("sigma is not symmetric; shrinkage still applies element-wise");
        }
        let beats = Beats::from_config(config);
        let ease = config.beats.reveal_ease;

        let mut lambda = ValueTracker::new(config.lambda_start);
        lambda.animate_to(config.lambda_end, beats.sweep, config.beats.sweep_ease)?;

        let mut formula = ElementTrack::drawn();
        formula.write(beats.intro, Ease::Linear)?;
        let mut label = ElementTrack::faded();
        label.fade_in(beats.intro, ease)?;
        let mut matrix = ElementTrack::faded();
        matrix.fade_in(beats.intro, ease)?;

        let mut highlight = ElementTrack::drawn();
        highlight.write(beats.highlight, ease)?;
        let mut caption = ElementTrack::drawn();
        caption.write(beats.highlight, Ease::Linear)?;

        for track in [
            &mut formula,
            &mut label,
            &mut matrix,
            &mut highlight,
            &mut caption,
        ] {
            track.fade_out(beats.fade_out, ease)?;
        }

        let final_entries = format_matrix(
            &shrink(&config.sigma, &config.target, lambda.final_value())?,
            config.precision,
        );

        tracing::debug!(
            frames = beats.end().0,
            sweep_start = beats.sweep.start.0,
            sweep_end = beats.sweep.end.0,
            "timeline built"
        );

        Ok(Self {
            config: config.clone(),
            beats,
            lambda,
            formula,
            label,
            matrix,
            highlight,
            caption,
            final_entries,
        })
    }

    /// Configuration the timeline was built from.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Frame ranges of every beat.
    pub fn beats(&self) -> &Beats {
        &self.beats
    }

    /// Total animation length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.beats.end().0
    }

    /// `[0, duration)`.
    pub fn full_range(&self) -> FrameRange {
        FrameRange::with_len(FrameIndex(0), self.duration_frames())
    }

    /// Shrinkage coefficient at `frame`.
    pub fn lambda_at(&self, frame: FrameIndex) -> ShrinkResult<f64> {
        Ok(self.lambda.get_value(frame)?.clamp(0.0, 1.0))
    }

    /// Formatted matrix after the sweep; highlight geometry is frozen to this state.
    pub fn final_entries(&self) -> &[Vec<String>] {
        &self.final_entries
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/timeline.rs"]
mod tests;
