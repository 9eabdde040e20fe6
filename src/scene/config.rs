use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::foundation::color::ColorDef;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ShrinkError, ShrinkResult};
use crate::shrink::estimator::check_lambda;
use crate::shrink::matrix::Matrix;

/// Largest supported display precision.
pub const MAX_PRECISION: usize = 6;

/// Everything needed to build a [`Timeline`](crate::Timeline).
///
/// Every field has a default, so a config file only lists what it overrides:
///
/// ```json
/// { "sigma": [[1.0, 0.5], [0.5, 1.0]], "beats": { "sweep_secs": 6.0 } }
/// ```
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Output size in pixels (both dimensions even, for yuv420p encoding).
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Sample covariance matrix.
    pub sigma: Matrix,
    /// Shrinkage target, same shape as `sigma`.
    pub target: Matrix,
    /// Coefficient shown before the sweep.
    pub lambda_start: f64,
    /// Coefficient reached at the end of the sweep.
    pub lambda_end: f64,
    /// Decimal places for matrix entries and the coefficient label.
    pub precision: usize,
    /// TrueType/OpenType font used for all text. Resolved at render time when unset.
    pub font: Option<PathBuf>,
    /// Formula, label and caption strings.
    pub text: TextConfig,
    /// Colors and sizes.
    pub style: StyleConfig,
    /// Beat durations and rate functions.
    pub beats: BeatConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            fps: Fps { num: 30, den: 1 },
            sigma: Matrix::from_parts_unchecked(2, 2, vec![1.0, 0.8, 0.8, 1.0]),
            target: Matrix::from_parts_unchecked(2, 2, vec![1.0, 0.0, 0.0, 1.0]),
            lambda_start: 0.0,
            lambda_end: 1.0,
            precision: 2,
            font: None,
            text: TextConfig::default(),
            style: StyleConfig::default(),
            beats: BeatConfig::default(),
        }
    }
}

/// Static strings drawn by the scene.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Shrinkage formula written during the intro.
    pub formula: String,
    /// Prepended to the formatted coefficient, e.g. `λ = 0.40`.
    pub label_prefix: String,
    /// Written under the matrix once the off-diagonals are highlighted.
    pub caption: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            formula: "Σ(λ) = (1 − λ)·Σ + λ·T".to_owned(),
            label_prefix: "λ = ".to_owned(),
            caption: "Covariances shrunk to zero (λ = 1)".to_owned(),
        }
    }
}

/// Colors and sizes. Sizes are in scene units (one unit is 1/8 of the canvas height).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Canvas fill.
    pub background: ColorDef,
    /// Text and bracket color.
    pub text_color: ColorDef,
    /// Off-diagonal highlight rectangles.
    pub highlight_color: ColorDef,
    /// Font size of the coefficient label and matrix entries.
    pub text_size: f64,
    /// Multiplier applied to `text_size` for the formula.
    pub formula_scale: f64,
    /// Font size of the caption.
    pub caption_size: f64,
    /// Highlight rectangle stroke width in pixels.
    pub highlight_stroke_px: f64,
    /// Matrix bracket stroke width in pixels.
    pub bracket_stroke_px: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: ColorDef::BLACK,
            text_color: ColorDef::WHITE,
            highlight_color: ColorDef::YELLOW,
            text_size: 0.6,
            formula_scale: 0.8,
            caption_size: 0.375,
            highlight_stroke_px: 4.0,
            bracket_stroke_px: 3.0,
        }
    }
}

/// Durations, in seconds, of each beat of the animation in playback order.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeatConfig {
    /// Formula written, label and matrix faded in.
    pub intro_secs: f64,
    /// Pause before the sweep.
    pub pre_sweep_wait_secs: f64,
    /// Coefficient animated from `lambda_start` to `lambda_end`.
    pub sweep_secs: f64,
    /// Rate function of the sweep.
    pub sweep_ease: Ease,
    /// Pause after the sweep.
    pub post_sweep_wait_secs: f64,
    /// Highlight rectangles drawn and caption written.
    pub highlight_secs: f64,
    /// Pause with the highlights on screen.
    pub highlight_hold_secs: f64,
    /// Everything faded out.
    pub fade_out_secs: f64,
    /// Empty frames at the end.
    pub tail_secs: f64,
    /// Rate function for fades and the highlight rectangles. Text writes are linear.
    pub reveal_ease: Ease,
}

impl Default for BeatConfig {
    fn default() -> Self {
        Self {
            intro_secs: 1.0,
            pre_sweep_wait_secs: 1.0,
            sweep_secs: 4.0,
            sweep_ease: Ease::Linear,
            post_sweep_wait_secs: 1.0,
            highlight_secs: 1.0,
            highlight_hold_secs: 2.0,
            fade_out_secs: 1.0,
            tail_secs: 1.0,
            reveal_ease: Ease::Smooth,
        }
    }
}

impl BeatConfig {
    /// `(name, seconds)` in playback order.
    pub fn durations(&self) -> [(&'static str, f64); 8] {
        [
            ("intro_secs", self.intro_secs),
            ("pre_sweep_wait_secs", self.pre_sweep_wait_secs),
            ("sweep_secs", self.sweep_secs),
            ("post_sweep_wait_secs", self.post_sweep_wait_secs),
            ("highlight_secs", self.highlight_secs),
            ("highlight_hold_secs", self.highlight_hold_secs),
            ("fade_out_secs", self.fade_out_secs),
            ("tail_secs", self.tail_secs),
        ]
    }
}

impl SceneConfig {
    /// Load and validate a JSON config file.
    pub fn from_path(path: &Path) -> ShrinkResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene config '{}'", path.display()))?;
        let mut cfg = Self::from_json_str(&text)?;
        if let Some(font) = cfg.font.take() {
            cfg.font = Some(resolve_relative(path, font));
        }
        Ok(cfg)
    }

    /// Parse and validate JSON.
    pub fn from_json_str(s: &str) -> ShrinkResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Pretty-printed JSON, loadable with [`SceneConfig::from_json_str`].
    pub fn to_json_pretty(&self) -> ShrinkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check shapes, coefficient bounds, beat durations, style sizes and canvas constraints.
    pub fn validate(&self) -> ShrinkResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ShrinkError::validation("canvas width/height must be non-zero"));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(ShrinkError::validation(format!(
                "canvas must be at most {0}x{0} pixels",
                u16::MAX
            )));
        }
        if !self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2) {
            return Err(ShrinkError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        if !self.sigma.is_square() {
            return Err(ShrinkError::validation("sigma must be a square matrix"));
        }
        if self.sigma.shape() != self.target.shape() {
            return Err(ShrinkError::validation("target must have the same shape as sigma"));
        }
        check_lambda(self.lambda_start)?;
        check_lambda(self.lambda_end)?;
        if self.precision > MAX_PRECISION {
            return Err(ShrinkError::validation(format!("precision must be <= {MAX_PRECISION}")));
        }

        for (name, secs) in self.beats.durations() {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ShrinkError::validation(format!(
                    "beats.{name} must be finite and >= 0"
                )));
            }
        }
        if self.fps.secs_to_frames_round(self.beats.sweep_secs) == 0 {
            return Err(ShrinkError::validation("beats.sweep_secs must cover at least one frame"));
        }

        let s = &self.style;
        for (name, v) in [
            ("text_size", s.text_size),
            ("formula_scale", s.formula_scale),
            ("caption_size", s.caption_size),
            ("highlight_stroke_px", s.highlight_stroke_px),
            ("bracket_stroke_px", s.bracket_stroke_px),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ShrinkError::validation(format!(
                    "style.{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

fn resolve_relative(config_path: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    config_path
        .parent()
        .map(|dir| dir.join(&p))
        .unwrap_or(p)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
