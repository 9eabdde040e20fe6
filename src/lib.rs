//! covshrink animates linear covariance shrinkage, `Σ(λ) = (1 − λ)·Σ + λ·T`.
//!
//! The crate has two layers:
//!
//! - The shrinkage core: [`Matrix`], [`shrink`] and the fixed-precision [`format_matrix`].
//! - A small deterministic video pipeline that explains it on screen:
//!   [`SceneConfig`] → [`Timeline`] → [`Evaluator`] → [`compile_frame`] → [`CpuBackend`] →
//!   [`FrameSink`] (MP4 through the system `ffmpeg`, PNG sequence or memory).
//!
//! ```no_run
//! use covshrink::{CpuBackend, RenderSettings, RenderThreading, SceneConfig, Timeline};
//!
//! # fn main() -> covshrink::ShrinkResult<()> {
//! let tl = Timeline::build(&SceneConfig::default())?;
//! let mut backend = CpuBackend::new(RenderSettings::default())?;
//! let (frames, stats) =
//!     covshrink::render_frames(&tl, tl.full_range(), &mut backend, &RenderThreading::default())?;
//! assert_eq!(frames.len() as u64, stats.frames_total);
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod animation;
pub(crate) mod compile;
pub(crate) mod encode;
pub(crate) mod eval;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod shrink;

pub use crate::foundation::color::ColorDef;
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect};
pub use crate::foundation::error::{ShrinkError, ShrinkResult};

pub use crate::shrink::estimator::{
    DEFAULT_PRECISION, format_matrix, lambda_grid, max_off_diagonal_abs, shrink, shrink_formatted,
};
pub use crate::shrink::matrix::Matrix;

pub use crate::animation::anim::{Keyframe, Keyframes, Lerp, ValueTracker};
pub use crate::animation::ease::Ease;

pub use crate::scene::config::{BeatConfig, MAX_PRECISION, SceneConfig, StyleConfig, TextConfig};
pub use crate::scene::timeline::{Beats, ElementTrack, Timeline};

pub use crate::layout::solver::{
    HIGHLIGHT_BUFF, LayoutParams, MatrixLayout, SceneLayout, TextBox, estimate_text_extent,
    layout_matrix, layout_scene, off_diagonal_highlights, rect_outline,
};

pub use crate::eval::evaluator::{EvaluatedFrame, EvaluatedNode, Evaluator, NodeId, NodeShape};

pub use crate::compile::fingerprint::{FrameFingerprint, fingerprint_draw_list};
pub use crate::compile::plan::{DrawList, DrawOp, compile_frame};

pub use crate::assets::text::{
    FONT_ENV, TextBrushRgba8, TextLayoutEngine, load_font_bytes, resolve_font,
};

pub use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::pipeline::{
    RenderStats, RenderThreading, render_frame, render_frames, render_range,
};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, save_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
