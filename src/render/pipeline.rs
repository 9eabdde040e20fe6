use std::collections::HashMap;

use rayon::prelude::*;

use crate::compile::fingerprint::{FrameFingerprint, fingerprint_draw_list};
use crate::compile::plan::{DrawList, compile_frame};
use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
use crate::eval::evaluator::Evaluator;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ShrinkError, ShrinkResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::render::cpu::CpuBackend;
use crate::scene::timeline::Timeline;

/// Evaluate + compile + render a single frame.
///
/// Pipeline:
/// 1. [`Evaluator::eval_frame`](crate::Evaluator::eval_frame)
/// 2. [`compile_frame`](crate::compile_frame)
/// 3. [`RenderBackend::render`](crate::RenderBackend::render)
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_frame(
    tl: &Timeline,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
) -> ShrinkResult<FrameRGBA> {
    let list = draw_list_at(tl, frame)?;
    backend.render(&list)
}

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame rendering.
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Render identical draw lists once and reuse the pixels.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Total requested frames.
    pub frames_total: u64,
    /// Frames that were actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused via static-frame elision.
    pub frames_elided: u64,
}

impl RenderStats {
    fn absorb(&mut self, other: RenderStats) {
        self.frames_total += other.frames_total;
        self.frames_rendered += other.frames_rendered;
        self.frames_elided += other.frames_elided;
    }
}

/// Render `range` and push every frame, in order, into `sink`.
///
/// `range` must be non-empty and lie within the timeline. Parallel mode needs a backend that
/// reports [`RenderBackend::worker_render_settings`]; each rayon worker builds its own
/// [`CpuBackend`] from them.
#[tracing::instrument(level = "info", skip_all, fields(start = range.start.0, end = range.end.0))]
pub fn render_range(
    tl: &Timeline,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    threading: &RenderThreading,
) -> ShrinkResult<RenderStats> {
    if range.is_empty() {
        return Err(ShrinkError::validation("render range must be non-empty"));
    }
    if range.end.0 > tl.duration_frames() {
        return Err(ShrinkError::validation(format!(
            "render range end {} exceeds timeline duration {}",
            range.end.0,
            tl.duration_frames()
        )));
    }

    let cfg = tl.config();
    sink.begin(SinkConfig {
        width: cfg.canvas.width,
        height: cfg.canvas.height,
        fps: cfg.fps,
    })?;

    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let mut stats = RenderStats::default();

    if threading.parallel {
        let settings = backend.worker_render_settings().ok_or_else(|| {
            ShrinkError::render("parallel render requires backend worker settings (CpuBackend)")
        })?;
        let pool = build_thread_pool(threading.threads)?;

        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))?;
            let out = render_chunk_parallel(tl, chunk, &settings, threading, &pool)?;
            for (offset, &u) in out.frame_to_unique.iter().enumerate() {
                let frame = out.unique_frames.get(u).ok_or_else(|| {
                    ShrinkError::render("internal error: unique frame index out of range")
                })?;
                sink.push_frame(FrameIndex(chunk_start + offset as u64), frame)?;
            }
            tracing::debug!(
                chunk_start,
                chunk_end,
                rendered = out.stats.frames_rendered,
                elided = out.stats.frames_elided,
                "chunk rendered"
            );
            stats.absorb(out.stats);
            chunk_start = chunk_end;
        }
    } else {
        let mut last: Option<(FrameFingerprint, FrameRGBA)> = None;
        for f in range.start.0..range.end.0 {
            let idx = FrameIndex(f);
            let list = draw_list_at(tl, idx)?;
            stats.frames_total += 1;

            if threading.static_frame_elision {
                let fp = fingerprint_draw_list(&list);
                if let Some((prev_fp, prev_frame)) = last.as_ref()
                    && *prev_fp == fp
                {
                    sink.push_frame(idx, prev_frame)?;
                    stats.frames_elided += 1;
                    continue;
                }
                let frame = backend.render(&list)?;
                sink.push_frame(idx, &frame)?;
                stats.frames_rendered += 1;
                last = Some((fp, frame));
            } else {
                let frame = backend.render(&list)?;
                sink.push_frame(idx, &frame)?;
                stats.frames_rendered += 1;
            }
        }
    }

    sink.end()?;
    tracing::info!(
        frames = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "render complete"
    );
    Ok(stats)
}

/// Render a range into memory and return the frames with rendering stats.
pub fn render_frames(
    tl: &Timeline,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> ShrinkResult<(Vec<FrameRGBA>, RenderStats)> {
    let mut sink = InMemorySink::new();
    let stats = render_range(tl, range, backend, &mut sink, threading)?;
    let frames = sink.into_frames().into_iter().map(|(_, f)| f).collect();
    Ok((frames, stats))
}

fn draw_list_at(tl: &Timeline, frame: FrameIndex) -> ShrinkResult<DrawList> {
    let eval = Evaluator::eval_frame(tl, frame)?;
    compile_frame(&eval)
}

struct ChunkParallelOut {
    unique_frames: Vec<FrameRGBA>,
    frame_to_unique: Vec<usize>,
    stats: RenderStats,
}

fn render_chunk_parallel(
    tl: &Timeline,
    range: FrameRange,
    settings: &RenderSettings,
    threading: &RenderThreading,
    pool: &rayon::ThreadPool,
) -> ShrinkResult<ChunkParallelOut> {
    let mut lists = Vec::with_capacity(range.len_frames() as usize);
    for f in range.start.0..range.end.0 {
        lists.push(draw_list_at(tl, FrameIndex(f))?);
    }

    let mut unique_indices = Vec::<usize>::with_capacity(lists.len());
    let mut frame_to_unique = Vec::<usize>::with_capacity(lists.len());
    if threading.static_frame_elision {
        let mut first = HashMap::<FrameFingerprint, usize>::new();
        for (idx, list) in lists.iter().enumerate() {
            let fp = fingerprint_draw_list(list);
            if let Some(&slot) = first.get(&fp) {
                frame_to_unique.push(slot);
            } else {
                let slot = unique_indices.len();
                unique_indices.push(idx);
                first.insert(fp, slot);
                frame_to_unique.push(slot);
            }
        }
    } else {
        unique_indices.extend(0..lists.len());
        frame_to_unique.extend(0..lists.len());
    }

    let rendered = pool.install(|| {
        unique_indices
            .par_iter()
            .map_init(
                || CpuBackend::new(settings.clone()),
                |worker, list_idx| -> ShrinkResult<FrameRGBA> {
                    match worker {
                        Ok(backend) => backend.render(&lists[*list_idx]),
                        Err(e) => Err(ShrinkError::render(format!(
                            "failed to initialise worker backend: {e}"
                        ))),
                    }
                },
            )
            .collect::<Vec<_>>()
    });

    let unique_frames = rendered.into_iter().collect::<ShrinkResult<Vec<_>>>()?;
    let total = lists.len() as u64;
    let rendered_count = unique_frames.len() as u64;
    Ok(ChunkParallelOut {
        unique_frames,
        frame_to_unique,
        stats: RenderStats {
            frames_total: total,
            frames_rendered: rendered_count,
            frames_elided: total.saturating_sub(rendered_count),
        },
    })
}

fn build_thread_pool(threads: Option<usize>) -> ShrinkResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ShrinkError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ShrinkError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
