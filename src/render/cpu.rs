use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::text::{TextBrushRgba8, TextLayoutEngine};
use crate::compile::plan::{DrawList, DrawOp};
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{ShrinkError, ShrinkResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};

/// Shaped layouts kept per backend; the label and matrix entries change every sweep frame.
const LAYOUT_CACHE_MAX: usize = 512;
/// Flattening tolerance for stroke outlines, in pixels.
const STROKE_TOLERANCE: f64 = 0.05;

struct TextState {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct LayoutKey {
    text: String,
    size_bits: u32,
    brush: TextBrushRgba8,
}

/// CPU raster backend powered by `vello_cpu`.
pub struct CpuBackend {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
    text: Option<TextState>,
    layout_cache: HashMap<LayoutKey, Arc<parley::Layout<TextBrushRgba8>>>,
    warned_missing_font: bool,
}

impl CpuBackend {
    /// Build a backend. Fails if the configured font cannot be registered.
    pub fn new(settings: RenderSettings) -> ShrinkResult<Self> {
        let text = match settings.font_bytes.as_ref() {
            Some(bytes) => Some(TextState {
                engine: TextLayoutEngine::new(bytes)?,
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
                    0,
                ),
            }),
            None => None,
        };
        Ok(Self {
            settings,
            ctx: None,
            text,
            layout_cache: HashMap::new(),
            warned_missing_font: false,
        })
    }

    fn take_ctx(&mut self, width: u16, height: u16) -> vello_cpu::RenderContext {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx
    }

    fn layout_for(
        &mut self,
        text: &str,
        size_px: f32,
        color: [u8; 4],
    ) -> ShrinkResult<Option<Arc<parley::Layout<TextBrushRgba8>>>> {
        let Some(state) = self.text.as_mut() else {
            if !self.warned_missing_font {
                tracing::warn!("no font available; text will not be drawn");
                self.warned_missing_font = true;
            }
            return Ok(None);
        };
        let brush = TextBrushRgba8 {
            r: color[0],
            g: color[1],
            b: color[2],
            a: color[3],
        };
        let key = LayoutKey {
            text: text.to_owned(),
            size_bits: size_px.to_bits(),
            brush,
        };
        if let Some(layout) = self.layout_cache.get(&key) {
            return Ok(Some(layout.clone()));
        }
        if self.layout_cache.len() >= LAYOUT_CACHE_MAX {
            self.layout_cache.clear();
        }
        let layout = Arc::new(state.engine.layout_line(text, size_px, brush)?);
        self.layout_cache.insert(key, layout.clone());
        Ok(Some(layout))
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        size_px: f32,
        rect: Rect,
        color: [u8; 4],
        opacity: f32,
        reveal: f32,
    ) -> ShrinkResult<()> {
        let Some(layout) = self.layout_for(text, size_px, color)? else {
            return Ok(());
        };
        let Some(state) = self.text.as_ref() else {
            return Ok(());
        };

        let w = f64::from(layout.width());
        let h = f64::from(layout.height());
        let center = rect.center();
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            center.x - w / 2.0,
            center.y - h / 2.0,
        )));

        let cutoff = reveal * layout.width();
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run
                    .glyphs()
                    .filter(|g| reveal >= 1.0 || g.x < cutoff)
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                ctx.glyph_run(&state.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn draw_stroke(
        ctx: &mut vello_cpu::RenderContext,
        points: &[Point],
        width_px: f64,
        color: [u8; 4],
        opacity: f32,
    ) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = kurbo::BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        let style = kurbo::Stroke::new(width_px)
            .with_join(kurbo::Join::Miter)
            .with_caps(kurbo::Cap::Square);
        let outline = kurbo::stroke(
            path.iter(),
            &style,
            &kurbo::StrokeOpts::default(),
            STROKE_TOLERANCE,
        );

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color[0], color[1], color[2], color[3],
        ));
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        ctx.fill_path(&bezpath_to_cpu(&outline));
        if opacity < 1.0 {
            ctx.pop_layer();
        }
    }
}

impl RenderBackend for CpuBackend {
    fn render(&mut self, list: &DrawList) -> ShrinkResult<FrameRGBA> {
        let (width, height) = canvas_u16(list.canvas)?;
        let mut ctx = self.take_ctx(width, height);

        let [r, g, b, a] = list.background;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

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
                    self.draw_text(&mut ctx, text, *size_px, *rect, *color, *opacity, *reveal)?;
                }
                DrawOp::Stroke {
                    points,
                    width_px,
                    color,
                    opacity,
                } => Self::draw_stroke(&mut ctx, points, *width_px, *color, *opacity),
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: u32::from(width),
            height: u32::from(height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

fn canvas_u16(canvas: Canvas) -> ShrinkResult<(u16, u16)> {
    let w = u16::try_from(canvas.width)
        .map_err(|_| ShrinkError::render("canvas width exceeds u16"))?;
    let h = u16::try_from(canvas.height)
        .map_err(|_| ShrinkError::render("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(ShrinkError::render("canvas width/height must be non-zero"));
    }
    Ok((w, h))
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
