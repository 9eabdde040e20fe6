use crate::eval::evaluator::{EvaluatedFrame, NodeShape};
use crate::foundation::core::{Canvas, FrameIndex, Point, Rect};
use crate::foundation::error::{ShrinkError, ShrinkResult};

/// Backend-agnostic drawing instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// One line of text centered in `rect`. Only glyphs starting before `reveal` of the
    /// shaped width are drawn.
    Text {
        /// Text to shape.
        text: String,
        /// Font size in pixels.
        size_px: f32,
        /// Box the shaped line is centered in.
        rect: Rect,
        /// Straight-alpha RGBA8.
        color: [u8; 4],
        /// Layer opacity.
        opacity: f32,
        /// Fraction of the shaped width to draw.
        reveal: f32,
    },
    /// Stroked open polyline (already truncated for partial reveals).
    Stroke {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Stroke width in pixels.
        width_px: f64,
        /// Straight-alpha RGBA8.
        color: [u8; 4],
        /// Layer opacity.
        opacity: f32,
    },
}

/// Everything a backend needs to produce one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawList {
    /// Frame being drawn.
    pub frame: FrameIndex,
    /// Output canvas.
    pub canvas: Canvas,
    /// Straight-alpha RGBA8 clear color.
    pub background: [u8; 4],
    /// Ops in painter's order.
    pub ops: Vec<DrawOp>,
}

/// Lower an evaluated frame into draw ops, dropping nodes that would not touch any pixel.
pub fn compile_frame(eval: &EvaluatedFrame) -> ShrinkResult<DrawList> {
    let mut ops = Vec::with_capacity(eval.nodes.len());
    for node in &eval.nodes {
        if !node.opacity.is_finite() || !node.reveal.is_finite() {
            return Err(ShrinkError::evaluation(format!(
                "node {:?} has non-finite opacity/reveal",
                node.id
            )));
        }
        if node.opacity <= 0.0 || node.reveal <= 0.0 || node.color[3] == 0 {
            continue;
        }
        let opacity = node.opacity.min(1.0) as f32;
        match &node.shape {
            NodeShape::Text {
                text,
                size_px,
                rect,
            } => {
                if text.is_empty() {
                    continue;
                }
                ops.push(DrawOp::Text {
                    text: text.clone(),
                    size_px: *size_px as f32,
                    rect: *rect,
                    color: node.color,
                    opacity,
                    reveal: node.reveal.min(1.0) as f32,
                });
            }
            NodeShape::Polyline {
                points,
                closed,
                width_px,
            } => {
                let points = truncate_polyline(points, *closed, node.reveal);
                if points.len() < 2 {
                    continue;
                }
                ops.push(DrawOp::Stroke {
                    points,
                    width_px: *width_px,
                    color: node.color,
                    opacity,
                });
            }
        }
    }
    Ok(DrawList {
        frame: eval.frame,
        canvas: eval.canvas,
        background: eval.background,
        ops,
    })
}

/// Leading `fraction` of a polyline by arc length. Closed polylines include the closing
/// segment, and a complete closed outline ends back at its first point.
pub(crate) fn truncate_polyline(points: &[Point], closed: bool, fraction: f64) -> Vec<Point> {
    let mut path: Vec<Point> = points.to_vec();
    if closed && let Some(&first) = points.first() {
        path.push(first);
    }
    if path.len() < 2 {
        return path;
    }

    let total: f64 = path.windows(2).map(|w| w[0].distance(w[1])).sum();
    let fraction = fraction.clamp(0.0, 1.0);
    if fraction >= 1.0 || total <= 0.0 {
        return path;
    }

    let mut remaining = total * fraction;
    let mut out = vec![path[0]];
    for w in path.windows(2) {
        let seg = w[0].distance(w[1]);
        if remaining >= seg {
            out.push(w[1]);
            remaining -= seg;
            continue;
        }
        if remaining > 0.0 {
            out.push(w[0].lerp(w[1], remaining / seg));
        }
        break;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
