use crate::foundation::core::{Canvas, FrameIndex, Point, Rect};
use crate::foundation::error::{ShrinkError, ShrinkResult};
use crate::layout::solver::{
    LayoutParams, MatrixLayout, layout_matrix, layout_scene, off_diagonal_highlights,
    rect_outline,
};
use crate::scene::timeline::Timeline;
use crate::shrink::estimator::{format_entry, format_matrix, shrink};

/// Which scene element a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// Shrinkage formula.
    Formula,
    /// `λ = ...` label.
    LambdaLabel,
    /// Matrix entry.
    Entry {
        /// Matrix row.
        row: usize,
        /// Matrix column.
        col: usize,
    },
    /// Left matrix bracket.
    LeftBracket,
    /// Right matrix bracket.
    RightBracket,
    /// Rectangle around an off-diagonal entry.
    Highlight {
        /// Matrix row.
        row: usize,
        /// Matrix column.
        col: usize,
    },
    /// Caption under the matrix.
    Caption,
}

/// Geometry of a node in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeShape {
    /// One line of text.
    Text {
        /// Text to draw.
        text: String,
        /// Font size in pixels.
        size_px: f64,
        /// Box the shaped text is centered in.
        rect: Rect,
    },
    /// Stroked polyline.
    Polyline {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Whether the last point connects back to the first.
        closed: bool,
        /// Stroke width in pixels.
        width_px: f64,
    },
}

/// One drawable scene element at a given frame.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedNode {
    /// Element this node belongs to.
    pub id: NodeId,
    /// Geometry in canvas pixels.
    pub shape: NodeShape,
    /// Straight-alpha RGBA8.
    pub color: [u8; 4],
    /// Fade opacity in `[0, 1]`.
    pub opacity: f64,
    /// Progressive-draw fraction; 1.0 means fully drawn.
    pub reveal: f64,
}

/// Full scene state for one frame, in draw order.
#[derive(Clone, Debug)]
pub struct EvaluatedFrame {
    /// Frame this state was sampled at.
    pub frame: FrameIndex,
    /// Output canvas.
    pub canvas: Canvas,
    /// Straight-alpha RGBA8.
    pub background: [u8; 4],
    /// Shrinkage coefficient at `frame`.
    pub lambda: f64,
    /// The shrunk matrix as displayed.
    pub entries: Vec<Vec<String>>,
    /// Visible and hidden nodes, in draw order.
    pub nodes: Vec<EvaluatedNode>,
}

/// Samples a [`Timeline`] into per-frame scene state.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate `frame`, which must lie inside the timeline.
    pub fn eval_frame(tl: &Timeline, frame: FrameIndex) -> ShrinkResult<EvaluatedFrame> {
        if !tl.full_range().contains(frame) {
            return Err(ShrinkError::evaluation(format!(
                "frame {} is outside the timeline [0, {})",
                frame.0,
                tl.duration_frames()
            )));
        }
        let cfg = tl.config();
        let style = &cfg.style;
        let unit = cfg.canvas.unit_px();

        let lambda = tl.lambda_at(frame)?;
        let shrunk = shrink(&cfg.sigma, &cfg.target, lambda)?;
        let entries = format_matrix(&shrunk, cfg.precision);
        let label = format!(
            "{}{}",
            cfg.text.label_prefix,
            format_entry(lambda, cfg.precision)
        );

        let params = LayoutParams {
            canvas: cfg.canvas,
            formula_px: style.text_size * style.formula_scale * unit,
            body_px: style.text_size * unit,
            caption_px: style.caption_size * unit,
        };
        let layout = layout_scene(
            &params,
            &cfg.text.formula,
            &label,
            &entries,
            &cfg.text.caption,
        );
        // Highlights are frozen to the post-sweep matrix, which may be laid out differently
        // from the current one if entry widths change during the sweep.
        let final_matrix = layout_matrix(
            tl.final_entries(),
            params.body_px,
            unit,
            cfg.canvas.center_x(),
            layout.matrix.bounds.y0,
        );

        let text_color = style.text_color.to_rgba8();
        let mut nodes = Vec::new();

        let (opacity, reveal) = tl.formula.sample(frame)?;
        nodes.push(text_node(NodeId::Formula, &layout.formula, text_color, opacity, reveal));

        let (opacity, reveal) = tl.label.sample(frame)?;
        nodes.push(text_node(NodeId::LambdaLabel, &layout.label, text_color, opacity, reveal));

        let (opacity, reveal) = tl.matrix.sample(frame)?;
        push_matrix_nodes(
            &mut nodes,
            &layout.matrix,
            text_color,
            style.bracket_stroke_px,
            opacity,
            reveal,
        );

        let (opacity, reveal) = tl.highlight.sample(frame)?;
        let hl_color = style.highlight_color.to_rgba8();
        for (row, col, rect) in off_diagonal_highlights(&final_matrix, unit) {
            nodes.push(EvaluatedNode {
                id: NodeId::Highlight { row, col },
                shape: NodeShape::Polyline {
                    points: rect_outline(rect),
                    closed: true,
                    width_px: style.highlight_stroke_px,
                },
                color: hl_color,
                opacity,
                reveal,
            });
        }

        let (opacity, reveal) = tl.caption.sample(frame)?;
        nodes.push(text_node(NodeId::Caption, &layout.caption, text_color, opacity, reveal));

        Ok(EvaluatedFrame {
            frame,
            canvas: cfg.canvas,
            background: style.background.to_rgba8(),
            lambda,
            entries,
            nodes,
        })
    }
}

fn text_node(
    id: NodeId,
    b: &crate::layout::solver::TextBox,
    color: [u8; 4],
    opacity: f64,
    reveal: f64,
) -> EvaluatedNode {
    EvaluatedNode {
        id,
        shape: NodeShape::Text {
            text: b.text.clone(),
            size_px: b.size_px,
            rect: b.rect,
        },
        color,
        opacity,
        reveal,
    }
}

fn push_matrix_nodes(
    nodes: &mut Vec<EvaluatedNode>,
    m: &MatrixLayout,
    color: [u8; 4],
    bracket_px: f64,
    opacity: f64,
    reveal: f64,
) {
    for (id, points) in [
        (NodeId::LeftBracket, &m.left_bracket),
        (NodeId::RightBracket, &m.right_bracket),
    ] {
        nodes.push(EvaluatedNode {
            id,
            shape: NodeShape::Polyline {
                points: points.clone(),
                closed: false,
                width_px: bracket_px,
            },
            color,
            opacity,
            reveal,
        });
    }
    for (row, cells) in m.entries.iter().enumerate() {
        for (col, b) in cells.iter().enumerate() {
            nodes.push(text_node(NodeId::Entry { row, col }, b, color, opacity, reveal));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
