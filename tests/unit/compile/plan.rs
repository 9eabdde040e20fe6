use super::*;
use crate::eval::evaluator::{EvaluatedNode, NodeId};

fn square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ]
}

fn frame(nodes: Vec<EvaluatedNode>) -> EvaluatedFrame {
    EvaluatedFrame {
        frame: FrameIndex(3),
        canvas: Canvas {
            width: 64,
            height: 64,
        },
        background: [0, 0, 0, 255],
        lambda: 0.0,
        entries: vec![],
        nodes,
    }
}

fn stroke_node(opacity: f64, reveal: f64) -> EvaluatedNode {
    EvaluatedNode {
        id: NodeId::Highlight { row: 0, col: 1 },
        shape: NodeShape::Polyline {
            points: square(),
            closed: true,
            width_px: 2.0,
        },
        color: [255, 255, 0, 255],
        opacity,
        reveal,
    }
}

#[test]
fn truncate_full_closed_returns_to_start() {
    let pts = truncate_polyline(&square(), true, 1.0);
    assert_eq!(pts.len(), 5);
    assert_eq!(pts[4], pts[0]);
}

#[test]
fn truncate_half_closed_stops_at_opposite_corner() {
    let pts = truncate_polyline(&square(), true, 0.5);
    assert_eq!(pts.last().copied(), Some(Point::new(10.0, 10.0)));
}

#[test]
fn truncate_interpolates_inside_a_segment() {
    let pts = truncate_polyline(&square(), false, 0.5);
    // Open length is 30; half is 15, i.e. halfway down the second segment.
    assert_eq!(pts.len(), 3);
    assert!((pts[2].y - 5.0).abs() < 1e-9);
    assert_eq!(pts[2].x, 10.0);
}

#[test]
fn invisible_nodes_are_dropped() {
    let list = compile_frame(&frame(vec![
        stroke_node(0.0, 1.0),
        stroke_node(1.0, 0.0),
        stroke_node(0.5, 0.25),
    ]))
    .unwrap();
    assert_eq!(list.ops.len(), 1);
    match &list.ops[0] {
        DrawOp::Stroke {
            points, opacity, ..
        } => {
            assert_eq!(*opacity, 0.5);
            assert_eq!(points.last().copied(), Some(Point::new(10.0, 0.0)));
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn text_nodes_carry_reveal() {
    let node = EvaluatedNode {
        id: NodeId::Formula,
        shape: NodeShape::Text {
            text: "λ".to_string(),
            size_px: 12.0,
            rect: Rect::new(0.0, 0.0, 10.0, 12.0),
        },
        color: [255, 255, 255, 255],
        opacity: 1.0,
        reveal: 0.5,
    };
    let list = compile_frame(&frame(vec![node])).unwrap();
    assert!(matches!(
        list.ops[0],
        DrawOp::Text { reveal, size_px, .. } if reveal == 0.5 && size_px == 12.0
    ));
}

#[test]
fn non_finite_opacity_is_rejected() {
    assert!(compile_frame(&frame(vec![stroke_node(f64::NAN, 1.0)])).is_err());
}
