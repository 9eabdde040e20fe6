use super::*;
use crate::scene::config::SceneConfig;

fn timeline() -> Timeline {
    Timeline::build(&SceneConfig::default()).unwrap()
}

fn text_of(frame: &EvaluatedFrame, id: NodeId) -> String {
    let node = frame.nodes.iter().find(|n| n.id == id).unwrap();
    match &node.shape {
        NodeShape::Text { text, .. } => text.clone(),
        NodeShape::Polyline { .. } => panic!("{id:?} is not text"),
    }
}

#[test]
fn matrix_tracks_lambda_through_the_sweep() {
    let tl = timeline();

    let f = Evaluator::eval_frame(&tl, FrameIndex(0)).unwrap();
    assert_eq!(f.lambda, 0.0);
    assert_eq!(f.entries[0][1], "0.80");
    assert_eq!(text_of(&f, NodeId::LambdaLabel), "λ = 0.00");

    let f = Evaluator::eval_frame(&tl, FrameIndex(120)).unwrap();
    assert_eq!(f.entries[0][1], "0.40");
    assert_eq!(f.entries[1][0], "0.40");
    assert_eq!(text_of(&f, NodeId::LambdaLabel), "λ = 0.50");
    assert_eq!(text_of(&f, NodeId::Entry { row: 1, col: 0 }), "0.40");

    let f = Evaluator::eval_frame(&tl, FrameIndex(200)).unwrap();
    assert_eq!(
        f.entries,
        vec![
            vec!["1.00".to_string(), "0.00".to_string()],
            vec!["0.00".to_string(), "1.00".to_string()],
        ]
    );
}

#[test]
fn node_inventory_for_two_by_two() {
    let tl = timeline();
    let f = Evaluator::eval_frame(&tl, FrameIndex(250)).unwrap();
    let highlights: Vec<_> = f
        .nodes
        .iter()
        .filter(|n| matches!(n.id, NodeId::Highlight { .. }))
        .map(|n| n.id)
        .collect();
    assert_eq!(
        highlights,
        vec![
            NodeId::Highlight { row: 0, col: 1 },
            NodeId::Highlight { row: 1, col: 0 },
        ]
    );
    // formula, label, 2 brackets, 4 entries, 2 highlights, caption
    assert_eq!(f.nodes.len(), 11);
    assert_eq!(f.background, [0, 0, 0, 255]);
}

#[test]
fn highlights_surround_their_entries() {
    let tl = timeline();
    let f = Evaluator::eval_frame(&tl, FrameIndex(250)).unwrap();
    let entry = f
        .nodes
        .iter()
        .find_map(|n| match (&n.id, &n.shape) {
            (NodeId::Entry { row: 0, col: 1 }, NodeShape::Text { rect, .. }) => Some(*rect),
            _ => None,
        })
        .unwrap();
    let outline = f
        .nodes
        .iter()
        .find_map(|n| match (&n.id, &n.shape) {
            (NodeId::Highlight { row: 0, col: 1 }, NodeShape::Polyline { points, .. }) => {
                Some(points.clone())
            }
            _ => None,
        })
        .unwrap();
    assert!(outline[0].x < entry.x0 && outline[0].y < entry.y0);
    assert!(outline[2].x > entry.x1 && outline[2].y > entry.y1);
}

#[test]
fn visibility_follows_beats() {
    let tl = timeline();
    let f = Evaluator::eval_frame(&tl, FrameIndex(100)).unwrap();
    for n in &f.nodes {
        let visible = n.opacity > 0.0;
        match n.id {
            NodeId::Highlight { .. } | NodeId::Caption => assert!(!visible, "{:?}", n.id),
            _ => assert!(visible && n.reveal == 1.0, "{:?}", n.id),
        }
    }

    let last = Evaluator::eval_frame(&tl, FrameIndex(359)).unwrap();
    assert!(last.nodes.iter().all(|n| n.opacity == 0.0));
}

#[test]
fn out_of_range_frame_is_an_error() {
    let tl = timeline();
    assert!(Evaluator::eval_frame(&tl, FrameIndex(360)).is_err());
}
