use super::*;

fn entries(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
}

fn params() -> LayoutParams {
    LayoutParams {
        canvas: Canvas {
            width: 1280,
            height: 720,
        },
        formula_px: 43.2,
        body_px: 54.0,
        caption_px: 33.75,
    }
}

#[test]
fn text_extent_scales_with_chars() {
    assert_eq!(estimate_text_extent("0.80", 10.0), (22.0, 10.0));
    assert_eq!(estimate_text_extent("", 10.0), (0.0, 10.0));
    // Σ and λ count as one char each.
    assert!((estimate_text_extent("λ", 10.0).0 - 5.5).abs() < 1e-9);
}

#[test]
fn scene_is_stacked_top_to_bottom_and_centered() {
    let l = layout_scene(
        &params(),
        "Σ(λ) = (1 − λ)·Σ + λ·T",
        "λ = 0.00",
        &entries(&[&["1.00", "0.80"], &["0.80", "1.00"]]),
        "Covariances shrunk to zero (λ = 1)",
    );
    assert_eq!(l.formula.rect.y0, 90.0);
    assert!((l.formula.rect.center().x - 640.0).abs() < 1e-9);
    assert!(l.label.rect.y0 > l.formula.rect.y1);
    assert!(l.matrix.bounds.y0 > l.label.rect.y1);
    assert!(l.caption.rect.y0 > l.matrix.bounds.y1);
    assert!((l.caption.rect.y1 - (720.0 - 45.0)).abs() < 1e-9);
    assert!((l.matrix.bounds.center().x - 640.0).abs() < 1e-9);
}

#[test]
fn matrix_entries_are_on_a_grid_inside_brackets() {
    let m = layout_matrix(
        &entries(&[&["1.00", "0.80"], &["0.80", "1.00"]]),
        54.0,
        90.0,
        640.0,
        300.0,
    );
    let a = m.entry(0, 0).unwrap().rect;
    let b = m.entry(0, 1).unwrap().rect;
    let c = m.entry(1, 0).unwrap().rect;
    // Estimated "0.80" is wider than the nominal pitch, so the minimum gap wins.
    let widest = estimate_text_extent("0.80", 54.0).0;
    assert!((b.center().x - a.center().x - (widest + 27.0)).abs() < 1e-9);
    assert!(b.x0 - a.x1 >= 27.0 - 1e-9);
    assert!((c.center().y - a.center().y - 72.0).abs() < 1e-9);
    assert_eq!(m.bounds.y0, 300.0);
    for row in &m.entries {
        for e in row {
            assert!(m.bounds.contains(e.rect.origin()));
        }
    }
    assert_eq!(m.left_bracket.len(), 4);
    assert_eq!(m.left_bracket[1].x, m.bounds.x0);
    assert_eq!(m.right_bracket[2].x, m.bounds.x1);
}

#[test]
fn wide_entries_widen_column_pitch() {
    let m = layout_matrix(
        &entries(&[&["-1000.00", "0.00"], &["0.00", "1.00"]]),
        54.0,
        90.0,
        640.0,
        0.0,
    );
    let a = m.entry(0, 0).unwrap().rect;
    let b = m.entry(0, 1).unwrap().rect;
    assert!(b.x0 >= a.x1);
}

#[test]
fn highlights_cover_off_diagonal_only() {
    let m = layout_matrix(
        &entries(&[&["1", "2", "3"], &["4", "5", "6"], &["7", "8", "9"]]),
        54.0,
        90.0,
        640.0,
        0.0,
    );
    let hl = off_diagonal_highlights(&m, 90.0);
    assert_eq!(hl.len(), 6);
    for (r, c, rect) in hl {
        assert_ne!(r, c);
        let inner = m.entry(r, c).unwrap().rect;
        assert!((inner.x0 - rect.x0 - 9.0).abs() < 1e-9);
        assert!((rect.y1 - inner.y1 - 9.0).abs() < 1e-9);
    }
}

#[test]
fn rect_outline_is_clockwise_from_top_left() {
    let pts = rect_outline(Rect::new(0.0, 0.0, 2.0, 1.0));
    assert_eq!(
        pts,
        vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    );
}
