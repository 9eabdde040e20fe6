use super::*;

fn sigma() -> Matrix {
    Matrix::from_rows(vec![vec![1.0, 0.8], vec![0.8, 1.0]]).unwrap()
}

fn target() -> Matrix {
    Matrix::identity(2).unwrap()
}

fn strs(rows: &[[&str; 2]; 2]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn lambda_zero_returns_sigma() {
    assert_eq!(shrink(&sigma(), &target(), 0.0).unwrap(), sigma());
    assert_eq!(
        shrink_formatted(&sigma(), &target(), 0.0).unwrap(),
        strs(&[["1.00", "0.80"], ["0.80", "1.00"]])
    );
}

#[test]
fn lambda_one_returns_target() {
    assert_eq!(shrink(&sigma(), &target(), 1.0).unwrap(), target());
    assert_eq!(
        shrink_formatted(&sigma(), &target(), 1.0).unwrap(),
        strs(&[["1.00", "0.00"], ["0.00", "1.00"]])
    );
}

#[test]
fn lambda_half_is_midpoint() {
    assert_eq!(
        shrink_formatted(&sigma(), &target(), 0.5).unwrap(),
        strs(&[["1.00", "0.40"], ["0.40", "1.00"]])
    );
}

#[test]
fn off_diagonal_magnitude_is_non_increasing() {
    let grid = lambda_grid(100).unwrap();
    let mags: Vec<f64> = grid
        .iter()
        .map(|&l| max_off_diagonal_abs(&shrink(&sigma(), &target(), l).unwrap()))
        .collect();
    assert!(mags.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(mags[0], 0.8);
    assert_eq!(mags[100], 0.0);
}

#[test]
fn entries_stay_between_inputs() {
    let s = Matrix::from_rows(vec![vec![2.0, -0.6], vec![-0.6, 0.5]]).unwrap();
    let t = Matrix::identity(2).unwrap();
    for &l in &lambda_grid(20).unwrap() {
        let m = shrink(&s, &t, l).unwrap();
        for ((&v, &a), &b) in m.as_slice().iter().zip(s.as_slice()).zip(t.as_slice()) {
            assert!(v >= a.min(b) - 1e-12 && v <= a.max(b) + 1e-12);
        }
    }
}

#[test]
fn rejects_shape_mismatch_and_bad_lambda() {
    let three = Matrix::identity(3).unwrap();
    assert!(shrink(&sigma(), &three, 0.5).is_err());
    assert!(shrink(&sigma(), &target(), -0.1).is_err());
    assert!(shrink(&sigma(), &target(), 1.5).is_err());
    assert!(shrink(&sigma(), &target(), f64::NAN).is_err());
}

#[test]
fn negative_zero_formats_as_zero() {
    assert_eq!(format_entry(-0.0, 2), "0.00");
    assert_eq!(format_entry(-0.001, 2), "0.00");
    assert_eq!(format_entry(-0.3, 2), "-0.30");
    assert_eq!(format_entry(0.125, 1), "0.1");
}

#[test]
fn lambda_grid_includes_endpoints() {
    assert_eq!(lambda_grid(4).unwrap(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert!(lambda_grid(0).is_err());
}
