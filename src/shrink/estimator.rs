use crate::foundation::error::{ShrinkError, ShrinkResult};
use crate::shrink::matrix::Matrix;

/// Display precision used by the animation and the `table` command.
pub const DEFAULT_PRECISION: usize = 2;

/// Linear shrinkage `(1 - lambda) * sigma + lambda * target`, element-wise.
///
/// `lambda` must be finite and within `[0, 1]`, and both matrices must share a shape.
pub fn shrink(sigma: &Matrix, target: &Matrix, lambda: f64) -> ShrinkResult<Matrix> {
    if sigma.shape() != target.shape() {
        let (sr, sc) = sigma.shape();
        let (tr, tc) = target.shape();
        return Err(ShrinkError::validation(format!(
            "shrinkage target shape {tr}x{tc} does not match covariance shape {sr}x{sc}"
        )));
    }
    check_lambda(lambda)?;

    let data = sigma
        .as_slice()
        .iter()
        .zip(target.as_slice())
        .map(|(&s, &t)| (1.0 - lambda) * s + lambda * t)
        .collect();
    Ok(Matrix::from_parts_unchecked(sigma.rows(), sigma.cols(), data))
}

/// Format every entry with `precision` decimals. Negative zero prints as positive zero.
pub fn format_matrix(m: &Matrix, precision: usize) -> Vec<Vec<String>> {
    m.row_iter()
        .map(|row| row.iter().map(|&v| format_entry(v, precision)).collect())
        .collect()
}

/// [`shrink`] followed by [`format_matrix`] at [`DEFAULT_PRECISION`].
pub fn shrink_formatted(
    sigma: &Matrix,
    target: &Matrix,
    lambda: f64,
) -> ShrinkResult<Vec<Vec<String>>> {
    Ok(format_matrix(&shrink(sigma, target, lambda)?, DEFAULT_PRECISION))
}

/// Largest off-diagonal magnitude (`0.0` for 1x1 matrices).
pub fn max_off_diagonal_abs(m: &Matrix) -> f64 {
    m.off_diagonal()
        .map(|(_, _, v)| v.abs())
        .fold(0.0, f64::max)
}

/// `steps + 1` evenly spaced coefficients from 0 to 1 inclusive.
pub fn lambda_grid(steps: u32) -> ShrinkResult<Vec<f64>> {
    if steps == 0 {
        return Err(ShrinkError::validation("lambda grid needs at least one step"));
    }
    let n = f64::from(steps);
    Ok((0..=steps).map(|i| f64::from(i) / n).collect())
}

pub(crate) fn format_entry(v: f64, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    // Values like -0.001 round to "-0.00".
    if s.starts_with('-') && s[1..].bytes().all(|b| b == b'0' || b == b'.') {
        s[1..].to_owned()
    } else {
        s
    }
}

pub(crate) fn check_lambda(lambda: f64) -> ShrinkResult<()> {
    if !lambda.is_finite() {
        return Err(ShrinkError::validation("shrinkage coefficient must be finite"));
    }
    if !(0.0..=1.0).contains(&lambda) {
        return Err(ShrinkError::validation(format!(
            "shrinkage coefficient must be within [0, 1], got {lambda}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/shrink/estimator.rs"]
mod tests;
