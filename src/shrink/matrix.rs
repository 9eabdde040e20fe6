use crate::foundation::error::{ShrinkError, ShrinkResult};

/// Dense row-major matrix of `f64`.
///
/// Serialized as a list of rows (`[[1.0, 0.8], [0.8, 1.0]]`), which is also the shape
/// accepted in scene configuration files.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from row-major `data`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> ShrinkResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(ShrinkError::validation("matrix must have at least one row and column"));
        }
        if data.len() != rows * cols {
            return Err(ShrinkError::validation(format!(
                "matrix data has {} elements, expected {rows}x{cols}",
                data.len()
            )));
        }
        if let Some(bad) = data.iter().find(|v| !v.is_finite()) {
            return Err(ShrinkError::validation(format!(
                "matrix entries must be finite, got {bad}"
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> ShrinkResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != n_cols) {
            return Err(ShrinkError::validation("matrix rows must all have the same length"));
        }
        Self::new(n_rows, n_cols, rows.into_iter().flatten().collect())
    }

    /// `n x n` identity.
    pub fn identity(n: usize) -> ShrinkResult<Self> {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self::new(n, n, data)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether `rows == cols`.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Entry at `(r, c)`, or `None` when out of bounds.
    pub fn get(&self, r: usize, c: usize) -> Option<f64> {
        if r >= self.rows || c >= self.cols {
            return None;
        }
        Some(self.data[r * self.cols + c])
    }

    /// Row-major entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterate rows as slices.
    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.cols)
    }

    /// Copy out as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.row_iter().map(<[f64]>::to_vec).collect()
    }

    /// Entries with `r != c`, in row-major order.
    pub fn off_diagonal(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().filter_map(move |(i, &v)| {
            let (r, c) = (i / self.cols, i % self.cols);
            (r != c).then_some((r, c, v))
        })
    }

    /// Square with `|a[r][c] - a[c][r]| <= tol` for every pair.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.is_square()
            && self
                .off_diagonal()
                .all(|(r, c, v)| self.get(c, r).is_some_and(|w| (v - w).abs() <= tol))
    }

    pub(crate) fn from_parts_unchecked(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        Self { rows, cols, data }
    }
}

impl serde::Serialize for Matrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Matrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<Vec<f64>>::deserialize(deserializer)?;
        Self::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shrink/matrix.rs"]
mod tests;
