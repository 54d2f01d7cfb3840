//! Dense row-major `f64` matrix and the primitive operations the pipeline
//! is built from.
//!
//! Every constructor allocates through `try_reserve_exact`, so an allocation
//! failure surfaces as [`Error::AllocationFailed`] instead of aborting the
//! process. Intermediates are released when they go out of scope, which
//! covers every early-return path.
//!
//! Reductions (dot products, row sums, norms) always accumulate in ascending
//! index order starting from `0.0`, so results are reproducible bit for bit.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};

/// Allocate a zero-filled buffer of `len` doubles without aborting on OOM.
fn try_alloc(len: usize) -> Result<Vec<f64>> {
    let requested_bytes = len.saturating_mul(std::mem::size_of::<f64>());
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed { requested_bytes })?;
    buf.resize(len, 0.0);
    Ok(buf)
}

/// Owned dense matrix: a row-major buffer plus its dimensions.
///
/// The buffer length always equals `rows * cols`, so ragged matrices cannot
/// be represented.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Allocate a `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = rows.checked_mul(cols).ok_or(Error::AllocationFailed {
            requested_bytes: usize::MAX,
        })?;
        Ok(Self {
            data: try_alloc(len)?,
            rows,
            cols,
        })
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::invalid(format!(
                "buffer of {} elements cannot hold a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from nested rows, rejecting empty or ragged input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = match rows.first() {
            Some(first) => first.as_ref().len(),
            None => return Err(Error::invalid("matrix must have at least one row")),
        };
        if cols == 0 {
            return Err(Error::invalid("matrix must have at least one column"));
        }
        let mut m = Self::zeros(rows.len(), cols)?;
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::invalid(format!(
                    "ragged row {}: expected {} values, got {}",
                    i,
                    cols,
                    row.len()
                )));
            }
            m.row_mut(i).copy_from_slice(row);
        }
        Ok(m)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row `i` as a contiguous slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over rows.
    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics; a zero-column matrix has no row data anyway
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Flat row-major view.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Copy out as nested rows (the list-of-lists form used by bindings).
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.row_iter().map(|r| r.to_vec()).collect()
    }

    /// Arithmetic mean of all entries; `0.0` for an empty matrix.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// True when every entry is `>= 0.0` (NaN counts as negative).
    pub fn is_non_negative(&self) -> bool {
        self.data.iter().all(|&v| v >= 0.0)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}

/// Rows of `%.4f` values joined by `,`, one row per line.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_iter() {
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{:.4}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// Element-wise operations
// ============================================================================

/// out := a - b, element-wise. `out` must already have the operands' shape.
pub fn difference(out: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::shape("difference", a.shape(), b.shape()));
    }
    if out.shape() != a.shape() {
        return Err(Error::shape("difference", a.shape(), out.shape()));
    }
    for ((o, &x), &y) in out.data.iter_mut().zip(&a.data).zip(&b.data) {
        *o = x - y;
    }
    Ok(())
}

/// dest := src. `dest` must already have `src`'s shape.
pub fn copy_into(dest: &mut Matrix, src: &Matrix) -> Result<()> {
    if dest.shape() != src.shape() {
        return Err(Error::shape("copy", src.shape(), dest.shape()));
    }
    dest.data.copy_from_slice(&src.data);
    Ok(())
}

/// Squared Frobenius norm: sum of squared entries.
pub fn frobenius_squared_norm(m: &Matrix) -> f64 {
    m.data.iter().fold(0.0, |acc, &v| acc + v * v)
}

/// Squared Euclidean distance between two equal-length vectors.
#[inline]
pub fn squared_euclidean_distance(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y).fold(0.0, |acc, (&a, &b)| {
        let d = a - b;
        acc + d * d
    })
}

// ============================================================================
// Products and reshapes
// ============================================================================

/// Fresh `cols x rows` transpose of `a`.
pub fn transpose(a: &Matrix) -> Result<Matrix> {
    let mut t = Matrix::zeros(a.cols, a.rows)?;
    for i in 0..a.rows {
        for j in 0..a.cols {
            t.data[j * a.rows + i] = a.data[i * a.cols + j];
        }
    }
    Ok(t)
}

/// Matrix product `a * b` as a freshly allocated `a.rows x b.cols` matrix.
///
/// Columns of `b` are gathered into a contiguous buffer first so each output
/// entry is a straight dot product. The inner sum runs over `k` in ascending
/// order from `0.0`.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols != b.rows {
        return Err(Error::shape("multiply", (a.cols, b.cols), b.shape()));
    }
    let (m, k, n) = (a.rows, a.cols, b.cols);
    let mut c = Matrix::zeros(m, n)?;
    if k == 0 {
        return Ok(c);
    }

    // Pre-gather B columns into contiguous layout
    let mut b_cols = try_alloc(n * k)?;
    for p in 0..k {
        for j in 0..n {
            b_cols[j * k + p] = b.data[p * n + j];
        }
    }

    for i in 0..m {
        let a_row = &a.data[i * k..(i + 1) * k];
        for j in 0..n {
            let b_col = &b_cols[j * k..(j + 1) * k];
            c.data[i * n + j] = a_row
                .iter()
                .zip(b_col)
                .fold(0.0, |acc, (&x, &y)| acc + x * y);
        }
    }
    Ok(c)
}

/// Q = D^(-1/2) for a diagonal `d`: `Q[i][i] = 1 / sqrt(D[i][i])`, zero elsewhere.
///
/// A zero on the diagonal means some point has no affinity to any other
/// point (duplicate or isolated input) and yields [`Error::DegenerateInput`].
pub fn inverse_sqrt_diagonal(d: &Matrix) -> Result<Matrix> {
    if !d.is_square() {
        return Err(Error::shape("inverse_sqrt_diagonal", (d.rows, d.rows), d.shape()));
    }
    let n = d.rows;
    let mut q = Matrix::zeros(n, n)?;
    for i in 0..n {
        let v = d.data[i * n + i];
        if v == 0.0 {
            return Err(Error::DegenerateInput { index: i });
        }
        q.data[i * n + i] = 1.0 / v.sqrt();
    }
    Ok(q)
}
