//! Similarity pipeline: points → similarity A → degree D → normalized W.
//!
//! `sym`, `ddg` and `norm` are the three analysis goals; each takes the raw
//! point matrix (n x d) and returns an n x n matrix. The step-by-step
//! helpers `degree_matrix` and `normalized_similarity` are public so callers
//! can reuse an already computed A.

use symnmf_core::{inverse_sqrt_diagonal, multiply, squared_euclidean_distance, Error, Matrix, Result};
use tracing::debug;

/// Denominator of the Gaussian kernel exponent.
const KERNEL_BANDWIDTH: f64 = 2.0;

fn check_points(x: &Matrix) -> Result<()> {
    if x.rows() == 0 || x.cols() == 0 {
        return Err(Error::invalid(format!(
            "point set must be non-empty, got {}x{}",
            x.rows(),
            x.cols()
        )));
    }
    Ok(())
}

/// Similarity matrix: `A[i][j] = exp(-||x_i - x_j||^2 / 2)` for `i != j`,
/// zero on the diagonal.
pub fn sym(x: &Matrix) -> Result<Matrix> {
    check_points(x)?;
    let n = x.rows();
    let mut a = Matrix::zeros(n, n)?;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                let dist = squared_euclidean_distance(x.row(i), x.row(j));
                a[(i, j)] = (-dist / KERNEL_BANDWIDTH).exp();
            }
        }
    }
    debug!(n, d = x.cols(), "similarity matrix built");
    Ok(a)
}

/// Diagonal degree matrix of a similarity matrix: `D[i][i] = sum_j A[i][j]`.
pub fn degree_matrix(a: &Matrix) -> Result<Matrix> {
    if !a.is_square() {
        return Err(Error::shape("degree_matrix", (a.rows(), a.rows()), a.shape()));
    }
    let n = a.rows();
    let mut d = Matrix::zeros(n, n)?;
    for (i, row) in a.row_iter().enumerate() {
        d[(i, i)] = row.iter().fold(0.0, |acc, &v| acc + v);
    }
    Ok(d)
}

/// `W = D^(-1/2) * A * D^(-1/2)`.
///
/// Fails with [`Error::DegenerateInput`] when any degree is zero.
pub fn normalized_similarity(a: &Matrix, d: &Matrix) -> Result<Matrix> {
    if a.shape() != d.shape() {
        return Err(Error::shape("normalized_similarity", a.shape(), d.shape()));
    }
    let q = inverse_sqrt_diagonal(d)?;
    let qa = multiply(&q, a)?;
    multiply(&qa, &q)
}

/// Degree matrix of the points' similarity matrix.
pub fn ddg(x: &Matrix) -> Result<Matrix> {
    let a = sym(x)?;
    degree_matrix(&a)
}

/// Normalized similarity matrix of the points.
pub fn norm(x: &Matrix) -> Result<Matrix> {
    let a = sym(x)?;
    let d = degree_matrix(&a)?;
    let w = normalized_similarity(&a, &d)?;
    debug!(n = w.rows(), "normalized similarity built");
    Ok(w)
}
