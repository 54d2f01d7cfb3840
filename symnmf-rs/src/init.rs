//! Initial factor for SymNMF.

use symnmf_core::{Error, Matrix, Result, SplitMix64};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 0;

/// Sample an n x k starting H with entries uniform in `[0, 2 * sqrt(m / k))`,
/// where `m` is the mean of all entries of `w`.
pub fn initial_h(w: &Matrix, k: usize, seed: u64) -> Result<Matrix> {
    if k == 0 {
        return Err(Error::invalid("k must be at least 1"));
    }
    if !w.is_square() {
        return Err(Error::shape("initial_h", (w.rows(), w.rows()), w.shape()));
    }
    let upper = 2.0 * (w.mean() / k as f64).sqrt();
    let mut h = Matrix::zeros(w.rows(), k)?;
    SplitMix64::new(seed).fill_uniform(h.as_mut_slice(), 0.0, upper);
    Ok(h)
}
