//! Factorization engine: multiplicative-update SymNMF.
//!
//! Refines a non-negative n x k factor H so that `H * H^T` approximates the
//! normalized similarity W. Each iteration applies
//!
//! ```text
//! H[i][j] <- H[i][j] * (1 - beta + beta * (W H)[i][j] / (H H^T H)[i][j])
//! ```
//!
//! and the loop stops once `||H - H_old||_F^2 < eps` or after `max_iter`
//! updates. W is only borrowed; H is updated in place.
//!
//! The update divides by `(H H^T H)[i][j]` with plain IEEE semantics. A zero
//! denominator (e.g. an all-zero row of H) produces NaN or infinity exactly as
//! floating-point division does; no tie-breaking is applied.

use symnmf_core::{
    copy_into, difference, frobenius_squared_norm, multiply, transpose, Error, Matrix, Result,
};
use tracing::{debug, warn};

/// Iteration parameters for [`symnmf`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NmfConfig {
    /// Maximum number of updates.
    pub max_iter: usize,
    /// Convergence threshold on the squared Frobenius norm of the step.
    pub eps: f64,
    /// Damping factor of the multiplicative update.
    pub beta: f64,
}

impl Default for NmfConfig {
    fn default() -> Self {
        Self {
            max_iter: 300,
            eps: 1e-4,
            beta: 0.5,
        }
    }
}

impl NmfConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(Error::invalid("max_iter must be at least 1"));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(Error::invalid(format!("eps must be positive, got {}", self.eps)));
        }
        if !(self.beta > 0.0 && self.beta <= 1.0) {
            return Err(Error::invalid(format!(
                "beta must lie in (0, 1], got {}",
                self.beta
            )));
        }
        Ok(())
    }
}

/// Outcome of a factorization run.
#[derive(Debug, Clone)]
pub struct FactorizationReport {
    /// Final factor H (n x k).
    pub h: Matrix,
    /// Number of updates applied.
    pub iterations: usize,
    /// Squared Frobenius norm of the last step.
    pub last_delta: f64,
    /// Whether the step fell below `eps` before `max_iter` ran out.
    pub converged: bool,
}

/// Compute `W * H` and `H * H^T * H` for one update.
///
/// `H^T` and `H * H^T` are dropped as soon as `H * H^T * H` exists.
pub fn update_products(h: &Matrix, w: &Matrix) -> Result<(Matrix, Matrix)> {
    let wh = multiply(w, h)?;
    let hhth = {
        let ht = transpose(h)?;
        let hht = multiply(h, &ht)?;
        multiply(&hht, h)?
    };
    Ok((wh, hhth))
}

/// Apply one multiplicative update to `h` in place.
pub fn update_h(h: &mut Matrix, w: &Matrix, beta: f64) -> Result<()> {
    let (wh, hhth) = update_products(h, w)?;
    for ((v, &num), &den) in h
        .as_mut_slice()
        .iter_mut()
        .zip(wh.as_slice())
        .zip(hhth.as_slice())
    {
        *v *= 1.0 - beta + beta * (num / den);
    }
    Ok(())
}

/// Objective `||W - H * H^T||_F^2`.
pub fn reconstruction_error(h: &Matrix, w: &Matrix) -> Result<f64> {
    check_shapes(h, w)?;
    let ht = transpose(h)?;
    let hht = multiply(h, &ht)?;
    let mut residual = Matrix::zeros(w.rows(), w.cols())?;
    difference(&mut residual, w, &hht)?;
    Ok(frobenius_squared_norm(&residual))
}

fn check_shapes(h: &Matrix, w: &Matrix) -> Result<()> {
    let n = h.rows();
    if n == 0 || h.cols() == 0 {
        return Err(Error::invalid(format!(
            "H must be non-empty, got {}x{}",
            h.rows(),
            h.cols()
        )));
    }
    if w.shape() != (n, n) {
        return Err(Error::shape("symnmf", (n, n), w.shape()));
    }
    Ok(())
}

/// Run SymNMF from the initial factor `h` against the fixed target `w`.
///
/// `h` is consumed and returned, updated, inside the report.
pub fn symnmf(mut h: Matrix, w: &Matrix, config: &NmfConfig) -> Result<FactorizationReport> {
    config.validate()?;
    check_shapes(&h, w)?;

    let (n, k) = h.shape();
    let mut h_old = Matrix::zeros(n, k)?;
    let mut h_diff = Matrix::zeros(n, k)?;

    let mut iterations = 0;
    let mut last_delta = f64::INFINITY;
    let mut converged = false;

    for iter in 0..config.max_iter {
        copy_into(&mut h_old, &h)?;
        update_h(&mut h, w, config.beta)?;
        difference(&mut h_diff, &h, &h_old)?;
        last_delta = frobenius_squared_norm(&h_diff);
        iterations = iter + 1;
        debug!(iter, delta = last_delta, "symnmf update");
        if last_delta < config.eps {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            max_iter = config.max_iter,
            delta = last_delta,
            "symnmf stopped at iteration cap without converging"
        );
    }

    Ok(FactorizationReport {
        h,
        iterations,
        last_delta,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::norm;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_non_negative(seed: u64, rows: usize, cols: usize, high: f64) -> Matrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..rows * cols).map(|_| rng.gen_range(0.0..high)).collect();
        Matrix::from_vec(rows, cols, data).unwrap()
    }

    fn two_blobs() -> Matrix {
        Matrix::from_rows(&[
            [0.0, 0.0],
            [0.2, 0.1],
            [0.1, 0.3],
            [5.0, 5.0],
            [5.2, 4.9],
        ])
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let c = NmfConfig::default();
        assert_eq!(c.max_iter, 300);
        assert_eq!(c.eps, 1e-4);
        assert_eq!(c.beta, 0.5);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let bad = [
            NmfConfig { max_iter: 0, ..Default::default() },
            NmfConfig { eps: 0.0, ..Default::default() },
            NmfConfig { eps: f64::NAN, ..Default::default() },
            NmfConfig { beta: 0.0, ..Default::default() },
            NmfConfig { beta: 1.5, ..Default::default() },
        ];
        for c in bad {
            assert!(c.validate().is_err(), "{:?} should be rejected", c);
        }
    }

    #[test]
    fn test_update_h_single_entry() {
        // H = [[h]], W = [[w]]: WH = w*h, HHtH = h^3
        let mut h = Matrix::from_rows(&[[2.0]]).unwrap();
        let w = Matrix::from_rows(&[[16.0]]).unwrap();
        update_h(&mut h, &w, 0.5).unwrap();
        // 2 * (0.5 + 0.5 * 32 / 8) = 5
        assert_eq!(h[(0, 0)], 5.0);
    }

    #[test]
    fn test_zero_denominator_follows_ieee() {
        let mut h = Matrix::from_rows(&[[0.0]]).unwrap();
        let w = Matrix::from_rows(&[[1.0]]).unwrap();
        update_h(&mut h, &w, 0.5).unwrap();
        // 0 * (0.5 + 0.5 * 0/0) = NaN
        assert!(h[(0, 0)].is_nan());
    }

    #[test]
    fn test_symnmf_shape_and_non_negative() {
        let w = norm(&two_blobs()).unwrap();
        let h0 = random_non_negative(5, 5, 2, 1.0);
        let report = symnmf(h0, &w, &NmfConfig::default()).unwrap();
        assert_eq!(report.h.shape(), (5, 2));
        assert!(report.h.is_non_negative());
        assert!(report.iterations >= 1 && report.iterations <= 300);
    }

    #[test]
    fn test_symnmf_deterministic() {
        let w = norm(&two_blobs()).unwrap();
        let h0 = random_non_negative(9, 5, 2, 1.0);
        let a = symnmf(h0.clone(), &w, &NmfConfig::default()).unwrap();
        let b = symnmf(h0, &w, &NmfConfig::default()).unwrap();
        assert_eq!(a.h, b.h);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_symnmf_converges_on_separated_clusters() {
        let w = norm(&two_blobs()).unwrap();
        let h0 = random_non_negative(13, 5, 2, 0.8);
        let report = symnmf(h0, &w, &NmfConfig::default()).unwrap();
        assert!(report.converged);
        assert!(report.last_delta < 1e-4);
        assert!(report.iterations < 300);
    }

    #[test]
    fn test_symnmf_reduces_reconstruction_error() {
        let w = norm(&two_blobs()).unwrap();
        let h0 = random_non_negative(17, 5, 2, 1.0);
        let before = reconstruction_error(&h0, &w).unwrap();
        let report = symnmf(h0, &w, &NmfConfig::default()).unwrap();
        let after = reconstruction_error(&report.h, &w).unwrap();
        assert!(after < before, "objective went from {} to {}", before, after);
    }

    #[test]
    fn test_reconstruction_error_exact_factor() {
        // W = h h^T exactly
        let h = Matrix::from_rows(&[[1.0], [2.0]]).unwrap();
        let w = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert_eq!(reconstruction_error(&h, &w).unwrap(), 0.0);
    }

    #[test]
    fn test_symnmf_respects_iteration_cap() {
        let w = norm(&two_blobs()).unwrap();
        let h0 = random_non_negative(21, 5, 2, 1.0);
        let config = NmfConfig {
            max_iter: 1,
            eps: 1e-300,
            ..Default::default()
        };
        let report = symnmf(h0, &w, &config).unwrap();
        assert_eq!(report.iterations, 1);
        assert!(!report.converged);
    }

    #[test]
    fn test_symnmf_rejects_mismatched_w() {
        let h0 = Matrix::zeros(4, 2).unwrap();
        let w = Matrix::zeros(3, 3).unwrap();
        assert!(matches!(
            symnmf(h0, &w, &NmfConfig::default()),
            Err(Error::ShapeMismatch { op: "symnmf", .. })
        ));
    }
}
