//! Analysis goals selectable from the command line.

use std::fmt;
use std::str::FromStr;

use symnmf_core::{Error, Matrix, Result};
use tracing::info;

use crate::factorize::{symnmf, NmfConfig};
use crate::init::initial_h;
use crate::similarity::{ddg, norm, sym};

/// Which matrix to compute from the input points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// Full clustering: factor H (n x k).
    SymNmf,
    /// Similarity matrix A.
    Sym,
    /// Diagonal degree matrix D.
    Ddg,
    /// Normalized similarity matrix W.
    Norm,
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::SymNmf => "symnmf",
            Goal::Sym => "sym",
            Goal::Ddg => "ddg",
            Goal::Norm => "norm",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "symnmf" => Ok(Goal::SymNmf),
            "sym" => Ok(Goal::Sym),
            "ddg" => Ok(Goal::Ddg),
            "norm" => Ok(Goal::Norm),
            other => Err(Error::invalid(format!("unknown goal {:?}", other))),
        }
    }
}

/// Parameters only the `symnmf` goal uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    /// Number of clusters; must satisfy `1 <= k < n`.
    pub k: usize,
    /// Seed for the initial H.
    pub seed: u64,
    pub config: NmfConfig,
}

/// Compute `goal` for the point set `x`.
///
/// `params` is required for [`Goal::SymNmf`] and ignored otherwise.
pub fn run_goal(goal: Goal, x: &Matrix, params: Option<&ClusterParams>) -> Result<Matrix> {
    info!(%goal, n = x.rows(), d = x.cols(), "running goal");
    match goal {
        Goal::Sym => sym(x),
        Goal::Ddg => ddg(x),
        Goal::Norm => norm(x),
        Goal::SymNmf => {
            let params =
                params.ok_or_else(|| Error::invalid("the symnmf goal requires k"))?;
            let n = x.rows();
            if params.k == 0 || params.k >= n {
                return Err(Error::invalid(format!(
                    "k must satisfy 1 <= k < n, got k={} n={}",
                    params.k, n
                )));
            }
            let w = norm(x)?;
            let h0 = initial_h(&w, params.k, params.seed)?;
            let report = symnmf(h0, &w, &params.config)?;
            info!(
                iterations = report.iterations,
                delta = report.last_delta,
                converged = report.converged,
                "symnmf finished"
            );
            Ok(report.h)
        }
    }
}
