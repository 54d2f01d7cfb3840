//! # SymNMF-Rs
//!
//! Symmetric Non-negative Matrix Factorization clustering.
//!
//! Points (n x d) flow through the similarity pipeline into the
//! factorization engine:
//!
//! 1. [`sym`]: Gaussian similarity matrix A
//! 2. [`ddg`]: diagonal degree matrix D
//! 3. [`norm`]: normalized similarity W = D^(-1/2) A D^(-1/2)
//! 4. [`symnmf`]: multiplicative updates on H (n x k) until convergence
//!
//! ```
//! use symnmf_rs::{initial_h, norm, symnmf, Matrix, NmfConfig};
//!
//! let x = Matrix::from_rows(&[[0.0, 0.0], [0.1, 0.1], [3.0, 3.0], [3.1, 2.9]]).unwrap();
//! let w = norm(&x).unwrap();
//! let h0 = initial_h(&w, 2, 0).unwrap();
//! let report = symnmf(h0, &w, &NmfConfig::default()).unwrap();
//! assert_eq!(report.h.shape(), (4, 2));
//! ```

// Numeric kernels use index loops where iterators hurt readability.
#![allow(clippy::needless_range_loop)]

pub mod factorize;
pub mod goal;
pub mod ingest;
pub mod init;
pub mod output;
pub mod similarity;

pub use factorize::{
    reconstruction_error, symnmf, update_h, update_products, FactorizationReport, NmfConfig,
};
pub use goal::{run_goal, ClusterParams, Goal};
pub use ingest::{parse_data, read_data, DELIMITER};
pub use init::{initial_h, DEFAULT_SEED};
pub use output::{format_matrix, write_matrix};
pub use similarity::{ddg, degree_matrix, norm, normalized_similarity, sym};

pub use symnmf_core::{Error, Matrix, Result, ERROR_MESSAGE};
