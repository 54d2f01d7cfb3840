//! # SymNMF Core
//!
//! Matrix primitive layer shared by the symnmf workspace.
//!
//! This crate provides:
//! - **Matrix**: owned dense row-major `f64` container with fallible allocation.
//! - **Primitives**: copy, transpose, multiply, difference, squared Frobenius
//!   norm, inverse-sqrt-diagonal, squared Euclidean distance.
//! - **Error**: the workspace error type and `Result` alias.
//! - **SplitMix64**: deterministic PRNG for seeded initialisation.

// Numeric kernels use index loops on packed arrays where iterators hurt readability.
#![allow(clippy::needless_range_loop)]

pub mod error;
pub mod matrix;
pub mod rng;

pub use error::{Error, Result, ERROR_MESSAGE};
pub use matrix::{
    copy_into, difference, frobenius_squared_norm, inverse_sqrt_diagonal, multiply,
    squared_euclidean_distance, transpose, Matrix,
};
pub use rng::SplitMix64;
