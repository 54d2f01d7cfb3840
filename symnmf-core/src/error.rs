//! Error types for matrix and clustering operations.

use thiserror::Error;

/// Result type alias for symnmf operations.
pub type Result<T> = core::result::Result<T, Error>;

/// The single message shown to users for any failure.
pub const ERROR_MESSAGE: &str = "An Error Has Occurred";

/// Errors raised by the matrix layer, the pipeline and ingestion.
#[derive(Debug, Error)]
pub enum Error {
    /// Memory allocation for a matrix buffer failed.
    #[error("allocation failed: could not allocate {requested_bytes} bytes")]
    AllocationFailed { requested_bytes: usize },

    /// A degree-matrix diagonal entry is zero, so D^(-1/2) is undefined.
    #[error("degenerate input: diagonal entry {index} is zero, cannot take inverse square root")]
    DegenerateInput { index: usize },

    /// Operand dimensions do not agree.
    #[error("{op}: shape mismatch, expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        op: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Malformed numeric input.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// I/O error from the underlying source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Argument outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Create a shape mismatch error.
    pub fn shape(op: &'static str, expected: (usize, usize), actual: (usize, usize)) -> Self {
        Error::ShapeMismatch {
            op,
            expected,
            actual,
        }
    }

    /// Create a parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// True for failures caused by coinciding or isolated input points.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Error::DegenerateInput { .. })
    }
}
