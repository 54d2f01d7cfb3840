// bindings/python/src/functions.rs
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use symnmf_rs::{Error, Matrix, NmfConfig, ERROR_MESSAGE};
use tracing::debug;

/// Validate list-of-lists input into a rectangular matrix.
fn to_matrix(rows: &[Vec<f64>]) -> PyResult<Matrix> {
    Matrix::from_rows(rows).map_err(|e| {
        debug!(error = %e, "rejected python matrix");
        PyValueError::new_err(ERROR_MESSAGE)
    })
}

fn runtime_error(e: Error) -> PyErr {
    debug!(error = %e, "symnmf computation failed");
    PyRuntimeError::new_err(ERROR_MESSAGE)
}

/// Run one point-matrix analysis with the GIL released.
fn analyse(
    py: Python<'_>,
    x: Vec<Vec<f64>>,
    f: fn(&Matrix) -> symnmf_rs::Result<Matrix>,
) -> PyResult<Vec<Vec<f64>>> {
    let x = to_matrix(&x)?;
    let result = py.allow_threads(|| f(&x)).map_err(runtime_error)?;
    Ok(result.to_rows())
}

/// sym(X) -> similarity matrix A of the data points X.
#[pyfunction]
pub fn sym(py: Python<'_>, x: Vec<Vec<f64>>) -> PyResult<Vec<Vec<f64>>> {
    analyse(py, x, symnmf_rs::sym)
}

/// ddg(X) -> diagonal degree matrix D of the data points X.
#[pyfunction]
pub fn ddg(py: Python<'_>, x: Vec<Vec<f64>>) -> PyResult<Vec<Vec<f64>>> {
    analyse(py, x, symnmf_rs::ddg)
}

/// norm(X) -> normalized similarity matrix W of the data points X.
#[pyfunction]
pub fn norm(py: Python<'_>, x: Vec<Vec<f64>>) -> PyResult<Vec<Vec<f64>>> {
    analyse(py, x, symnmf_rs::norm)
}

/// symnmf(H, W, n, k) -> factor H refined against the normalized similarity W.
///
/// H must be n x k and W must be n x n.
#[pyfunction]
pub fn symnmf(
    py: Python<'_>,
    h: Vec<Vec<f64>>,
    w: Vec<Vec<f64>>,
    n: usize,
    k: usize,
) -> PyResult<Vec<Vec<f64>>> {
    let h = to_matrix(&h)?;
    let w = to_matrix(&w)?;
    if h.shape() != (n, k) || w.shape() != (n, n) {
        debug!(h = ?h.shape(), w = ?w.shape(), n, k, "symnmf shape mismatch");
        return Err(PyValueError::new_err(ERROR_MESSAGE));
    }
    let report = py
        .allow_threads(|| symnmf_rs::symnmf(h, &w, &NmfConfig::default()))
        .map_err(runtime_error)?;
    Ok(report.h.to_rows())
}
