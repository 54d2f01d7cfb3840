// bindings/python/src/lib.rs

#![allow(non_local_definitions)]

use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

mod functions;

use functions::*;

#[pymodule]
fn symnmfmodule(_py: Python, m: &PyModule) -> PyResult<()> {
    // Analysis goals over raw points
    m.add_function(wrap_pyfunction!(sym, m)?)?;
    m.add_function(wrap_pyfunction!(ddg, m)?)?;
    m.add_function(wrap_pyfunction!(norm, m)?)?;

    // Factorization
    m.add_function(wrap_pyfunction!(symnmf, m)?)?;

    m.add("ERROR_MESSAGE", symnmf_rs::ERROR_MESSAGE)?;
    Ok(())
}
