//! Matrix output in the `%.4f`, comma-separated row format.

use std::io::{self, Write};

use symnmf_core::Matrix;

/// Render `m` as text, one row per line.
pub fn format_matrix(m: &Matrix) -> String {
    m.to_string()
}

/// Write `m` to `out` and flush.
pub fn write_matrix<W: Write>(out: &mut W, m: &Matrix) -> io::Result<()> {
    write!(out, "{}", m)?;
    out.flush()
}
