//! Data ingestion: comma-delimited numeric rows into a dense point matrix.
//!
//! One row per line, values separated by [`DELIMITER`]. The number of
//! columns is fixed by the first row; every later row must match it.
//! Trailing blank lines and `\r\n` endings are accepted. The matrix is
//! sized from the line count and the first row, then filled in one pass.

use std::fs;
use std::path::Path;

use symnmf_core::{Error, Matrix, Result};
use tracing::debug;

/// Value separator within a row.
pub const DELIMITER: char = ',';

/// Parse delimited rows from an in-memory string.
///
/// Leading blanks before a value are skipped; anything else between a value
/// and the next delimiter or line end is a parse error.
pub fn parse_data(text: &str) -> Result<Matrix> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(Error::parse(1, "input contains no data rows"));
    }

    let rows = lines.len();
    let cols = lines[0].split(DELIMITER).count();
    let mut x = Matrix::zeros(rows, cols)?;

    for (i, line) in lines.iter().enumerate() {
        let line_no = i + 1;
        let mut width = 0;
        for (j, token) in line.split(DELIMITER).enumerate() {
            let token = token.trim_start();
            if token.is_empty() {
                return Err(Error::parse(line_no, "missing value between delimiters"));
            }
            let value: f64 = token
                .parse()
                .map_err(|_| Error::parse(line_no, format!("invalid number {:?}", token)))?;
            if j < cols {
                x[(i, j)] = value;
            }
            width = j + 1;
        }
        if width != cols {
            return Err(Error::parse(
                line_no,
                format!("expected {} values, found {}", cols, width),
            ));
        }
    }

    debug!(rows, cols, "parsed point set");
    Ok(x)
}

/// Read and parse a data file.
pub fn read_data(path: impl AsRef<Path>) -> Result<Matrix> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "read data file");
    parse_data(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_basic() {
        let m = parse_data("1.0,2.5\n-3,4e-1\n").unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.as_slice(), &[1.0, 2.5, -3.0, 0.4]);
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let m = parse_data("1,2,3\n4,5,6").unwrap();
        assert_eq!(m.shape(), (2, 3));
    }

    #[test]
    fn test_parse_crlf_and_trailing_blank_lines() {
        let m = parse_data("1,2\r\n3,4\r\n\n\n").unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_parse_rejects_wrong_delimiter() {
        let err = parse_data("1;2\n3;4\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_space_before_delimiter() {
        assert!(parse_data("1.0 ,2.0\n3.0,4.0\n").is_err());
        assert!(parse_data("1.0,2.0\n3.0,4.0 \n").is_err());
        assert!(parse_data("1.0\t,2.0\n").is_err());
    }

    #[test]
    fn test_parse_skips_leading_blanks() {
        let m = parse_data(" 1.0, 2.0\n3.0,  4.0\n").unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = parse_data("1,2\n3\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
        let err = parse_data("1,2\n3,4,5\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_empty_field_and_empty_input() {
        assert!(parse_data("1,,2\n").is_err());
        assert!(parse_data("").is_err());
        assert!(parse_data("\n\n").is_err());
        assert!(parse_data("1,2\n\n3,4\n").is_err());
    }

    #[test]
    fn test_read_data_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.5,1.5").unwrap();
        writeln!(file, "2.5,3.5").unwrap();
        writeln!(file, "4.5,5.5").unwrap();
        let m = read_data(file.path()).unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m[(2, 1)], 5.5);
    }

    #[test]
    fn test_read_data_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_data(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
