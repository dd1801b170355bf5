//! Plain-text matrix files.
//!
//! Mesh nodes, elements, electrodes and recorded reconstructions are stored as
//! whitespace-separated numbers, one matrix row per line. Blank lines and lines
//! starting with `#` are ignored.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{EitViewError, Result};

/// A dense row-major matrix read from or written to a text file.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatrix {
    rows: usize,
    columns: usize,
    values: Vec<f32>,
}

impl TextMatrix {
    /// Creates a matrix from row-major values.
    pub fn new(rows: usize, columns: usize, values: Vec<f32>) -> Result<Self> {
        if values.len() != rows * columns {
            return Err(EitViewError::SizeMismatch {
                expected: rows * columns,
                actual: values.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            values,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns one row as a slice.
    pub fn row(&self, index: usize) -> &[f32] {
        &self.values[index * self.columns..(index + 1) * self.columns]
    }

    /// Returns a single entry.
    pub fn get(&self, row: usize, column: usize) -> f32 {
        self.values[row * self.columns + column]
    }

    /// Iterates over all rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on a zero chunk size
        self.values.chunks_exact(self.columns.max(1))
    }

    /// Row-major values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Parses a whitespace-separated matrix.
///
/// Every non-empty row must have the same number of columns.
pub fn parse_matrix(src: &str) -> Result<TextMatrix> {
    let mut values = Vec::new();
    let mut columns: Option<usize> = None;
    let mut rows = 0;

    for (lineno, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let before = values.len();
        for token in line.split_whitespace() {
            let value: f32 = token.parse().map_err(|_| EitViewError::Parse {
                line: lineno + 1,
                message: format!("'{token}' is not a number"),
            })?;
            values.push(value);
        }

        let width = values.len() - before;
        match columns {
            None => columns = Some(width),
            Some(expected) if expected != width => {
                return Err(EitViewError::Parse {
                    line: lineno + 1,
                    message: format!("expected {expected} columns, found {width}"),
                });
            }
            Some(_) => {}
        }
        rows += 1;
    }

    TextMatrix::new(rows, columns.unwrap_or(0), values)
}

/// Loads a matrix from a text file.
pub fn load_matrix(path: impl AsRef<Path>) -> Result<TextMatrix> {
    let path = path.as_ref();
    let src = fs::read_to_string(path)?;
    let matrix = parse_matrix(&src)?;
    log::debug!(
        "loaded {}x{} matrix from {}",
        matrix.rows(),
        matrix.columns(),
        path.display()
    );
    Ok(matrix)
}

/// Writes rows of values, space separated, one row per line.
pub fn write_matrix<'a, W, I>(writer: &mut W, rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a [f32]>,
{
    for row in rows {
        let mut first = true;
        for value in row {
            if first {
                write!(writer, "{value}")?;
                first = false;
            } else {
                write!(writer, " {value}")?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Saves a matrix to a text file.
pub fn save_matrix(path: impl AsRef<Path>, matrix: &TextMatrix) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_matrix(&mut writer, matrix.iter_rows())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matrix() {
        let src = "# nodes\n0 0\n1.5 0\n\n0 -2\n";
        let m = parse_matrix(src).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.columns(), 2);
        assert_eq!(m.row(1), &[1.5, 0.0]);
        assert_eq!(m.get(2, 1), -2.0);
    }

    #[test]
    fn test_parse_ragged_rows() {
        let err = parse_matrix("1 2 3\n4 5\n").unwrap_err();
        match err {
            EitViewError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_bad_token() {
        let err = parse_matrix("1 x\n").unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_parse_empty() {
        let m = parse_matrix("\n# nothing\n").unwrap();
        assert_eq!(m.rows(), 0);
        assert_eq!(m.columns(), 0);
        assert_eq!(m.iter_rows().count(), 0);
    }

    #[test]
    fn test_write_then_parse() {
        let m = TextMatrix::new(2, 3, vec![1.0, 2.0, 3.0, -0.5, 0.25, 8.0]).unwrap();
        let mut out = Vec::new();
        write_matrix(&mut out, m.iter_rows()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().next(), Some("1 2 3"));
        assert_eq!(parse_matrix(&text).unwrap(), m);
    }

    #[test]
    fn test_new_size_mismatch() {
        assert!(matches!(
            TextMatrix::new(2, 2, vec![1.0]),
            Err(EitViewError::SizeMismatch {
                expected: 4,
                actual: 1
            })
        ));
    }
}
