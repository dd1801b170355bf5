//! Buffered reconstruction frames.

use crate::error::{EitViewError, Result};
use crate::io::TextMatrix;

/// A dense table of reconstruction values.
///
/// Rows are triangle ids, columns are time-ordered frames. Values are stored
/// column-major so that a single frame is a contiguous slice.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    rows: usize,
    columns: usize,
    data: Vec<f32>,
}

impl FrameBuffer {
    /// An all-zero buffer.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            data: vec![0.0; rows * columns],
        }
    }

    /// Creates a buffer from column-major values.
    pub fn from_column_major(rows: usize, columns: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * columns {
            return Err(EitViewError::SizeMismatch {
                expected: rows * columns,
                actual: data.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            data,
        })
    }

    /// Creates a buffer from a list of frames, each holding one value per row.
    pub fn from_frames(frames: &[Vec<f32>]) -> Result<Self> {
        let rows = frames.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows * frames.len());
        for frame in frames {
            if frame.len() != rows {
                return Err(EitViewError::SizeMismatch {
                    expected: rows,
                    actual: frame.len(),
                });
            }
            data.extend_from_slice(frame);
        }
        Self::from_column_major(rows, frames.len(), data)
    }

    /// Converts a text matrix whose rows are triangles and columns are frames.
    pub fn from_text_matrix(matrix: &TextMatrix) -> Self {
        let rows = matrix.rows();
        let columns = matrix.columns();
        let mut data = vec![0.0; rows * columns];
        for (row, values) in matrix.iter_rows().enumerate() {
            for (column, &value) in values.iter().enumerate() {
                data[column * rows + row] = value;
            }
        }
        Self {
            rows,
            columns,
            data,
        }
    }

    /// Number of rows (triangles).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (frames).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns true if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.columns == 0
    }

    /// One frame: a value per triangle.
    pub fn column(&self, index: usize) -> &[f32] {
        &self.data[index * self.rows..(index + 1) * self.rows]
    }

    /// Iterates over frames in time order.
    pub fn iter_columns(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on a zero chunk size
        self.data
            .chunks_exact(self.rows.max(1))
            .take(if self.rows == 0 { 0 } else { self.columns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_matrix;

    #[test]
    fn test_zeros() {
        let buffer = FrameBuffer::zeros(3, 2);
        assert_eq!(buffer.rows(), 3);
        assert_eq!(buffer.columns(), 2);
        assert_eq!(buffer.column(1), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_frames() {
        let buffer = FrameBuffer::from_frames(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(buffer.rows(), 2);
        assert_eq!(buffer.column(1), &[3.0, 4.0]);
        assert_eq!(buffer.iter_columns().count(), 2);
    }

    #[test]
    fn test_from_frames_ragged() {
        assert!(FrameBuffer::from_frames(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn test_from_text_matrix_transposes_storage() {
        // 2 triangles, 3 frames
        let matrix = parse_matrix("1 2 3\n4 5 6\n").unwrap();
        let buffer = FrameBuffer::from_text_matrix(&matrix);
        assert_eq!(buffer.rows(), 2);
        assert_eq!(buffer.columns(), 3);
        assert_eq!(buffer.column(0), &[1.0, 4.0]);
        assert_eq!(buffer.column(2), &[3.0, 6.0]);
    }

    #[test]
    fn test_empty() {
        let buffer = FrameBuffer::zeros(0, 0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.iter_columns().count(), 0);
    }
}
