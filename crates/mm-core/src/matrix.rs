use std::ops::{Index, IndexMut};

use crate::error::{MatrixError, Result};
use crate::view::{BlockMut, MatrixView};

/// A dense N x N matrix of f32 values.
///
/// Elements are stored contiguously in row-major order: element `(row, col)`
/// lives at index `col + row * n`. An edge length of 0 is a valid, empty
/// matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    n: usize,
}

impl Matrix {
    /// Create a zero-filled N x N matrix.
    pub fn zeros(n: usize) -> Self {
        Matrix {
            data: vec![0.0; n * n],
            n,
        }
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if `data.len() != n * n`.
    pub fn from_vec(data: Vec<f32>, n: usize) -> Result<Self> {
        if data.len() != n * n {
            return Err(MatrixError::LengthMismatch {
                n,
                len: data.len(),
            });
        }
        Ok(Matrix { data, n })
    }

    /// Create a matrix whose element `(row, col)` is `f(row, col)`.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                data.push(f(row, col));
            }
        }
        Matrix { data, n }
    }

    /// Create the N x N identity matrix.
    pub fn identity(n: usize) -> Self {
        Matrix::from_fn(n, |row, col| if row == col { 1.0 } else { 0.0 })
    }

    /// Edge length N.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of elements (N * N).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for the degenerate 0 x 0 matrix.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns element `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.n && col < self.n {
            Some(self.data[col + row * self.n])
        } else {
            None
        }
    }

    /// Overwrites element `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self[(row, col)] = value;
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= n`.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Overwrites every element with `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// A read view covering the whole matrix.
    pub fn view(&self) -> MatrixView<'_> {
        MatrixView::whole(&self.data, self.n)
    }

    /// A write block covering the whole matrix.
    pub fn block_mut(&mut self) -> BlockMut<'_> {
        BlockMut::whole(&mut self.data, self.n)
    }

    /// Copies `self` into the top-left corner of a zero-filled `edge` x `edge`
    /// matrix. `edge` must be at least `n`.
    pub(crate) fn padded_to(&self, edge: usize) -> Matrix {
        debug_assert!(edge >= self.n);
        let mut out = Matrix::zeros(edge);
        for i in 0..self.n {
            out.data[i * edge..i * edge + self.n].copy_from_slice(self.row(i));
        }
        out
    }

    /// Copies the top-left `self.n` x `self.n` corner of `padded` into `self`.
    pub(crate) fn copy_corner_from(&mut self, padded: &Matrix) {
        debug_assert!(padded.n >= self.n);
        let n = self.n;
        for i in 0..n {
            self.data[i * n..(i + 1) * n].copy_from_slice(&padded.row(i)[..n]);
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(
            row < self.n && col < self.n,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.n,
            self.n
        );
        &self.data[col + row * self.n]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(
            row < self.n && col < self.n,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.n,
            self.n
        );
        &mut self.data[col + row * self.n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 3.0);
        assert_eq!(m.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = Matrix::from_vec(vec![1.0, 2.0, 3.0], 2).unwrap_err();
        assert!(matches!(err, MatrixError::LengthMismatch { n: 2, len: 3 }));
    }

    #[test]
    fn test_from_fn_and_get() {
        let m = Matrix::from_fn(3, |r, c| (r * 3 + c) as f32);
        assert_eq!(m.get(2, 1), Some(7.0));
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    fn test_empty_matrix() {
        let m = Matrix::zeros(0);
        assert!(m.is_empty());
        assert_eq!(m.n(), 0);
        assert_eq!(m.len(), 0);
    }

    #[test]
    fn test_identity_and_set() {
        let mut m = Matrix::identity(3);
        assert_eq!(m.as_slice(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        m.set(0, 2, 5.0);
        assert_eq!(m[(0, 2)], 5.0);
    }

    #[test]
    fn test_pad_and_copy_back() {
        let m = Matrix::from_fn(3, |r, c| (r * 3 + c + 1) as f32);
        let padded = m.padded_to(4);
        assert_eq!(padded.row(0), &[1.0, 2.0, 3.0, 0.0]);
        assert_eq!(padded.row(3), &[0.0; 4]);

        let mut back = Matrix::zeros(3);
        back.copy_corner_from(&padded);
        assert_eq!(back, m);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let m = Matrix::zeros(2);
        let _ = m[(2, 0)];
    }
}
