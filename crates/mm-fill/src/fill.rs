use mm_core::Matrix;

/// Trait for strategies that populate a matrix with input values.
pub trait Fill: Send + Sync {
    /// Returns the name of this fill strategy.
    fn name(&self) -> &str;

    /// Overwrite every element of `m`.
    fn fill(&self, m: &mut Matrix);

    /// Allocate an N x N matrix and fill it.
    fn generate(&self, n: usize) -> Matrix {
        let mut m = Matrix::zeros(n);
        self.fill(&mut m);
        m
    }
}

/// Row-major position of `(row, col)` counted from 1.
pub(crate) fn ordinal(n: usize, row: usize, col: usize) -> f32 {
    (row * n + col + 1) as f32
}
