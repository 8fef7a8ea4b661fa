use std::fmt::Debug;

use crate::error::{ensure_same_edge, Result};
use crate::matrix::Matrix;

/// Trait for interchangeable square matrix multiplication strategies.
///
/// Every implementation computes `C = A * B` for N x N operands and fully
/// overwrites `c`; callers do not need to clear it first.
pub trait MatmulBackend: Send + Sync + Debug {
    /// Returns the name of this strategy (e.g., "sequential", "recursive").
    fn name(&self) -> &str;

    /// Matrix multiplication: C = A * B.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the three edge lengths differ.
    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()>;
}

/// Checks that `b` and `c` have the same edge length as `a`.
pub(crate) fn check_operands(a: &Matrix, b: &Matrix, c: &Matrix) -> Result<()> {
    ensure_same_edge(a.n(), b.n())?;
    ensure_same_edge(a.n(), c.n())
}
