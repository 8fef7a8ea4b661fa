use std::fmt;

use tracing::warn;

use crate::error::{ensure_same_edge, Result};
use crate::matrix::Matrix;

/// Largest absolute difference two results may have and still agree.
pub const DEFAULT_EPSILON: f32 = 1e-4;

/// One cell where two results disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    pub row: usize,
    pub col: usize,
    pub left: f32,
    pub right: f32,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}): {:?} != {:?}", self.row, self.col, self.left, self.right)
    }
}

/// Outcome of comparing two matrices cell by cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyReport {
    /// Cells compared.
    pub cells: usize,
    /// Cells outside tolerance, in row-major order.
    pub mismatches: Vec<Mismatch>,
    /// Largest finite absolute difference seen.
    pub max_abs_diff: f32,
}

impl VerifyReport {
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Elementwise approximate-equality checker.
///
/// Disagreement is reported, never treated as a failure: every cell is
/// scanned and each mismatch is logged and collected.
#[derive(Debug, Clone, Copy)]
pub struct Verifier {
    epsilon: f32,
}

impl Verifier {
    pub fn new() -> Self {
        Verifier {
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub fn with_epsilon(epsilon: f32) -> Self {
        Verifier { epsilon }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Compares `x` against `y`.
    ///
    /// A cell mismatches when `|x - y| > epsilon` or the difference is NaN.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the edges differ.
    pub fn verify(&self, x: &Matrix, y: &Matrix) -> Result<VerifyReport> {
        ensure_same_edge(x.n(), y.n())?;

        let n = x.n();
        let mut report = VerifyReport {
            cells: x.len(),
            ..VerifyReport::default()
        };
        for i in 0..n {
            for (j, (&left, &right)) in x.row(i).iter().zip(y.row(i)).enumerate() {
                let diff = (left - right).abs();
                if diff.is_finite() {
                    report.max_abs_diff = report.max_abs_diff.max(diff);
                }
                if diff.is_nan() || diff > self.epsilon {
                    warn!(row = i, col = j, left, right, diff, "results disagree");
                    report.mismatches.push(Mismatch {
                        row: i,
                        col: j,
                        left,
                        right,
                    });
                }
            }
        }
        Ok(report)
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_matrices_match() {
        let x = Matrix::from_fn(8, |r, c| (r * 8 + c) as f32);
        let report = Verifier::new().verify(&x, &x.clone()).unwrap();
        assert!(report.is_match());
        assert_eq!(report.cells, 64);
        assert_eq!(report.max_abs_diff, 0.0);
    }

    #[test]
    fn test_single_mismatch_reported() {
        let y = Matrix::from_fn(4, |r, c| (r + c) as f32 * 0.25);
        let mut x = y.clone();
        x.set(0, 0, y[(0, 0)] + 1.0);

        let report = Verifier::new().verify(&x, &y).unwrap();
        assert_eq!(
            report.mismatches,
            vec![Mismatch {
                row: 0,
                col: 0,
                left: 1.0,
                right: 0.0,
            }]
        );
        assert_eq!(report.mismatches[0].to_string(), "(0, 0): 1.0 != 0.0");
    }

    #[test]
    fn test_within_tolerance() {
        let y = Matrix::from_fn(3, |_, _| 10.0);
        let x = Matrix::from_fn(3, |_, _| 10.0 + 5e-5);
        assert!(Verifier::new().verify(&x, &y).unwrap().is_match());
        assert!(!Verifier::with_epsilon(1e-6).verify(&x, &y).unwrap().is_match());
    }

    #[test]
    fn test_scans_every_cell() {
        let y = Matrix::zeros(3);
        let x = Matrix::from_fn(3, |r, c| if r == c { 1.0 } else { 0.0 });
        let report = Verifier::new().verify(&x, &y).unwrap();
        let cells: Vec<(usize, usize)> = report.mismatches.iter().map(|m| (m.row, m.col)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(report.max_abs_diff, 1.0);
    }

    #[test]
    fn test_nan_is_mismatch() {
        let y = Matrix::zeros(2);
        let mut x = Matrix::zeros(2);
        x.set(1, 0, f32::NAN);
        let report = Verifier::new().verify(&x, &y).unwrap();
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!((report.mismatches[0].row, report.mismatches[0].col), (1, 0));
    }

    #[test]
    fn test_dimension_mismatch() {
        assert!(Verifier::new()
            .verify(&Matrix::zeros(2), &Matrix::zeros(3))
            .is_err());
    }
}
