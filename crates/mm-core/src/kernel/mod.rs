pub mod flat;
pub mod recursive;

use crate::backend::{check_operands, MatmulBackend};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::view::{BlockMut, MatrixView};

/// Single-threaded reference multiplier.
///
/// Computes each output cell as a full dot product accumulated in a local
/// and stored once. The summation order is fixed, so results are
/// deterministic; the parallel engines are checked against it.
#[derive(Debug, Clone)]
pub struct SequentialKernel;

impl SequentialKernel {
    pub fn new() -> Self {
        SequentialKernel
    }
}

impl Default for SequentialKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl MatmulBackend for SequentialKernel {
    fn name(&self) -> &str {
        "sequential"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        check_operands(a, b, c)?;

        let n = a.n();
        let (a, b) = (a.as_slice(), b.as_slice());
        let c = c.as_mut_slice();
        for i in 0..n {
            for j in 0..n {
                let mut sum = 0.0f32;
                for k in 0..n {
                    sum += a[k + i * n] * b[j + k * n];
                }
                c[j + i * n] = sum;
            }
        }
        Ok(())
    }
}

/// Direct accumulation `C += A * B` over one block.
///
/// All three operands must have the same edge length. Accumulates straight
/// into the destination, so `c` must start from zero (or from a partial sum).
pub(crate) fn accumulate_block(a: MatrixView<'_>, b: MatrixView<'_>, c: &mut BlockMut<'_>) {
    let len = c.len();
    debug_assert_eq!(a.len(), len);
    debug_assert_eq!(b.len(), len);

    for i in 0..len {
        let a_row = a.row(i);
        let c_row = c.row_mut(i);
        for (j, cell) in c_row.iter_mut().enumerate() {
            for (k, &a_ik) in a_row.iter().enumerate() {
                *cell += a_ik * b.get(k, j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kernel() -> SequentialKernel {
        SequentialKernel::new()
    }

    #[test]
    fn test_multiply_basic() {
        // [1,2;3,4] @ [5,6;7,8] = [19,22;43,50]
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
        let b = Matrix::from_vec(vec![5.0, 6.0, 7.0, 8.0], 2).unwrap();
        let mut c = Matrix::zeros(2);
        kernel().multiply(&a, &b, &mut c).unwrap();
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_multiply_identity() {
        let a = Matrix::from_fn(5, |r, c| (r * 5 + c) as f32 * 0.5);
        let mut c = Matrix::zeros(5);
        kernel().multiply(&a, &Matrix::identity(5), &mut c).unwrap();
        assert_eq!(c, a);
    }

    #[test]
    fn test_multiply_overwrites_destination() {
        let a = Matrix::identity(3);
        let b = Matrix::from_fn(3, |r, c| (r + c) as f32);
        let mut c = Matrix::from_fn(3, |_, _| 99.0);
        kernel().multiply(&a, &b, &mut c).unwrap();
        assert_eq!(c, b);
    }

    #[test]
    fn test_multiply_empty() {
        let a = Matrix::zeros(0);
        let b = Matrix::zeros(0);
        let mut c = Matrix::zeros(0);
        kernel().multiply(&a, &b, &mut c).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = Matrix::zeros(2);
        let b = Matrix::zeros(3);
        let mut c = Matrix::zeros(2);
        assert!(kernel().multiply(&a, &b, &mut c).is_err());
    }

    #[test]
    fn test_accumulate_block_adds_into_destination() {
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
        let b = Matrix::from_vec(vec![5.0, 6.0, 7.0, 8.0], 2).unwrap();
        let mut c = Matrix::from_fn(2, |_, _| 1.0);
        accumulate_block(a.view(), b.view(), &mut c.block_mut());
        assert_eq!(c.as_slice(), &[20.0, 23.0, 44.0, 51.0]);
    }
}
