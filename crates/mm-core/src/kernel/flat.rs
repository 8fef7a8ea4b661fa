use std::ops::Range;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::backend::{check_operands, MatmulBackend};
use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

/// Splits `[0, n)` into `workers` contiguous ranges whose lengths differ by at
/// most one. The first `n % workers` ranges get the extra row. Ranges may be
/// empty when `workers > n`.
///
/// # Panics
/// Panics if `workers` is 0.
pub fn partition_rows(n: usize, workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0, "partition_rows requires at least one worker");
    let base = n / workers;
    let extra = n % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for w in 0..workers {
        let len = base + usize::from(w < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Row-parallel multiplier with a fixed number of workers.
///
/// Each worker owns one contiguous range of output rows and computes them with
/// a plain triple loop. Workers never write the same row, so the only
/// synchronization is the final join.
#[derive(Debug)]
pub struct FlatMultiplier {
    workers: usize,
    pool: ThreadPool,
}

impl FlatMultiplier {
    /// Create a multiplier backed by its own pool of `workers` threads.
    ///
    /// # Errors
    /// Returns `InvalidWorkerCount` if `workers` is 0, or `ThreadPool` if the
    /// pool cannot be started.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(MatrixError::InvalidWorkerCount(workers));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("mm-flat-{}", i))
            .build()?;
        Ok(FlatMultiplier { workers, pool })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl MatmulBackend for FlatMultiplier {
    fn name(&self) -> &str {
        "flat"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        check_operands(a, b, c)?;

        let n = a.n();
        let ranges = partition_rows(n, self.workers);
        debug!(n, workers = self.workers, ?ranges, "flat multiply");

        let mut rest = c.as_mut_slice();
        let mut chunks = Vec::with_capacity(ranges.len());
        for rows in ranges {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * n);
            rest = tail;
            if !rows.is_empty() {
                chunks.push((rows, chunk));
            }
        }

        let (a, b) = (a.as_slice(), b.as_slice());
        self.pool.scope(|s| {
            for (rows, out) in chunks {
                s.spawn(move |_| multiply_rows(a, b, n, rows, out));
            }
        });
        Ok(())
    }
}

/// Computes rows `rows` of `A * B` into `out`, which holds exactly those rows.
fn multiply_rows(a: &[f32], b: &[f32], n: usize, rows: Range<usize>, out: &mut [f32]) {
    for (local, i) in rows.enumerate() {
        for j in 0..n {
            let cell = &mut out[local * n + j];
            *cell = 0.0;
            for k in 0..n {
                *cell += a[i * n + k] * b[k * n + j];
            }
        }
    }
}
