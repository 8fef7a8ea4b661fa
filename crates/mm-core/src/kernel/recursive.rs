//! Fork-join block multiplication.
//!
//! Each frame splits A, B and C into quadrants and computes
//!
//! ```text
//! C11 += A11*B11   C12 += A11*B12   C21 += A21*B11   C22 += A21*B12   (generation 1)
//! C11 += A12*B21   C12 += A12*B22   C21 += A22*B21   C22 += A22*B22   (generation 2)
//! ```
//!
//! The four products of a generation write four different quadrants and run
//! concurrently. Each quadrant receives one term from each generation, so the
//! frame joins all of generation 1 before it starts generation 2.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::backend::{check_operands, MatmulBackend};
use crate::error::{MatrixError, Result};
use crate::kernel::accumulate_block;
use crate::matrix::Matrix;
use crate::view::{BlockMut, MatrixView};

/// Block edge at or below which recursion stops.
pub const DEFAULT_THRESHOLD: usize = 128;

/// Shape of one recursive multiplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecursionStats {
    /// Frames that split into quadrants.
    pub splits: usize,
    /// Base-case blocks computed directly.
    pub leaves: usize,
    /// Deepest recursion level reached (0 = no split).
    pub max_depth: usize,
}

impl RecursionStats {
    fn leaf(depth: usize) -> Self {
        RecursionStats {
            splits: 0,
            leaves: 1,
            max_depth: depth,
        }
    }

    fn split(depth: usize) -> Self {
        RecursionStats {
            splits: 1,
            leaves: 0,
            max_depth: depth,
        }
    }

    fn merge(self, other: RecursionStats) -> Self {
        RecursionStats {
            splits: self.splits + other.splits,
            leaves: self.leaves + other.leaves,
            max_depth: self.max_depth.max(other.max_depth),
        }
    }
}

/// Recursive quadrant multiplier running on a rayon pool.
#[derive(Debug, Clone)]
pub struct RecursiveMultiplier {
    threshold: usize,
    pool: Option<Arc<ThreadPool>>,
}

impl RecursiveMultiplier {
    /// Create a multiplier that stops splitting at `threshold` and runs on
    /// rayon's global pool.
    ///
    /// # Errors
    /// Returns `InvalidThreshold` if `threshold` is 0.
    pub fn new(threshold: usize) -> Result<Self> {
        if threshold == 0 {
            return Err(MatrixError::InvalidThreshold(threshold));
        }
        Ok(RecursiveMultiplier {
            threshold,
            pool: None,
        })
    }

    /// Run on a dedicated pool of `threads` workers instead of the global one.
    pub fn with_threads(mut self, threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(MatrixError::InvalidWorkerCount(threads));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("mm-recursive-{}", i))
            .build()?;
        debug!(threads, "built recursive multiplier pool");
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Worker count of the dedicated pool, or of the global pool.
    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Smallest edge `>= n` that halves exactly down to the threshold.
    ///
    /// Returns `n` itself when no padding is needed, which includes every
    /// `n <= threshold`.
    pub fn padded_edge(&self, n: usize) -> usize {
        let (base, levels) = self.plan(n);
        base << levels
    }

    /// Number of splitting levels a multiplication of edge `n` goes through.
    pub fn depth_for(&self, n: usize) -> usize {
        self.plan(n).1
    }

    fn plan(&self, n: usize) -> (usize, usize) {
        let mut len = n;
        let mut levels = 0;
        while len > self.threshold {
            len = (len + 1) / 2;
            levels += 1;
        }
        (len, levels)
    }

    /// Accumulating multiply: `C += A * B`.
    ///
    /// `c` must be zero-filled for the result to be the product; any values
    /// already in it are added to. Operands whose edge does not halve cleanly
    /// are multiplied through zero-padded copies.
    pub fn multiply_accumulate(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<RecursionStats> {
        check_operands(a, b, c)?;

        let n = a.n();
        let edge = self.padded_edge(n);
        debug!(
            n,
            edge,
            threshold = self.threshold,
            depth = self.depth_for(n),
            "recursive multiply"
        );

        if edge == n {
            let mut block = c.block_mut();
            return Ok(self.install(|| self.recurse(a.view(), b.view(), &mut block, 0)));
        }

        let padded_a = a.padded_to(edge);
        let padded_b = b.padded_to(edge);
        let mut padded_c = c.padded_to(edge);
        let stats = {
            let mut block = padded_c.block_mut();
            self.install(|| self.recurse(padded_a.view(), padded_b.view(), &mut block, 0))
        };
        c.copy_corner_from(&padded_c);
        Ok(stats)
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    fn recurse(
        &self,
        a: MatrixView<'_>,
        b: MatrixView<'_>,
        c: &mut BlockMut<'_>,
        depth: usize,
    ) -> RecursionStats {
        if c.len() <= self.threshold {
            let w = c.window();
            trace!(row = w.row, col = w.col, len = w.len, depth, "base block");
            accumulate_block(a, b, c);
            return RecursionStats::leaf(depth);
        }

        let [a11, a12, a21, a22] = a.quadrants();
        let [b11, b12, b21, b22] = b.quadrants();
        let [mut c11, mut c12, mut c21, mut c22] = c.quadrants();
        let next = depth + 1;

        let first = self.generation(
            [(a11, b11), (a11, b12), (a21, b11), (a21, b12)],
            [&mut c11, &mut c12, &mut c21, &mut c22],
            next,
        );
        // All four first-generation tasks have joined; the second generation
        // adds into the same quadrants.
        let second = self.generation(
            [(a12, b21), (a12, b22), (a22, b21), (a22, b22)],
            [&mut c11, &mut c12, &mut c21, &mut c22],
            next,
        );

        RecursionStats::split(depth).merge(first).merge(second)
    }

    /// Runs four quadrant products concurrently and waits for all of them.
    /// The calling worker executes the first product itself.
    fn generation(
        &self,
        products: [(MatrixView<'_>, MatrixView<'_>); 4],
        dest: [&mut BlockMut<'_>; 4],
        depth: usize,
    ) -> RecursionStats {
        let [(a0, b0), (a1, b1), (a2, b2), (a3, b3)] = products;
        let [c0, c1, c2, c3] = dest;

        let ((s0, s1), (s2, s3)) = rayon::join(
            move || {
                rayon::join(
                    move || self.recurse(a0, b0, c0, depth),
                    move || self.recurse(a1, b1, c1, depth),
                )
            },
            move || {
                rayon::join(
                    move || self.recurse(a2, b2, c2, depth),
                    move || self.recurse(a3, b3, c3, depth),
                )
            },
        );
        s0.merge(s1).merge(s2).merge(s3)
    }
}

impl Default for RecursiveMultiplier {
    fn default() -> Self {
        RecursiveMultiplier {
            threshold: DEFAULT_THRESHOLD,
            pool: None,
        }
    }
}

impl MatmulBackend for RecursiveMultiplier {
    fn name(&self) -> &str {
        "recursive"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        check_operands(a, b, c)?;
        c.fill(0.0);
        self.multiply_accumulate(a, b, c)?;
        Ok(())
    }
}
