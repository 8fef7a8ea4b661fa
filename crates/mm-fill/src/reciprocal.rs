use mm_core::Matrix;

use crate::fill::{ordinal, Fill};

/// Fills element `(i, j)` with `1 / (i*N + j + 1)`, the elementwise reciprocal
/// of [`SequentialFill`](crate::SequentialFill).
pub struct ReciprocalFill;

impl ReciprocalFill {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReciprocalFill {
    fn default() -> Self {
        Self::new()
    }
}

impl Fill for ReciprocalFill {
    fn name(&self) -> &str {
        "reciprocal"
    }

    fn fill(&self, m: &mut Matrix) {
        let n = m.n();
        for (idx, value) in m.as_mut_slice().iter_mut().enumerate() {
            *value = 1.0 / ordinal(n, idx / n, idx % n);
        }
    }
}
