use mm_core::Matrix;

use crate::fill::{ordinal, Fill};

/// Fills element `(i, j)` with its 1-based row-major position, `i*N + j + 1`.
pub struct SequentialFill;

impl SequentialFill {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequentialFill {
    fn default() -> Self {
        Self::new()
    }
}

impl Fill for SequentialFill {
    fn name(&self) -> &str {
        "sequential"
    }

    fn fill(&self, m: &mut Matrix) {
        let n = m.n();
        for (idx, value) in m.as_mut_slice().iter_mut().enumerate() {
            *value = ordinal(n, idx / n, idx % n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_values() {
        let m = SequentialFill::new().generate(3);
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_sequential_empty() {
        let m = SequentialFill::new().generate(0);
        assert!(m.is_empty());
    }
}
