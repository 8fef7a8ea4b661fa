use mm_core::Matrix;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::fill::Fill;

/// Fills uniformly distributed values in `[low, high)` from a seeded RNG.
///
/// The same seed always produces the same matrix. A degenerate range
/// (`low >= high`) fills every element with `low`.
pub struct UniformFill {
    seed: u64,
    low: f32,
    high: f32,
}

impl UniformFill {
    /// Create a uniform fill over `[-1, 1)` with the given seed.
    pub fn new(seed: u64) -> Self {
        Self::with_range(seed, -1.0, 1.0)
    }

    pub fn with_range(seed: u64, low: f32, high: f32) -> Self {
        Self { seed, low, high }
    }
}

impl Fill for UniformFill {
    fn name(&self) -> &str {
        "uniform"
    }

    fn fill(&self, m: &mut Matrix) {
        // NaN bounds also land here.
        if !(self.low < self.high) {
            m.fill(self.low);
            return;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let dist = Uniform::new(self.low, self.high);
        for value in m.as_mut_slice() {
            *value = dist.sample(&mut rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_in_range() {
        let m = UniformFill::with_range(42, 2.0, 3.0).generate(16);
        assert!(m.as_slice().iter().all(|&v| (2.0..3.0).contains(&v)));
    }

    #[test]
    fn test_uniform_same_seed_same_matrix() {
        let a = UniformFill::new(7).generate(8);
        let b = UniformFill::new(7).generate(8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_different_seed() {
        let a = UniformFill::new(1).generate(8);
        let b = UniformFill::new(2).generate(8);
        assert_ne!(a, b);
    }

    #[test]
    fn test_uniform_degenerate_range() {
        let m = UniformFill::with_range(0, 5.0, 5.0).generate(3);
        assert!(m.as_slice().iter().all(|&v| v == 5.0));
    }
}
