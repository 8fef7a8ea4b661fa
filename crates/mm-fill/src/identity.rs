use mm_core::Matrix;

use crate::fill::Fill;

/// Fills the identity matrix: ones on the diagonal, zeros elsewhere.
pub struct IdentityFill;

impl IdentityFill {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IdentityFill {
    fn default() -> Self {
        Self::new()
    }
}

impl Fill for IdentityFill {
    fn name(&self) -> &str {
        "identity"
    }

    fn fill(&self, m: &mut Matrix) {
        let n = m.n();
        m.fill(0.0);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
    }
}
