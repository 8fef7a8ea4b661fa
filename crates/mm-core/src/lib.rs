//! `mm-core` - Square matrix multiplication engines for matmul-runtime.
//!
//! This crate provides:
//! - A row-major `Matrix` type with borrowed read views and write blocks
//! - A `MatmulBackend` trait shared by all multiplication strategies
//! - A sequential reference kernel
//! - A recursive fork-join quadrant multiplier
//! - A flat row-partitioned multiplier with a fixed worker count
//! - A tolerance-based `Verifier` for comparing results

pub mod backend;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod verify;
pub mod view;

// Re-export primary types at the crate root for convenience.
pub use backend::MatmulBackend;
pub use error::{MatrixError, Result};
pub use kernel::flat::{partition_rows, FlatMultiplier};
pub use kernel::recursive::{RecursionStats, RecursiveMultiplier, DEFAULT_THRESHOLD};
pub use kernel::SequentialKernel;
pub use matrix::Matrix;
pub use verify::{Mismatch, Verifier, VerifyReport, DEFAULT_EPSILON};
pub use view::{BlockMut, MatrixView, Quadrant, Window};
