use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("dimension mismatch: expected {expected}x{expected}, got {got}x{got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("buffer of length {len} cannot hold a {n}x{n} matrix")]
    LengthMismatch { n: usize, len: usize },
    #[error("window at ({row}, {col}) with edge {len} does not fit a {n}x{n} matrix")]
    WindowOutOfBounds {
        row: usize,
        col: usize,
        len: usize,
        n: usize,
    },
    #[error("invalid worker count: {0}")]
    InvalidWorkerCount(usize),
    #[error("invalid base-case threshold: {0}")]
    InvalidThreshold(usize),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Checks that `got` has the same edge length as `expected`.
pub(crate) fn ensure_same_edge(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(MatrixError::DimensionMismatch { expected, got });
    }
    Ok(())
}
