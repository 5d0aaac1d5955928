use thiserror::Error;

// Unified error type for krylind

#[derive(Error, Debug)]
pub enum KrylindError {
    #[error("shape mismatch: expected {expected}x{expected} state, got {rows}x{cols}")]
    ShapeMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },
    #[error("initial state has zero norm")]
    ZeroState,
    #[error("eigendecomposition error: {0}")]
    Eigen(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl KrylindError {
    /// Shape-mismatch error for a state that was expected to be `dim` x `dim`.
    pub(crate) fn bad_state(expected: usize, rows: usize, cols: usize) -> Self {
        KrylindError::ShapeMismatch {
            expected,
            rows,
            cols,
        }
    }
}
