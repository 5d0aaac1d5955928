//! Utility types: checkpoint scheduling and run statistics.

pub mod convergence;
pub use convergence::{ArnoldiStats, Checkpointing};
