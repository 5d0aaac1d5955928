//! State module: density-matrix vectorization and normalization.

pub mod vectorize;
pub use vectorize::{from_vector, normalize, to_vector};
