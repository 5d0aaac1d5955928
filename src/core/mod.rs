//! Core traits and faer/Vec wrappers.

pub mod traits;
pub mod wrappers;

pub use traits::{EigSolver, Generator, InnerProduct, MatVec, Propagator};
pub use wrappers::{FaerEigSolver, MatrixPropagator};
