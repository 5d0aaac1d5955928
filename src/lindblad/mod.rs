//! Lindblad dynamics: the Liouvillian generator and a fixed-step RK4
//! propagator backend driving it.

pub mod generator;
pub mod propagator;

pub use generator::Liouvillian;
pub use propagator::RkPropagator;
