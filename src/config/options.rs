//! Run parameters for the Arnoldi iteration.
//!
//! This module provides the `ArnoldiOptions` struct, which collects the
//! knobs of a single eigensolver run: the maximum Krylov dimension, the
//! evolution time and sub-step count forwarded to the propagator, the
//! residual acceptance tolerance, and the checkpoint schedule for the
//! convergence checker.

use crate::error::KrylindError;

/// Parameters of one Arnoldi run.
#[derive(Clone, Debug)]
pub struct ArnoldiOptions {
    /// Maximum dimension of the Krylov subspace (`n`). The basis buffer
    /// holds `n + 1` columns.
    pub max_dim: usize,

    /// Evolution time per iteration, forwarded verbatim to the propagator.
    pub time: f64,

    /// Number of internal sub-steps per propagator invocation, forwarded
    /// verbatim to the propagator.
    pub substeps: usize,

    /// Residual acceptance tolerance for candidate eigenpairs.
    pub tau: f64,

    /// Iteration index after which convergence checkpoints may run.
    pub min_check: usize,

    /// Interval (in iterations) between convergence checkpoints.
    pub how_often: usize,
}

impl Default for ArnoldiOptions {
    fn default() -> Self {
        Self {
            max_dim: 200,
            time: 1.0,
            substeps: 100,
            tau: 1e-3,
            min_check: 100,
            how_often: 20,
        }
    }
}

impl ArnoldiOptions {
    /// New options with the given subspace dimension and evolution time;
    /// everything else at its default.
    pub fn new(max_dim: usize, time: f64) -> Self {
        Self {
            max_dim,
            time,
            ..Self::default()
        }
    }

    /// Reject parameter combinations the iteration cannot run with.
    pub fn validate(&self) -> Result<(), KrylindError> {
        if self.max_dim == 0 {
            return Err(KrylindError::InvalidConfig("max_dim must be positive"));
        }
        if !self.time.is_finite() || self.time <= 0.0 {
            return Err(KrylindError::InvalidConfig(
                "time must be positive and finite",
            ));
        }
        if self.substeps == 0 {
            return Err(KrylindError::InvalidConfig("substeps must be positive"));
        }
        if !self.tau.is_finite() || self.tau <= 0.0 {
            return Err(KrylindError::InvalidConfig(
                "tau must be positive and finite",
            ));
        }
        if self.how_often == 0 {
            return Err(KrylindError::InvalidConfig("how_often must be positive"));
        }
        Ok(())
    }
}
