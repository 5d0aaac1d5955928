//! Fixed-step RK4 propagator over a generator.
//!
//! Advances a density matrix through dρ/dt = G(ρ) with classical 4th-order
//! Runge–Kutta, splitting the requested interval into `substeps` equal
//! steps. Any `Generator` backend works; the Arnoldi solver only sees the
//! `Propagator` interface, so an explicit exponential or a specialized
//! solver can be swapped in without touching the iteration.
//!
//! Ref: Press et al., "Numerical Recipes" (2007), §17.1.

use faer::c64;
use faer::{Mat, MatRef, Scale};

use crate::core::traits::{Generator, Propagator};
use crate::error::KrylindError;

/// RK4 time evolution driven by a generator `G`.
pub struct RkPropagator<G> {
    generator: G,
}

impl<G: Generator> RkPropagator<G> {
    /// Wrap a generator.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// The underlying generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// One RK4 step of size `dt`.
    fn step(&self, rho: &Mat<c64>, dt: f64) -> Result<Mat<c64>, KrylindError> {
        let half = Scale(c64::new(0.5 * dt, 0.0));
        let full = Scale(c64::new(dt, 0.0));
        let sixth = Scale(c64::new(dt / 6.0, 0.0));
        let two = Scale(c64::new(2.0, 0.0));

        let k1 = self.generator.apply(rho.as_ref())?;
        let k2 = self.generator.apply((rho + &k1 * half).as_ref())?;
        let k3 = self.generator.apply((rho + &k2 * half).as_ref())?;
        let k4 = self.generator.apply((rho + &k3 * full).as_ref())?;

        Ok(rho + (k1 + k2 * two + k3 * two + k4) * sixth)
    }
}

impl<G: Generator> Propagator for RkPropagator<G> {
    fn advance(
        &self,
        rho: MatRef<'_, c64>,
        time: f64,
        substeps: usize,
    ) -> Result<Mat<c64>, KrylindError> {
        if substeps == 0 {
            return Err(KrylindError::InvalidConfig("substeps must be positive"));
        }
        let d = self.generator.dim();
        if rho.nrows() != d || rho.ncols() != d {
            return Err(KrylindError::bad_state(d, rho.nrows(), rho.ncols()));
        }
        let dt = time / substeps as f64;
        let mut state = rho.to_owned();
        for _ in 0..substeps {
            state = self.step(&state, dt)?;
        }
        Ok(state)
    }
}
