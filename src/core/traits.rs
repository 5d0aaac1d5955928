//! Core seam traits for krylind.
//!
//! The Arnoldi builder only ever talks to its collaborators through these
//! traits: the time-evolution backend (`Propagator`), the instantaneous
//! generator (`Generator`), and the dense eigensolver used on the projected
//! Hessenberg block (`EigSolver`). Any backend can be substituted without
//! touching the iteration itself.

use faer::c64;
use faer::{Mat, MatRef};

use crate::error::KrylindError;

/// Time evolution over a fixed interval: advances a `d x d` state by `time`,
/// using `substeps` internal steps. Only the final state is consumed by the
/// solver; intermediate states are a backend implementation detail.
pub trait Propagator {
    /// Advance `rho` by `time`.
    fn advance(
        &self,
        rho: MatRef<'_, c64>,
        time: f64,
        substeps: usize,
    ) -> Result<Mat<c64>, KrylindError>;
}

/// Instantaneous rate of change of a state under the configured dynamics.
///
/// Applied post-hoc to converged eigenvectors to report generator
/// eigenvalues; never used to drive the iteration.
pub trait Generator {
    /// Hilbert-space dimension `d` the generator acts on.
    fn dim(&self) -> usize;

    /// Compute `G(rho)`.
    fn apply(&self, rho: MatRef<'_, c64>) -> Result<Mat<c64>, KrylindError>;
}

/// Dense general (non-Hermitian) eigendecomposition of a small square
/// complex matrix. Eigenvectors are the columns of the returned matrix,
/// ordered like the eigenvalues.
pub trait EigSolver {
    /// Compute eigenvalues and right eigenvectors of `a`.
    fn eig(&self, a: MatRef<'_, c64>) -> Result<(Vec<c64>, Mat<c64>), KrylindError>;
}

/// Inner products & norms on complex vectors.
pub trait InnerProduct<V> {
    /// Compute `<x, y>`, conjugate-linear in `x`.
    fn dot(&self, x: &V, y: &V) -> c64;
    /// Compute the Euclidean norm of `x`.
    fn norm(&self, x: &V) -> f64;
}

/// Matrix–vector product: y <- A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}
