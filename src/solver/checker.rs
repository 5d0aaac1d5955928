//! Convergence checking for the Arnoldi iteration.
//!
//! At a checkpoint the current Hessenberg projection is eigendecomposed,
//! the selection rule picks the candidates worth verifying, and each one is
//! re-applied through the true propagator. The residual of the eigenvalue
//! equation is the authoritative acceptance gate: projected eigenvalues are
//! only approximations that improve with subspace size, so a candidate is
//! never trusted on the strength of the projection alone.

use faer::c64;
use faer::{Mat, MatRef};
use num_traits::Zero;
use tracing::debug;

use crate::config::ArnoldiOptions;
use crate::core::traits::{EigSolver, Generator, InnerProduct, Propagator};
use crate::error::KrylindError;
use crate::solver::selection::SelectionRule;
use crate::state::vectorize::{from_vector, normalize, to_vector};

/// Result of one checkpoint.
pub struct CheckReport {
    /// True only if at least one candidate was selected and every selected
    /// candidate passed its residual test.
    pub converged: bool,
    /// Number of candidates the selection rule picked.
    pub selected: usize,
    /// Accepted propagator eigenvalues.
    pub eigenvalues: Vec<c64>,
    /// Accepted eigenvectors as normalized `d x d` states.
    pub eigenvectors: Vec<Mat<c64>>,
    /// Generator eigenvalues `<v, G(v)>` of the accepted eigenvectors.
    pub generator_eigenvalues: Vec<c64>,
}

/// Verifies candidate eigenpairs of the projected operator against the true
/// propagator.
pub struct ConvergenceChecker<'a> {
    pub opts: &'a ArnoldiOptions,
    pub selection: &'a SelectionRule,
}

impl ConvergenceChecker<'_> {
    /// Run the convergence check for iteration `k`.
    ///
    /// `basis` and `hessenberg` are the full buffers owned by the builder;
    /// only the first `k` columns of the basis and the top-left `k x k`
    /// Hessenberg block participate.
    #[allow(clippy::too_many_arguments)]
    pub fn check<P, G, E>(
        &self,
        basis: MatRef<'_, c64>,
        hessenberg: MatRef<'_, c64>,
        k: usize,
        dim: usize,
        propagator: &P,
        generator: &G,
        eig: &E,
    ) -> Result<CheckReport, KrylindError>
    where
        P: Propagator + ?Sized,
        G: Generator + ?Sized,
        E: EigSolver + ?Sized,
    {
        let ip = ();
        let m = basis.nrows();

        let block = Mat::from_fn(k, k, |i, j| hessenberg[(i, j)]);
        let (values, vectors) = eig.eig(block.as_ref())?;

        let mut report = CheckReport {
            converged: true,
            selected: 0,
            eigenvalues: Vec::new(),
            eigenvectors: Vec::new(),
            generator_eigenvalues: Vec::new(),
        };

        for (jj, &value) in values.iter().enumerate() {
            if !self.selection.selects(value, &values) {
                continue;
            }
            report.selected += 1;

            // Lift the reduced eigenvector through the active basis columns.
            let mut full = vec![c64::zero(); m];
            for j in 0..k {
                let yj = vectors[(j, jj)];
                for i in 0..m {
                    full[i] += basis[(i, j)] * yj;
                }
            }
            if normalize(&mut full) == 0.0 {
                // Degenerate Ritz vector; leave it to a later, larger subspace.
                report.converged = false;
                continue;
            }

            let candidate = from_vector(&full, dim)?;
            let advanced =
                propagator.advance(candidate.as_ref(), self.opts.time, self.opts.substeps)?;
            if advanced.nrows() != dim || advanced.ncols() != dim {
                return Err(KrylindError::bad_state(
                    dim,
                    advanced.nrows(),
                    advanced.ncols(),
                ));
            }

            // ‖λ·v − P(v)‖ against tau decides acceptance.
            let advanced_vec = to_vector(advanced.as_ref());
            let residual: Vec<c64> = full
                .iter()
                .zip(advanced_vec.iter())
                .map(|(vi, pi)| value * vi - pi)
                .collect();
            let residual_norm = ip.norm(&residual);
            let accepted = residual_norm < self.opts.tau;

            if accepted {
                let mut vec_hat = advanced_vec;
                normalize(&mut vec_hat);
                let state_hat = from_vector(&vec_hat, dim)?;
                let image = generator.apply(state_hat.as_ref())?;
                let gen_value = ip.dot(&vec_hat, &to_vector(image.as_ref()));

                report.eigenvalues.push(value);
                report.eigenvectors.push(state_hat);
                report.generator_eigenvalues.push(gen_value);
            } else {
                report.converged = false;
            }
            debug!(
                iteration = k,
                eigenvalue = %value,
                residual = residual_norm,
                accepted,
                "checkpoint candidate"
            );
        }

        // A checkpoint that selected nothing has verified nothing.
        if report.selected == 0 {
            report.converged = false;
        }
        Ok(report)
    }
}
