//! Arnoldi iteration over a black-box propagator.
//!
//! Builds an orthonormal basis of the Krylov subspace spanned by repeated
//! propagator applications to an initial state, together with the projected
//! (upper Hessenberg) representation of the propagator, and extracts
//! converged eigenpairs along the way. The propagator is never formed as a
//! matrix: one application per iteration is all the solver needs, which is
//! what makes the method viable when the `d^2 x d^2` superoperator is out
//! of reach.
//!
//! # Features
//! - Modified (sequential) Gram-Schmidt orthogonalization for numerical
//!   stability against loss of orthogonality
//! - Breakdown detection for early termination on invariant subspaces
//! - Periodic convergence checkpoints with residual-verified acceptance
//!
//! # References
//! - Saad, Y. (2011). Numerical Methods for Large Eigenvalue Problems,
//!   2nd Edition. SIAM. §6.2
//! - https://en.wikipedia.org/wiki/Arnoldi_iteration

use faer::c64;
use faer::{Mat, MatRef};
use num_traits::Zero;
use tracing::info;

use crate::config::ArnoldiOptions;
use crate::core::traits::{EigSolver, Generator, InnerProduct, Propagator};
use crate::core::wrappers::FaerEigSolver;
use crate::error::KrylindError;
use crate::solver::checker::{CheckReport, ConvergenceChecker};
use crate::solver::selection::SelectionRule;
use crate::state::vectorize::{from_vector, normalize, to_vector};
use crate::utils::convergence::{ArnoldiStats, Checkpointing};

/// If the orthogonalization residual is shorter than this, the produced
/// vector is the zero vector and the subspace is operator-invariant.
const BREAKDOWN_TOL: f64 = 1e-12;

/// Output of one Arnoldi run.
///
/// `basis` and `hessenberg` are the full fixed-size buffers; on early
/// termination the trailing columns are unused zeros, and the logically
/// sized blocks are available through [`active_basis`](Self::active_basis)
/// and [`active_hessenberg`](Self::active_hessenberg).
pub struct ArnoldiResult {
    /// Krylov basis, `d^2 x (max_dim + 1)`, orthonormal filled columns.
    pub basis: Mat<c64>,
    /// Hessenberg projection of the propagator, `(max_dim + 1) x max_dim`.
    pub hessenberg: Mat<c64>,
    /// Converged propagator eigenvalues from the most recent checkpoint.
    pub eigenvalues: Vec<c64>,
    /// Converged eigenvectors as normalized `d x d` states, parallel to
    /// `eigenvalues`.
    pub eigenvectors: Vec<Mat<c64>>,
    /// Generator eigenvalues of the converged eigenvectors, computed from
    /// the eigenvector itself (never as `log(eigenvalue) / time`).
    pub generator_eigenvalues: Vec<c64>,
    /// Iteration count and termination mode.
    pub stats: ArnoldiStats,
}

impl ArnoldiResult {
    /// Number of valid basis columns.
    pub fn krylov_dim(&self) -> usize {
        if self.stats.breakdown {
            self.stats.iterations
        } else {
            self.stats.iterations + 1
        }
    }

    /// The filled portion of the basis.
    pub fn active_basis(&self) -> MatRef<'_, c64> {
        self.basis.get(0..self.basis.nrows(), 0..self.krylov_dim())
    }

    /// The filled portion of the Hessenberg matrix.
    pub fn active_hessenberg(&self) -> MatRef<'_, c64> {
        let k = self.stats.iterations;
        self.hessenberg.get(0..(k + 1).min(self.hessenberg.nrows()), 0..k)
    }
}

/// Arnoldi eigensolver for propagators of open-system dynamics.
///
/// Drives the whole process: one propagator application per iteration,
/// modified Gram-Schmidt against the growing basis, and periodic delegation
/// to the convergence checker.
pub struct ArnoldiSolver {
    /// Run parameters.
    pub opts: ArnoldiOptions,
    /// Which candidate eigenvalues are worth verifying.
    pub selection: SelectionRule,
}

impl ArnoldiSolver {
    /// New solver with the given options and the steady-state selection
    /// rule.
    pub fn new(opts: ArnoldiOptions) -> Self {
        Self {
            opts,
            selection: SelectionRule::SteadyState,
        }
    }

    /// Replace the selection rule.
    pub fn with_selection(mut self, selection: SelectionRule) -> Self {
        self.selection = selection;
        self
    }

    /// Run the iteration with the default dense eigensolver.
    pub fn run<P, G>(
        &self,
        propagator: &P,
        generator: &G,
        rho0: MatRef<'_, c64>,
    ) -> Result<ArnoldiResult, KrylindError>
    where
        P: Propagator + ?Sized,
        G: Generator + ?Sized,
    {
        self.run_with_eig(propagator, generator, &FaerEigSolver, rho0)
    }

    /// Run the iteration with a caller-supplied dense eigensolver.
    pub fn run_with_eig<P, G, E>(
        &self,
        propagator: &P,
        generator: &G,
        eig: &E,
        rho0: MatRef<'_, c64>,
    ) -> Result<ArnoldiResult, KrylindError>
    where
        P: Propagator + ?Sized,
        G: Generator + ?Sized,
        E: EigSolver + ?Sized,
    {
        self.opts.validate()?;

        let dim = rho0.nrows();
        if rho0.ncols() != dim {
            return Err(KrylindError::bad_state(dim, rho0.nrows(), rho0.ncols()));
        }
        let m = dim * dim;
        let n = self.opts.max_dim;

        let mut q = to_vector(rho0);
        if normalize(&mut q) <= BREAKDOWN_TOL {
            return Err(KrylindError::ZeroState);
        }

        // One allocation per run; filled progressively, never resized.
        let mut basis = Mat::<c64>::zeros(m, n + 1);
        let mut hessenberg = Mat::<c64>::zeros(n + 1, n);
        for i in 0..m {
            basis[(i, 0)] = q[i];
        }

        let schedule = Checkpointing {
            min_check: self.opts.min_check,
            how_often: self.opts.how_often,
        };
        let checker = ConvergenceChecker {
            opts: &self.opts,
            selection: &self.selection,
        };

        let mut last_report: Option<CheckReport> = None;
        let mut stats = ArnoldiStats {
            iterations: 0,
            converged: false,
            breakdown: false,
        };
        let ip = ();

        for k in 0..n {
            stats.iterations = k + 1;

            // Advance the current Krylov vector through one full interval.
            let state = from_vector(&q, dim)?;
            let advanced =
                propagator.advance(state.as_ref(), self.opts.time, self.opts.substeps)?;
            if advanced.nrows() != dim || advanced.ncols() != dim {
                return Err(KrylindError::bad_state(
                    dim,
                    advanced.nrows(),
                    advanced.ncols(),
                ));
            }
            let mut v = to_vector(advanced.as_ref());

            // Modified Gram-Schmidt: subtract projections on previous
            // columns one at a time.
            for j in 0..=k {
                let mut proj = c64::zero();
                for i in 0..m {
                    proj += basis[(i, j)].conj() * v[i];
                }
                hessenberg[(j, k)] = proj;
                for i in 0..m {
                    v[i] -= proj * basis[(i, j)];
                }
            }

            let subdiag = ip.norm(&v);
            hessenberg[(k + 1, k)] = c64::new(subdiag, 0.0);

            if subdiag > BREAKDOWN_TOL {
                for x in v.iter_mut() {
                    *x /= subdiag;
                }
                for i in 0..m {
                    basis[(i, k + 1)] = v[i];
                }
                q = v;
            } else {
                // Exact breakdown: no further independent direction exists.
                stats.breakdown = true;
            }

            if schedule.due(k) {
                let report = checker.check(
                    basis.as_ref(),
                    hessenberg.as_ref(),
                    k,
                    dim,
                    propagator,
                    generator,
                    eig,
                )?;
                stats.converged = report.converged;
                last_report = Some(report);
            }

            if stats.converged || stats.breakdown {
                break;
            }
        }

        info!(
            iterations = stats.iterations,
            converged = stats.converged,
            breakdown = stats.breakdown,
            "arnoldi run finished"
        );

        let (eigenvalues, eigenvectors, generator_eigenvalues) = match last_report {
            Some(report) => (
                report.eigenvalues,
                report.eigenvectors,
                report.generator_eigenvalues,
            ),
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        Ok(ArnoldiResult {
            basis,
            hessenberg,
            eigenvalues,
            eigenvectors,
            generator_eigenvalues,
            stats,
        })
    }
}
