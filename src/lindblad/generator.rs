//! Lindblad generator (Liouvillian) evaluation.
//!
//! Computes the instantaneous rate of change of a density matrix under
//! open-system dynamics,
//!
//! ```text
//! G(ρ) = -i[H, ρ] + Σ_k ( L_k ρ L_k† − ½ {L_k†L_k, ρ} )
//! ```
//!
//! in the Lindblad–Gorini–Kossakowski–Sudarshan form. This is a pure
//! algebraic map with no iteration; the solver only applies it post-hoc to
//! converged eigenvectors.
//!
//! # References
//! - Lindblad (1976), Commun. Math. Phys. 48, 119
//! - Breuer & Petruccione, "The Theory of Open Quantum Systems" (2002), Ch. 3

use faer::c64;
use faer::{Mat, MatRef, Scale};

use crate::core::traits::Generator;
use crate::error::KrylindError;

/// One dissipation channel: the jump operator together with its
/// precomputed adjoint and damping product `L†L`.
struct JumpOperator {
    op: Mat<c64>,
    op_dag: Mat<c64>,
    damping: Mat<c64>,
}

/// The Lindblad generator of an open quantum system: a principal
/// Hamiltonian term plus a sum of dissipative channels.
pub struct Liouvillian {
    hamiltonian: Mat<c64>,
    jumps: Vec<JumpOperator>,
}

impl Liouvillian {
    /// Build a generator from a Hamiltonian and a set of jump operators.
    ///
    /// All operators must be square with one common dimension.
    pub fn new(hamiltonian: Mat<c64>, jump_ops: Vec<Mat<c64>>) -> Result<Self, KrylindError> {
        let d = hamiltonian.nrows();
        if hamiltonian.ncols() != d {
            return Err(KrylindError::bad_state(
                d,
                hamiltonian.nrows(),
                hamiltonian.ncols(),
            ));
        }
        let mut jumps = Vec::with_capacity(jump_ops.len());
        for op in jump_ops {
            if op.nrows() != d || op.ncols() != d {
                return Err(KrylindError::bad_state(d, op.nrows(), op.ncols()));
            }
            let op_dag = op.adjoint().to_owned();
            let damping = &op_dag * &op;
            jumps.push(JumpOperator {
                op,
                op_dag,
                damping,
            });
        }
        Ok(Self { hamiltonian, jumps })
    }

    /// The Hamiltonian term.
    pub fn hamiltonian(&self) -> MatRef<'_, c64> {
        self.hamiltonian.as_ref()
    }

    /// Number of dissipation channels.
    pub fn num_jumps(&self) -> usize {
        self.jumps.len()
    }
}

impl Generator for Liouvillian {
    fn dim(&self) -> usize {
        self.hamiltonian.nrows()
    }

    fn apply(&self, rho: MatRef<'_, c64>) -> Result<Mat<c64>, KrylindError> {
        let d = self.dim();
        if rho.nrows() != d || rho.ncols() != d {
            return Err(KrylindError::bad_state(d, rho.nrows(), rho.ncols()));
        }

        let h = self.hamiltonian.as_ref();
        // -i[H, ρ]
        let mut out = (h * rho - rho * h) * Scale(-c64::i());

        let half = Scale(c64::new(0.5, 0.0));
        for jump in &self.jumps {
            // L ρ L† − ½ (L†L ρ + ρ L†L)
            let gain = jump.op.as_ref() * rho * jump.op_dag.as_ref();
            let loss = (jump.damping.as_ref() * rho + rho * jump.damping.as_ref()) * half;
            out = out + gain - loss;
        }
        Ok(out)
    }
}
