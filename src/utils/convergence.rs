//! Checkpoint scheduling & run statistics for the Arnoldi iteration.

/// When to run the spectral convergence check.
///
/// Checkpoints are gated on the iteration index: the first `min_check`
/// iterations are skipped entirely, after which every `how_often`-th
/// iteration is a checkpoint.
#[derive(Clone, Copy, Debug)]
pub struct Checkpointing {
    pub min_check: usize,
    pub how_often: usize,
}

impl Checkpointing {
    /// Whether iteration `k` is a checkpoint.
    pub fn due(&self, k: usize) -> bool {
        k > self.min_check && k % self.how_often == 0
    }
}

/// Outcome of one Arnoldi run.
#[derive(Clone, Debug)]
pub struct ArnoldiStats {
    /// Completed Arnoldi iterations, i.e. propagator applications made by
    /// the builder loop (verification re-applications are not counted).
    pub iterations: usize,
    /// Whether a checkpoint accepted every selected candidate.
    pub converged: bool,
    /// Whether the subspace invariant-collapsed (normal early termination,
    /// not an error).
    pub breakdown: bool,
}
