//! Arnoldi eigensolver: builder, convergence checker, selection rules.

pub mod arnoldi;
pub use arnoldi::{ArnoldiResult, ArnoldiSolver};

pub mod checker;
pub use checker::{CheckReport, ConvergenceChecker};

pub mod selection;
pub use selection::SelectionRule;
