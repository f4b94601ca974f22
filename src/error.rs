//! The CNF builder never fails — malformed inputs are handled as
//! early-exit preconditions before any clause is emitted — so the only
//! runtime error surface is the SAT solver adapter.

use derive_more::Display;

/// Errors raised by a [`crate::solver::SatSolver`] implementation.
/// Propagated as-is; the core makes no attempt at recovery or retry.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum SolverError {
    /// The backend was asked to stop (e.g. a time limit) before it could
    /// decide satisfiability.
    #[display(fmt = "sat solver timed out")]
    Timeout,
    /// An internal backend failure unrelated to satisfiability (solver
    /// crash, resource exhaustion, rejected clause, ...).
    #[display(fmt = "sat solver backend error: {_0}")]
    Backend(String),
}

impl std::error::Error for SolverError {}
