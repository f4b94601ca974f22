//! Concrete `SatSolver` backend, built on `rustsat` + `rustsat-glucose`.
//! This is the only place in the crate that names a concrete solver type;
//! everything above `solver::SatSolver` is generic.

use rustsat::solvers::{Solve, SolverResult};
use rustsat::types::{Lit as RsLit, TernaryVal};
use rustsat_glucose::core::Glucose;

use crate::clauses::Lit;
use crate::error::SolverError;

use super::{Model, SatOutcome, SatSolver};

fn to_rustsat_lit(lit: Lit) -> RsLit {
    // Our literals are DIMACS-style signed non-zero integers; rustsat
    // variables are 0-indexed, so translate id 1 -> var 0, keeping polarity.
    let var = rustsat::types::Var::new(lit.var().get() - 1);
    if lit.is_negative() {
        -var.pos_lit()
    } else {
        var.pos_lit()
    }
}

/// Adapter over `rustsat_glucose::core::Glucose`.
pub struct GlucoseSolver {
    inner: Glucose,
}

impl GlucoseSolver {
    pub fn new() -> Self {
        GlucoseSolver { inner: Glucose::default() }
    }
}

impl Default for GlucoseSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolver for GlucoseSolver {
    fn add_clause(&mut self, clause: &[Lit]) {
        let rs_clause: rustsat::types::Clause =
            clause.iter().copied().map(to_rustsat_lit).collect();
        if let Err(e) = Solve::add_clause(&mut self.inner, rs_clause) {
            log::error!("glucose rejected clause: {e}");
        }
    }

    fn solve(&mut self, num_vars: u32) -> Result<SatOutcome, SolverError> {
        let _p = hprof::enter("glucose::solve");
        let result = Solve::solve(&mut self.inner)
            .map_err(|e| SolverError::Backend(e.to_string()))?;

        match result {
            SolverResult::Unsat => Ok(SatOutcome::Unsat),
            SolverResult::Sat => {
                let mut values = Vec::with_capacity(num_vars as usize);
                for id in 1..=num_vars {
                    let var = rustsat::types::Var::new(id - 1);
                    let v = Solve::lit_val(&self.inner, var.pos_lit())
                        .map_err(|e| SolverError::Backend(e.to_string()))?;
                    values.push(matches!(v, TernaryVal::True));
                }
                Ok(SatOutcome::Sat(Model::new(values)))
            }
            SolverResult::Interrupted => Err(SolverError::Timeout),
        }
    }
}
