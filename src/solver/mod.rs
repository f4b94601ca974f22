//! Hides a concrete SAT solver behind a small trait. The CNF builder and
//! the feasibility search never see a concrete solver type.

pub mod glucose;

use crate::clauses::Lit;
use crate::error::SolverError;

/// A complete truth assignment: `values[i]` is the truth of the variable
/// whose 1-based id is `i + 1`.
#[derive(Clone, Debug)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    pub fn new(values: Vec<bool>) -> Self {
        Model { values }
    }

    /// Truth value of `lit` under this model, accounting for polarity.
    pub fn value(&self, lit: Lit) -> bool {
        let idx = lit.var().get() as usize - 1;
        let base = self.values.get(idx).copied().unwrap_or(false);
        base != lit.is_negative()
    }
}

#[derive(Clone, Debug)]
pub enum SatOutcome {
    Sat(Model),
    Unsat,
}

/// Given the accumulated clause list, return either "unsatisfiable" or a
/// complete model. Sound and complete on CNF; no incrementality required.
pub trait SatSolver {
    /// Queue one clause. May be called any number of times before `solve`.
    fn add_clause(&mut self, clause: &[Lit]);

    /// Solve the accumulated clause set. `num_vars` is the number of
    /// variables the registry has allocated, used to size the returned
    /// model; implementations must assign a value to every variable up to
    /// `num_vars`, even ones absent from every clause.
    fn solve(&mut self, num_vars: u32) -> Result<SatOutcome, SolverError>;
}
