//! Walks `t = 0..T` over a satisfying model and recovers the departure
//! schedule.

use crate::problem::Problem;
use crate::registry::{Registry, VarKey};
use crate::solver::Model;

/// One departure event: `(t, passengers)`, passengers 1-based and sorted
/// ascending.
pub type Departure = (u32, Vec<u32>);

/// The decoded schedule: strictly increasing `t`, each passenger list
/// non-empty and of size ≤ `c`.
pub type Schedule = Vec<Departure>;

/// Decode `model` into a [`Schedule`], using the same registry that was
/// used to construct the encoding.
pub fn decode(registry: &Registry, model: &Model, problem: Problem, t_budget: u32) -> Schedule {
    let _p = hprof::enter("decode");
    let mut schedule = Schedule::new();

    for t in 0..t_budget {
        let dep_t = match registry.existing(VarKey::Dep { t }) {
            Some(v) => v,
            None => continue, // variable never created: DEP(t) is vacuously false
        };
        if !model.value(dep_t.into()) {
            continue;
        }

        let mut passengers = Vec::new();
        for p in problem.chickens() {
            if let Some(board) = registry.existing(VarKey::Board { t, p: p.into() }) {
                if model.value(board.into()) {
                    passengers.push(u32::from(p) + 1); // public ids are 1-based
                }
            }
        }
        passengers.sort_unstable();
        debug_assert!(!passengers.is_empty(), "DEP(t) true with no boarded chicken");
        schedule.push((t, passengers));
    }

    log::debug!("decoded {} departures up to T={}", schedule.len(), t_budget);
    schedule
}
