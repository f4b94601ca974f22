//! Public entry points: `gen_solution` and `find_duration`.

use crate::decode::{self, Schedule};
use crate::encoding::{self, BuildOutcome, EncodeOptions};
use crate::error::SolverError;
use crate::problem::Problem;
use crate::solver::glucose::GlucoseSolver;
use crate::solver::{SatOutcome, SatSolver};

/// Decide feasibility of crossing `durations.len()` chickens with boat
/// capacity `c` within time budget `t_budget`, and produce a schedule if
/// one exists.
///
/// - Inputs: `durations` — crossing duration per chicken, length `n ≥ 0`;
///   `c` — boat capacity; `T` — time budget.
/// - Returns `None` ("no solution") on `c ≤ 0`, `T < 0`, an unsatisfiable
///   encoding, or a solver failure; otherwise `Some(schedule)`.
/// - `n = 0` always returns `Some(vec![])`.
pub fn gen_solution(durations: &[u32], c: i64, t_budget: i64) -> Option<Schedule> {
    match try_gen_solution(durations, c, t_budget, EncodeOptions::default()) {
        Ok(sched) => sched,
        Err(e) => {
            log::error!("gen_solution: solver backend failed: {e}");
            None
        }
    }
}

/// Same as [`gen_solution`] but surfaces adapter failures instead of
/// folding them into "no solution"; only the public entry point above
/// collapses them to the in-band sentinel.
pub fn try_gen_solution(
    durations: &[u32],
    c: i64,
    t_budget: i64,
    opts: EncodeOptions,
) -> Result<Option<Schedule>, SolverError> {
    let _p = hprof::enter("gen_solution");
    let problem = Problem::new(durations);

    match encoding::build(problem, c, t_budget, opts) {
        BuildOutcome::EmptySchedule => Ok(Some(Vec::new())),
        BuildOutcome::TriviallyUnsat => Ok(None),
        BuildOutcome::Built(enc) => {
            let mut solver = GlucoseSolver::new();
            for clause in &enc.clauses {
                solver.add_clause(clause);
            }
            match solver.solve(enc.num_vars)? {
                SatOutcome::Unsat => Ok(None),
                SatOutcome::Sat(model) => {
                    let schedule = decode::decode(&enc.registry, &model, problem, enc.t_budget);
                    Ok(Some(schedule))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate;

    fn assert_valid(durations: &[u32], c: i64, t_budget: i64, schedule: &Schedule) {
        simulate::replay(durations, c, t_budget as u32, schedule)
            .unwrap_or_else(|e| panic!("invalid schedule {:?}: {:?}", schedule, e));
    }

    #[test]
    fn e1_four_chickens() {
        let durations = [1u32, 3, 6, 8];
        let sched = gen_solution(&durations, 2, 18).expect("feasible");
        assert_valid(&durations, 2, 18, &sched);
    }

    #[test]
    fn e2_any_valid_schedule() {
        let durations = [1u32, 2, 5, 10];
        let sched = gen_solution(&durations, 2, 17).expect("feasible");
        assert_valid(&durations, 2, 17, &sched);
    }

    #[test]
    fn e3_singleton_feasible() {
        let durations = [5u32];
        let sched = gen_solution(&durations, 1, 5).expect("feasible");
        assert_eq!(sched, vec![(0, vec![1])]);
    }

    #[test]
    fn e4_singleton_infeasible() {
        let durations = [5u32];
        assert_eq!(gen_solution(&durations, 1, 4), None);
    }

    #[test]
    fn e5_two_equal_fast_chickens() {
        let durations = [1u32, 1];
        let sched = gen_solution(&durations, 2, 1).expect("feasible");
        assert_eq!(sched, vec![(0, vec![1, 2])]);
    }

    #[test]
    fn e6_empty_input() {
        let durations: [u32; 0] = [];
        assert_eq!(gen_solution(&durations, 1, 0), Some(Vec::new()));
    }

    #[test]
    fn negative_budget_is_no_solution() {
        assert_eq!(gen_solution(&[1, 2], 2, -1), None);
    }

    #[test]
    fn nonpositive_capacity_is_no_solution() {
        assert_eq!(gen_solution(&[1, 2], 0, 10), None);
    }

    #[test]
    fn canonicalization_does_not_change_feasibility() {
        let durations = [1u32, 3, 6, 8];
        for canon in [true, false] {
            let opts = EncodeOptions { canonicalize: canon };
            let sched = try_gen_solution(&durations, 2, 18, opts).unwrap();
            assert!(sched.is_some(), "canonicalize={canon}");
            assert_valid(&durations, 2, 18, &sched.unwrap());
        }
    }
}
