//! Property-based tests over random small instances.

use ccp::simulate;
use proptest::prelude::*;

fn durations_strategy() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(1u32..=10, 1..=5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A returned schedule always replays to a valid, fully-crossed state.
    #[test]
    fn schedule_validity(durations in durations_strategy(), c_raw in 1usize..=5) {
        let c = c_raw.min(durations.len()).max(1) as i64;
        let t_budget = ccp::find_duration(&durations, c) as i64;
        if let Some(schedule) = ccp::gen_solution(&durations, c, t_budget) {
            prop_assert!(simulate::replay(&durations, c, t_budget as u32, &schedule).is_ok());
        }
    }

    /// Feasible at `T` implies feasible at `T + 1`.
    #[test]
    fn monotonicity(durations in durations_strategy(), c_raw in 1usize..=5, extra in 0i64..5) {
        let c = c_raw.min(durations.len()).max(1) as i64;
        let t_budget = ccp::find_duration(&durations, c) as i64 + extra;
        let feasible_here = ccp::gen_solution(&durations, c, t_budget).is_some();
        if feasible_here {
            prop_assert!(ccp::gen_solution(&durations, c, t_budget + 1).is_some());
        }
    }

    /// `find_duration` never returns less than the slowest individual chicken.
    #[test]
    fn lower_bound(durations in durations_strategy(), c_raw in 1usize..=5) {
        let c = c_raw.min(durations.len()).max(1) as i64;
        let t = ccp::find_duration(&durations, c);
        let d_max = *durations.iter().max().unwrap() as u64;
        prop_assert!(t >= d_max);
    }

    /// `find_duration` never exceeds the "everyone paired with the fastest
    /// chauffeur, who also ferries the boat back alone" bound.
    #[test]
    fn upper_bound(durations in durations_strategy(), c_raw in 1usize..=5) {
        let c = c_raw.min(durations.len()).max(1) as i64;
        let t = ccp::find_duration(&durations, c);
        let sum: u64 = durations.iter().map(|&d| d as u64).sum();
        let min = *durations.iter().min().unwrap() as u64;
        prop_assert!(t <= 2 * sum - min);
    }

    /// No chickens, any legal capacity and budget, crosses trivially.
    #[test]
    fn empty_input(c in 1i64..=5, t_budget in 0i64..=20) {
        prop_assert_eq!(ccp::gen_solution(&[], c, t_budget), Some(Vec::new()));
    }

    /// A single chicken with capacity 1 crosses in one trip iff the budget
    /// covers its own duration.
    #[test]
    fn singleton(d in 1u32..=10, t_budget in 0i64..=20) {
        let result = ccp::gen_solution(&[d], 1, t_budget);
        if t_budget >= d as i64 {
            prop_assert_eq!(result, Some(vec![(0u32, vec![1u32])]));
        } else {
            prop_assert_eq!(result, None);
        }
    }
}
