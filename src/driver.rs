//! Finds the minimum feasible `T` by repeatedly building and solving fresh
//! encodings.

use std::time::Instant;

use crate::api::try_gen_solution;
use crate::encoding::EncodeOptions;
use crate::problem::Problem;
use crate::stats::Stats;

/// Which search strategy [`find_duration`] uses. Feasibility is monotone
/// in `T` (feasible at `T` implies feasible at `T+1`), which is what makes
/// bisection valid; linear search is kept as a reference oracle and is
/// what the monotonicity test uses to double-check bisection's answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    Linear,
    Bisection,
}

/// Find the minimum feasible `T` for `(durations, c)`, with the search
/// strategy and a stats sink exposed for callers that want them (the
/// public `find_duration` in `lib.rs` wraps this with `Bisection` and a
/// no-op sink).
pub fn find_duration(
    durations: &[u32],
    c: i64,
    mode: SearchMode,
    output_stats: &mut impl FnMut(String, serde_json::Value),
) -> u64 {
    let _p = hprof::enter("find_duration");

    if durations.is_empty() || c <= 0 {
        return 0;
    }

    let problem = Problem::new(durations);
    let lower = problem.max_duration() as u64;
    let upper = 2 * problem.sum_duration() - problem.min_duration() as u64;

    let mut stats = Stats::default();
    let found = match mode {
        SearchMode::Linear => linear_search(durations, c, lower, upper, &mut stats),
        SearchMode::Bisection => bisection_search(durations, c, lower, upper, &mut stats),
    };

    crate::stats::report(output_stats, &stats);
    found.unwrap_or(upper)
}

fn feasible_at(durations: &[u32], c: i64, t: u64, stats: &mut Stats) -> bool {
    stats.budgets_tried += 1;
    let start = Instant::now();
    let result = try_gen_solution(durations, c, t as i64, EncodeOptions::default());
    stats.solver_time += start.elapsed();
    match result {
        Ok(Some(_)) => {
            stats.n_sat += 1;
            true
        }
        Ok(None) => {
            stats.n_unsat += 1;
            false
        }
        Err(e) => {
            log::error!("find_duration: solver backend failed at T={t}: {e}");
            false
        }
    }
}

fn linear_search(durations: &[u32], c: i64, lower: u64, upper: u64, stats: &mut Stats) -> Option<u64> {
    for t in lower..=upper {
        if feasible_at(durations, c, t, stats) {
            return Some(t);
        }
    }
    None
}

fn bisection_search(durations: &[u32], c: i64, lower: u64, upper: u64, stats: &mut Stats) -> Option<u64> {
    if !feasible_at(durations, c, upper, stats) {
        return None;
    }
    let mut lo = lower;
    let mut hi = upper;
    // Invariant: `hi` is always known feasible; `lo` may or may not be.
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if feasible_at(durations, c, mid, stats) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Some(hi)
}
