//! A plain stats accumulator plus an injected `FnMut(String,
//! serde_json::Value)` sink so callers (the demo CLI, a benchmark harness,
//! ...) can route stats wherever they like without the core depending on
//! any particular reporting format.

use std::time::Duration;

/// Per-`find_duration` search run.
#[derive(Default, Debug, Clone)]
pub struct Stats {
    pub budgets_tried: usize,
    pub n_sat: usize,
    pub n_unsat: usize,
    pub total_clauses: usize,
    pub total_vars: usize,
    pub solver_time: Duration,
}

/// Emit `stats` through `output_stats`, one key at a time.
pub fn report(output_stats: &mut impl FnMut(String, serde_json::Value), stats: &Stats) {
    output_stats("budgets_tried".to_string(), stats.budgets_tried.into());
    output_stats("n_sat".to_string(), stats.n_sat.into());
    output_stats("n_unsat".to_string(), stats.n_unsat.into());
    output_stats("total_clauses".to_string(), stats.total_clauses.into());
    output_stats("total_vars".to_string(), stats.total_vars.into());
    output_stats(
        "solver_time_secs".to_string(),
        stats.solver_time.as_secs_f64().into(),
    );
}
