//! Encodes `at_most(lits, k)` and `equals(lits, k)` into plain CNF,
//! allocating fresh auxiliary variables through the [`Registry`] as needed.
//!
//! The default strategy is the classic sequential-counter (Sinz) encoding,
//! swappable behind the [`Encoder`] trait.

use crate::clauses::{ClauseBuffer, Lit};
use crate::registry::Registry;

/// A pluggable cardinality-constraint strategy. Implementations may
/// allocate fresh variables via `registry.fresh()`; callers treat them as
/// opaque.
pub trait Encoder {
    /// Emit clauses such that every satisfying assignment has at most `k`
    /// of `lits` true.
    fn at_most(&self, registry: &mut Registry, buf: &mut ClauseBuffer, lits: &[Lit], k: usize);

    /// Emit clauses such that every satisfying assignment has exactly `k`
    /// of `lits` true.
    fn equals(&self, registry: &mut Registry, buf: &mut ClauseBuffer, lits: &[Lit], k: usize) {
        self.at_most(registry, buf, lits, k);
        at_least(self, registry, buf, lits, k);
    }
}

/// `at_least(lits, k)` is `at_most(¬lits, n - k)`; a default free function
/// rather than a trait method since it is fully derived from `at_most`.
fn at_least<E: Encoder + ?Sized>(
    encoder: &E,
    registry: &mut Registry,
    buf: &mut ClauseBuffer,
    lits: &[Lit],
    k: usize,
) {
    if k == 0 {
        return;
    }
    if k > lits.len() {
        // Unsatisfiable: force a trivial contradiction.
        buf.push(vec![]);
        return;
    }
    let negated: Vec<Lit> = lits.iter().map(|l| !*l).collect();
    encoder.at_most(registry, buf, &negated, lits.len() - k);
}

/// Sequential-counter ("ladder"/Sinz) encoding: `O(n·k)` clauses and
/// auxiliary variables, no native cardinality support required of the
/// downstream solver.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialCounter;

impl Encoder for SequentialCounter {
    fn at_most(&self, registry: &mut Registry, buf: &mut ClauseBuffer, lits: &[Lit], k: usize) {
        let n = lits.len();
        if n == 0 || k >= n {
            return; // trivially satisfied
        }
        if k == 0 {
            for &l in lits {
                buf.push(vec![!l]);
            }
            return;
        }

        // s[i][j] ("at least j+1 of the first i+1 literals are true"),
        // i in 0..n-1, j in 0..k, 0-indexed registers of the Sinz encoding.
        let mut s: Vec<Vec<Lit>> = Vec::with_capacity(n - 1);
        for _ in 0..n - 1 {
            let row: Vec<Lit> = (0..k).map(|_| Lit::positive(registry.fresh())).collect();
            s.push(row);
        }

        // i = 0 (first literal): x_0 -> s[0][0]; s[0][j] forced false for j>0.
        buf.push(vec![!lits[0], s[0][0]]);
        for j in 1..k {
            buf.push(vec![!s[0][j]]);
        }

        for i in 1..n - 1 {
            buf.push(vec![!lits[i], s[i][0]]);
            buf.push(vec![!s[i - 1][0], s[i][0]]);
            for j in 1..k {
                buf.push(vec![!lits[i], !s[i - 1][j - 1], s[i][j]]);
                buf.push(vec![!s[i - 1][j], s[i][j]]);
            }
            buf.push(vec![!lits[i], !s[i - 1][k - 1]]);
        }

        // Last literal: forbid it once the counter has already reached k.
        buf.push(vec![!lits[n - 1], !s[n - 2][k - 1]]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{glucose::GlucoseSolver, SatOutcome, SatSolver};

    fn fresh_lits(registry: &mut Registry, n: usize) -> Vec<Lit> {
        (0..n).map(|_| Lit::positive(registry.fresh())).collect()
    }

    fn count_true(model: &[bool], lits: &[Lit]) -> usize {
        lits.iter()
            .filter(|l| {
                let idx = l.var().get() as usize - 1;
                model[idx] != l.is_negative()
            })
            .count()
    }

    #[test]
    fn at_most_k_forbids_more_than_k() {
        let mut registry = Registry::new();
        let mut buf = ClauseBuffer::new();
        let lits = fresh_lits(&mut registry, 5);
        SequentialCounter.at_most(&mut registry, &mut buf, &lits, 2);
        // Force all 5 literals true; should be UNSAT since at most 2 allowed.
        for &l in &lits {
            buf.unit(l);
        }
        let mut solver = GlucoseSolver::new();
        for c in buf.into_vec() {
            solver.add_clause(&c);
        }
        match solver.solve(registry.num_vars()) {
            Ok(SatOutcome::Unsat) => {}
            other => panic!("expected UNSAT, got {:?}", other),
        }
    }

    #[test]
    fn at_most_k_allows_exactly_k() {
        let mut registry = Registry::new();
        let mut buf = ClauseBuffer::new();
        let lits = fresh_lits(&mut registry, 5);
        SequentialCounter.at_most(&mut registry, &mut buf, &lits, 2);
        for &l in &lits[0..2] {
            buf.unit(l);
        }
        for &l in &lits[2..] {
            buf.unit(!l);
        }
        let mut solver = GlucoseSolver::new();
        for c in buf.into_vec() {
            solver.add_clause(&c);
        }
        match solver.solve(registry.num_vars()) {
            Ok(SatOutcome::Sat(model)) => assert_eq!(count_true(&model, &lits), 2),
            other => panic!("expected SAT, got {:?}", other),
        }
    }

    #[test]
    fn equals_k_pins_the_count() {
        let mut registry = Registry::new();
        let mut buf = ClauseBuffer::new();
        let lits = fresh_lits(&mut registry, 4);
        SequentialCounter.equals(&mut registry, &mut buf, &lits, 2);
        let mut solver = GlucoseSolver::new();
        for c in buf.into_vec() {
            solver.add_clause(&c);
        }
        match solver.solve(registry.num_vars()) {
            Ok(SatOutcome::Sat(model)) => assert_eq!(count_true(&model, &lits), 2),
            other => panic!("expected SAT, got {:?}", other),
        }
    }
}
