//! The full propositional encoding of one chicken-crossing instance
//! `(durations, c, T)`. After [`build`] completes, any model of the
//! returned clauses is a valid schedule of length ≤ `T`, and any valid
//! schedule of length ≤ `T` corresponds to at least one model.

use crate::cardinality::{Encoder, SequentialCounter};
use crate::clauses::{add_iff, add_iff_and, add_iff_or, ClauseBuffer, Lit};
use crate::problem::Problem;
use crate::registry::{Registry, VarKey};

/// Toggle for the timeline-compactness clauses. These only forbid
/// schedules with gratuitous idle time; disabling them changes nothing
/// about which instances are feasible, only how many equivalent models
/// exist. Every feasibility test in this crate is run with both settings
/// to confirm that.
#[derive(Clone, Copy, Debug)]
pub struct EncodeOptions {
    pub canonicalize: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { canonicalize: true }
    }
}

/// A fully built CNF instance, ready for the [`crate::solver::SatSolver`].
pub struct Encoding {
    pub registry: Registry,
    pub clauses: Vec<Vec<Lit>>,
    pub num_vars: u32,
    pub t_budget: u32,
}

/// Outcome of attempting to build the CNF for one `(durations, c, T)`
/// instance.
pub enum BuildOutcome {
    /// `n = 0`: the puzzle is vacuously solved by the empty schedule,
    /// without ever invoking a solver.
    EmptySchedule,
    /// `c ≤ 0`, `T < 0`, or `max(durations) > T`: no schedule can exist,
    /// again without invoking a solver.
    TriviallyUnsat,
    /// A well-formed (possibly unsatisfiable once solved) clause set.
    Built(Encoding),
}

/// Build the CNF for one `(durations, c, T)` instance.
pub fn build(problem: Problem, c: i64, t_budget: i64, opts: EncodeOptions) -> BuildOutcome {
    let _p = hprof::enter("cnf_build");

    if problem.n() == 0 {
        return BuildOutcome::EmptySchedule;
    }
    if c <= 0 || t_budget < 0 {
        return BuildOutcome::TriviallyUnsat;
    }
    let d_max = problem.max_duration();
    if d_max as i64 > t_budget {
        return BuildOutcome::TriviallyUnsat;
    }

    let t_budget = t_budget as u32;
    let c = c as usize;

    let mut registry = Registry::new();
    // Clause count grows roughly as T*(n+D) + T^2*n; size the buffer ahead
    // of time to avoid reallocation churn on larger instances.
    let n = problem.n();
    let approx = (t_budget as usize) * (n + d_max as usize)
        + (t_budget as usize).saturating_mul(t_budget as usize) * n;
    let mut buf = ClauseBuffer::with_capacity(approx.max(64));

    let encoder = SequentialCounter;

    emit_initial_state(&mut registry, &mut buf, problem, t_budget);
    emit_all_on_b(&mut registry, &mut buf, problem, t_budget);
    emit_departure_and_capacity(&mut registry, &mut buf, problem, t_budget, c, &encoder);
    emit_trip_duration(&mut registry, &mut buf, t_budget, d_max);
    emit_slowest_passenger(&mut registry, &mut buf, problem, t_budget, d_max);
    emit_side_at_departure(&mut registry, &mut buf, problem, t_budget);
    emit_atomicity(&mut registry, &mut buf, problem, t_budget, d_max);
    emit_arrival(&mut registry, &mut buf, t_budget, d_max);
    if opts.canonicalize {
        emit_timeline_compactness(&mut registry, &mut buf, t_budget);
    }
    emit_boat_toggle(&mut registry, &mut buf, t_budget);
    emit_link(&mut registry, &mut buf, problem, t_budget, d_max);
    emit_move(&mut registry, &mut buf, problem, t_budget, d_max);
    emit_bank_evolution(&mut registry, &mut buf, problem, t_budget);
    emit_objective(&mut registry, &mut buf, problem, t_budget);

    log::debug!(
        "encoded T={} n={} c={} D={} -> {} vars, {} clauses",
        t_budget,
        n,
        c,
        d_max,
        registry.num_vars(),
        buf.len()
    );

    let num_vars = registry.num_vars();
    BuildOutcome::Built(Encoding {
        registry,
        clauses: buf.into_vec(),
        num_vars,
        t_budget,
    })
}

/// Step 1: `A(p,0)` for all `p`; `side(0)` holds.
fn emit_initial_state(registry: &mut Registry, buf: &mut ClauseBuffer, problem: Problem, _t: u32) {
    for p in problem.chickens() {
        let a = registry.var(VarKey::A { p: p.into(), t: 0 });
        buf.unit(Lit::positive(a));
    }
    let side0 = registry.var(VarKey::Side { t: 0 });
    buf.unit(Lit::positive(side0));
}

/// Step 2: `ALL(t) → ¬A(p,t)` for every `p`; `ALL(t) ∨ A(1,t) ∨ … ∨ A(n,t)`.
fn emit_all_on_b(registry: &mut Registry, buf: &mut ClauseBuffer, problem: Problem, t_budget: u32) {
    for t in 0..=t_budget {
        let all_t = Lit::positive(registry.var(VarKey::All { t }));
        let mut disj = vec![all_t];
        for p in problem.chickens() {
            let a = Lit::positive(registry.var(VarKey::A { p: p.into(), t }));
            buf.push(vec![!all_t, !a]);
            disj.push(a);
        }
        buf.push(disj);
    }
}

/// Step 3: departure predicate, capacity, and the `t = T` "no time left"
/// restriction.
fn emit_departure_and_capacity(
    registry: &mut Registry,
    buf: &mut ClauseBuffer,
    problem: Problem,
    t_budget: u32,
    c: usize,
    encoder: &impl Encoder,
) {
    for t in 0..=t_budget {
        let dep_t = Lit::positive(registry.var(VarKey::Dep { t }));
        let mut board_lits = Vec::with_capacity(problem.n());
        for p in problem.chickens() {
            let dep_tp = Lit::positive(registry.var(VarKey::Board { t, p: p.into() }));
            buf.push(vec![!dep_tp, dep_t]); // dep(t,p) -> DEP(t)
            board_lits.push(dep_tp);
        }
        let mut at_least_one = vec![!dep_t];
        at_least_one.extend_from_slice(&board_lits); // DEP(t) -> ∨ dep(t,p)
        buf.push(at_least_one);

        encoder.at_most(registry, buf, &board_lits, c);

        if t == t_budget {
            buf.unit(!dep_t);
            for &bl in &board_lits {
                buf.unit(!bl);
            }
        }
    }
}

/// Step 4: exactly one `dur(t,d)` per `t`; `dur(t,0) ↔ ¬DEP(t)`; forbid
/// durations that would overrun the budget.
fn emit_trip_duration(registry: &mut Registry, buf: &mut ClauseBuffer, t_budget: u32, d_max: u32) {
    for t in 0..=t_budget {
        let dur_lits: Vec<Lit> = (0..=d_max)
            .map(|d| Lit::positive(registry.var(VarKey::Dur { t, d })))
            .collect();
        SequentialCounter.equals(registry, buf, &dur_lits, 1);

        let dep_t = Lit::positive(registry.var(VarKey::Dep { t }));
        add_iff(buf, dur_lits[0], !dep_t);

        for d in 1..=d_max {
            if t + d > t_budget {
                buf.unit(!dur_lits[d as usize]);
            }
        }
    }
}

/// Step 5: a trip of duration `d` carries only passengers with
/// `duration(p) ≤ d`, and at least one passenger with `duration(p) = d`;
/// conversely every passenger only boards trips long enough for them.
fn emit_slowest_passenger(
    registry: &mut Registry,
    buf: &mut ClauseBuffer,
    problem: Problem,
    t_budget: u32,
    d_max: u32,
) {
    for t in 0..=t_budget {
        for d in 1..=d_max {
            let dur_td = Lit::positive(registry.var(VarKey::Dur { t, d }));
            let mut exactly_this_slow = vec![!dur_td];
            for p in problem.chickens() {
                let dep_tp = Lit::positive(registry.var(VarKey::Board { t, p: p.into() }));
                let dp = problem.duration(p);
                if dp > d {
                    buf.push(vec![!dur_td, !dep_tp]);
                } else if dp == d {
                    exactly_this_slow.push(dep_tp);
                }
            }
            if exactly_this_slow.len() == 1 {
                // No chicken this slow exists; this duration can never occur.
                buf.unit(!dur_td);
            } else {
                buf.push(exactly_this_slow);
            }
        }

        for p in problem.chickens() {
            let dep_tp = Lit::positive(registry.var(VarKey::Board { t, p: p.into() }));
            let dp = problem.duration(p);
            let mut at_least_one_valid_dur = vec![!dep_tp];
            for d in dp..=d_max {
                at_least_one_valid_dur.push(Lit::positive(registry.var(VarKey::Dur { t, d })));
            }
            buf.push(at_least_one_valid_dur);
        }
    }
}

/// Step 6: `dep(t,p) → (side(t) ↔ A(p,t))`.
fn emit_side_at_departure(
    registry: &mut Registry,
    buf: &mut ClauseBuffer,
    problem: Problem,
    t_budget: u32,
) {
    for t in 0..=t_budget {
        let side_t = Lit::positive(registry.var(VarKey::Side { t }));
        for p in problem.chickens() {
            let dep_tp = Lit::positive(registry.var(VarKey::Board { t, p: p.into() }));
            let a_pt = Lit::positive(registry.var(VarKey::A { p: p.into(), t }));
            buf.push(vec![!dep_tp, !side_t, a_pt]);
            buf.push(vec![!dep_tp, !a_pt, side_t]);
        }
    }
}

/// Step 7: trip atomicity — no departure may occur strictly inside an
/// in-progress trip.
fn emit_atomicity(
    registry: &mut Registry,
    buf: &mut ClauseBuffer,
    _problem: Problem,
    t_budget: u32,
    d_max: u32,
) {
    for t in 0..=t_budget {
        for d in 1..=d_max {
            if t + d > t_budget {
                continue;
            }
            let dur_td = Lit::positive(registry.var(VarKey::Dur { t, d }));
            for tp in (t + 1)..(t + d) {
                let dep_tp = Lit::positive(registry.var(VarKey::Dep { t: tp }));
                buf.push(vec![!dur_td, !dep_tp]);
            }
        }
    }
}

/// Step 8: `ARR(0)` forbidden; `dur(t,d) → ARR(t+d)`;
/// `ARR(t) → ∨_{t'<t, d=t−t', 1≤d≤D} dur(t', d)`.
fn emit_arrival(registry: &mut Registry, buf: &mut ClauseBuffer, t_budget: u32, d_max: u32) {
    let arr0 = Lit::positive(registry.var(VarKey::Arr { t: 0 }));
    buf.unit(!arr0);

    for t in 0..=t_budget {
        for d in 1..=d_max {
            if t + d > t_budget {
                continue;
            }
            let dur_td = Lit::positive(registry.var(VarKey::Dur { t, d }));
            let arr_arrival = Lit::positive(registry.var(VarKey::Arr { t: t + d }));
            buf.push(vec![!dur_td, arr_arrival]);
        }
    }

    for t in 1..=t_budget {
        let arr_t = Lit::positive(registry.var(VarKey::Arr { t }));
        let mut possible_durs = vec![!arr_t];
        for d in 1..=d_max.min(t) {
            let tprime = t - d;
            possible_durs.push(Lit::positive(registry.var(VarKey::Dur { t: tprime, d })));
        }
        buf.push(possible_durs);
    }
}

/// Step 9 (optional canonicalization): `ALL(0) ∨ DEP(0)`;
/// `DEP(t>0) → ARR(t)`; `ARR(t) ∧ ¬ALL(t) → DEP(t)` for `t < T`.
fn emit_timeline_compactness(registry: &mut Registry, buf: &mut ClauseBuffer, t_budget: u32) {
    let all0 = Lit::positive(registry.var(VarKey::All { t: 0 }));
    let dep0 = Lit::positive(registry.var(VarKey::Dep { t: 0 }));
    buf.push(vec![all0, dep0]);

    for t in 1..=t_budget {
        let dep_t = Lit::positive(registry.var(VarKey::Dep { t }));
        let arr_t = Lit::positive(registry.var(VarKey::Arr { t }));
        buf.push(vec![!dep_t, arr_t]);
    }

    for t in 0..t_budget {
        let arr_t = Lit::positive(registry.var(VarKey::Arr { t }));
        let all_t = Lit::positive(registry.var(VarKey::All { t }));
        let dep_t = Lit::positive(registry.var(VarKey::Dep { t }));
        buf.push(vec![!arr_t, all_t, dep_t]);
    }
}

/// Step 10: `side(t) XOR side(t−1) ↔ ARR(t)` for every `t ≥ 1`, as the
/// four clauses of a standard XOR gate.
fn emit_boat_toggle(registry: &mut Registry, buf: &mut ClauseBuffer, t_budget: u32) {
    for t in 1..=t_budget {
        let a = Lit::positive(registry.var(VarKey::Side { t }));
        let b = Lit::positive(registry.var(VarKey::Side { t: t - 1 }));
        let arr = Lit::positive(registry.var(VarKey::Arr { t }));
        buf.push(vec![!a, !b, !arr]);
        buf.push(vec![a, b, !arr]);
        buf.push(vec![a, !b, arr]);
        buf.push(vec![!a, b, arr]);
    }
}

/// Step 11: `link(t,d,p) ↔ dep(t,p) ∧ dur(t,d)`.
fn emit_link(
    registry: &mut Registry,
    buf: &mut ClauseBuffer,
    problem: Problem,
    t_budget: u32,
    d_max: u32,
) {
    for t in 0..=t_budget {
        for d in 1..=d_max {
            if t + d > t_budget {
                continue;
            }
            let dur_td = Lit::positive(registry.var(VarKey::Dur { t, d }));
            for p in problem.chickens() {
                let dep_tp = Lit::positive(registry.var(VarKey::Board { t, p: p.into() }));
                let link_tdp = Lit::positive(registry.var(VarKey::Link { t, d, p: p.into() }));
                add_iff_and(buf, link_tdp, dep_tp, dur_td);
            }
        }
    }
}

/// Step 12: `move(t,p) ↔ ∨_{t'<t} link(t', t−t', p)` (bounded by `t−t' ≤ D`).
fn emit_move(
    registry: &mut Registry,
    buf: &mut ClauseBuffer,
    problem: Problem,
    t_budget: u32,
    d_max: u32,
) {
    for t in 0..=t_budget {
        for p in problem.chickens() {
            let move_tp = Lit::positive(registry.var(VarKey::Move { t, p: p.into() }));
            let mut lits = Vec::new();
            for d in 1..=d_max.min(t) {
                let tprime = t - d;
                lits.push(Lit::positive(registry.var(VarKey::Link { t: tprime, d, p: p.into() })));
            }
            add_iff_or(buf, move_tp, &lits);
        }
    }
}

/// Step 13: bank evolution. Without `ARR(t)`, `A(p,t) = A(p,t−1)`; with
/// `ARR(t)`, `A(p,t) ≠ A(p,t−1) ↔ move(t,p)`.
fn emit_bank_evolution(
    registry: &mut Registry,
    buf: &mut ClauseBuffer,
    problem: Problem,
    t_budget: u32,
) {
    for t in 1..=t_budget {
        let arr_t = Lit::positive(registry.var(VarKey::Arr { t }));
        for p in problem.chickens() {
            let a_t = Lit::positive(registry.var(VarKey::A { p: p.into(), t }));
            let a_prev = Lit::positive(registry.var(VarKey::A { p: p.into(), t: t - 1 }));
            let mv = Lit::positive(registry.var(VarKey::Move { t, p: p.into() }));

            // ¬ARR(t) -> (A(p,t) <-> A(p,t-1))
            buf.push(vec![arr_t, !a_t, a_prev]);
            buf.push(vec![arr_t, a_t, !a_prev]);

            // ARR(t) -> (A(p,t) <-> A(p,t-1) XOR move(t,p)), as a guarded
            // 3-input XOR gate (4 clauses).
            buf.push(vec![!arr_t, !a_t, a_prev, mv]);
            buf.push(vec![!arr_t, !a_t, !a_prev, !mv]);
            buf.push(vec![!arr_t, a_t, !a_prev, mv]);
            buf.push(vec![!arr_t, a_t, a_prev, !mv]);
        }
    }
}

/// Step 14: the objective, `ALL(T)`.
fn emit_objective(registry: &mut Registry, buf: &mut ClauseBuffer, _problem: Problem, t_budget: u32) {
    let all_t = Lit::positive(registry.var(VarKey::All { t: t_budget }));
    buf.unit(all_t);
}
