//! An append-only collection of disjunctive clauses over signed integer
//! literals.

use std::ops::Not;

use typed_index_collections::TiVec;

use crate::registry::Var;

/// A signed, non-zero literal: positive for the variable itself, negative
/// for its negation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Lit(i32);

impl Lit {
    pub fn positive(v: Var) -> Lit {
        Lit(v.get() as i32)
    }

    /// `true` if this is the negation of the variable (i.e. carries `¬`).
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// The underlying variable, regardless of polarity.
    pub fn var(self) -> Var {
        Var::from(self.0.unsigned_abs())
    }
}

impl Not for Lit {
    type Output = Lit;
    fn not(self) -> Lit {
        Lit(-self.0)
    }
}

impl From<Var> for Lit {
    fn from(v: Var) -> Lit {
        Lit::positive(v)
    }
}

/// A disjunction of literals.
pub type Clause = Vec<Lit>;

/// An index into a [`ClauseBuffer`]; used only for diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClauseId(u32);
impl From<ClauseId> for usize {
    fn from(c: ClauseId) -> usize {
        c.0 as usize
    }
}
impl From<usize> for ClauseId {
    fn from(x: usize) -> ClauseId {
        ClauseId(x as u32)
    }
}

/// Append-only buffer of clauses, built up by the CNF Builder and handed to
/// the SAT Solver Adapter once, read-only, at the end of encoding.
#[derive(Debug, Default)]
pub struct ClauseBuffer {
    clauses: TiVec<ClauseId, Clause>,
}

impl ClauseBuffer {
    pub fn new() -> Self {
        ClauseBuffer { clauses: TiVec::new() }
    }

    /// Pre-size the backing storage; CNF size grows quadratically in `T`
    /// and linearly in `n` and `D`, so callers that know those bounds up
    /// front can avoid reallocation churn.
    pub fn with_capacity(cap: usize) -> Self {
        ClauseBuffer { clauses: TiVec::with_capacity(cap) }
    }

    pub fn push(&mut self, clause: Clause) -> ClauseId {
        self.clauses.push_and_get_key(clause)
    }

    /// Convenience for unit clauses.
    pub fn unit(&mut self, lit: Lit) -> ClauseId {
        self.push(vec![lit])
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn into_vec(self) -> Vec<Clause> {
        self.clauses.into()
    }
}

/// Emit the two clauses encoding a biconditional `a ↔ b`: `(¬a ∨ b)` and
/// `(a ∨ ¬b)`.
pub fn add_iff(buf: &mut ClauseBuffer, a: Lit, b: Lit) {
    buf.push(vec![!a, b]);
    buf.push(vec![a, !b]);
}

/// Emit the clauses encoding `a ↔ (b ∧ c)`, i.e. `a` is the auxiliary
/// conjunction of `b` and `c`: `(¬b ∨ ¬c ∨ a)`, `(¬a ∨ b)`, `(¬a ∨ c)`.
pub fn add_iff_and(buf: &mut ClauseBuffer, a: Lit, b: Lit, c: Lit) {
    buf.push(vec![!b, !c, a]);
    buf.push(vec![!a, b]);
    buf.push(vec![!a, c]);
}

/// Emit the clauses encoding `a ↔ (l1 ∨ l2 ∨ ... ∨ lk)`. If `lits` is
/// empty, `a` is pinned false.
pub fn add_iff_or(buf: &mut ClauseBuffer, a: Lit, lits: &[Lit]) {
    if lits.is_empty() {
        buf.push(vec![!a]);
        return;
    }
    let mut forward = vec![!a];
    forward.extend_from_slice(lits);
    buf.push(forward);
    for &l in lits {
        buf.push(vec![!l, a]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn negation_round_trips() {
        let mut r = Registry::new();
        let v = r.fresh();
        let lit = Lit::positive(v);
        assert!(!lit.is_negative());
        assert!((!lit).is_negative());
        assert_eq!(lit.var(), (!lit).var());
    }

    #[test]
    fn add_iff_emits_two_clauses() {
        let mut r = Registry::new();
        let mut buf = ClauseBuffer::new();
        let a = Lit::positive(r.fresh());
        let b = Lit::positive(r.fresh());
        add_iff(&mut buf, a, b);
        assert_eq!(buf.len(), 2);
    }
}
