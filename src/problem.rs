//! Domain wrapper around the raw `durations` slice. A chicken's only
//! attribute is its crossing duration, so this stays a thin read-only view
//! rather than a richer per-entity record.

use derive_more::{Display, From, Into};

/// 0-based internal chicken index. Converted to the 1-based passenger ids
/// of the public [`crate::Schedule`] only at the decode boundary.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, From, Into)]
pub struct ChickenId(u32);

/// Read-only view over one CCP instance's chicken durations.
#[derive(Clone, Copy, Debug)]
pub struct Problem<'a> {
    durations: &'a [u32],
}

impl<'a> Problem<'a> {
    pub fn new(durations: &'a [u32]) -> Self {
        Problem { durations }
    }

    pub fn n(&self) -> usize {
        self.durations.len()
    }

    pub fn chickens(&self) -> impl Iterator<Item = ChickenId> {
        (0..self.durations.len() as u32).map(ChickenId)
    }

    pub fn duration(&self, p: ChickenId) -> u32 {
        self.durations[p.0 as usize]
    }

    /// The largest trip duration that can ever occur.
    pub fn max_duration(&self) -> u32 {
        self.durations.iter().copied().max().unwrap_or(0)
    }

    pub fn min_duration(&self) -> u32 {
        self.durations.iter().copied().min().unwrap_or(0)
    }

    pub fn sum_duration(&self) -> u64 {
        self.durations.iter().map(|&d| d as u64).sum()
    }
}
