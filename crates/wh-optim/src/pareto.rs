//! The Pareto archive of mutually non-dominated metrics.

use crate::Metrics;

/// A set of [`Metrics`] in which no member dominates another.
///
/// Duplicates are kept: equal tuples do not dominate each other.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParetoArchive {
    members: Vec<Metrics>,
}

impl ParetoArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `candidate` to the archive.
    ///
    /// Members dominated by `candidate` are dropped; `candidate` is then
    /// inserted unless a remaining member dominates it.  Returns `true` if
    /// it was inserted.
    pub fn update(&mut self, candidate: Metrics) -> bool {
        self.members.retain(|m| !candidate.dominates(m));
        if self.members.iter().any(|m| m.dominates(&candidate)) {
            return false;
        }
        self.members.push(candidate);
        true
    }

    pub fn members(&self) -> &[Metrics] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metrics> + '_ {
        self.members.iter()
    }

    /// `true` if no member dominates another.
    pub fn is_mutually_non_dominated(&self) -> bool {
        self.members
            .iter()
            .all(|a| self.members.iter().all(|b| !a.dominates(b)))
    }
}
