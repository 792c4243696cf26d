use circlescan_core::models::{AlignedRead, ReadId};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::score::CircleMetrics;

/// An end read paired with the metrics computed against its start read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CandidateMatch {
    pub end_read: AlignedRead,
    pub metrics: CircleMetrics,
}

/// A start read and its candidates, in discovery order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CircleEntry {
    pub start_read: AlignedRead,
    pub candidates: Vec<CandidateMatch>,
}

///
/// Result of one scan: entries keyed by the identity of their start read.
///
/// Entries iterate in the order their start reads were discovered. Two reads sharing a
/// query name are separate entries.
///
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CircleReport {
    entries: Vec<CircleEntry>,
}

impl CircleReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the candidates of a start read. A start read already present is replaced in
    /// place, keeping its original position.
    pub fn insert(&mut self, start_read: AlignedRead, candidates: Vec<CandidateMatch>) {
        let entry = CircleEntry {
            start_read,
            candidates,
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.start_read.id == entry.start_read.id)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, id: ReadId) -> Option<&CircleEntry> {
        self.entries.iter().find(|e| e.start_read.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CircleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of candidates across all entries.
    pub fn candidate_count(&self) -> usize {
        self.entries.iter().map(|e| e.candidates.len()).sum()
    }
}

impl<'a> IntoIterator for &'a CircleReport {
    type Item = &'a CircleEntry;
    type IntoIter = std::slice::Iter<'a, CircleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
