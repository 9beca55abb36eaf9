//! Bounded recency list of entered colors
//!
//! Holds at most five colors, most recent first, deduplicated. The list is
//! persisted as an unordered set in the preference file; recency is
//! reconstructed at write time and is only authoritative within a run.

use crate::color::HexColor;
use crate::constants::history::MAX_ENTRIES;
use std::collections::BTreeSet;

/// Most-recent-first list of previously committed colors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HexColor>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from the persisted set
    ///
    /// The set carries no ordering, so entries come back in the set's
    /// iteration order. Strings that are not complete hex colors are
    /// skipped; only six-digit colors can ever have been stored by this
    /// crate.
    pub fn from_set(stored: &BTreeSet<String>) -> Self {
        let entries = stored
            .iter()
            .filter_map(|raw| HexColor::parse(raw).ok())
            .take(MAX_ENTRIES)
            .collect();
        Self { entries }
    }

    /// The persisted form: an unordered set of hex strings
    pub fn to_set(&self) -> BTreeSet<String> {
        self.entries.iter().map(HexColor::to_string).collect()
    }

    /// Record a committed color
    ///
    /// A color already present leaves the history untouched, in length
    /// and in order. A new color is inserted at the front; the oldest
    /// entry is evicted past the capacity of five. Returns true when the
    /// history changed.
    pub fn record(&mut self, color: HexColor) -> bool {
        if self.entries.contains(&color) {
            return false;
        }
        self.entries.insert(0, color);
        self.entries.truncate(MAX_ENTRIES);
        true
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[HexColor] {
        &self.entries
    }

    pub fn contains(&self, color: &HexColor) -> bool {
        self.entries.contains(color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
