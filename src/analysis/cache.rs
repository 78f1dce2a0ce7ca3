//! First-occurrence tooltip cache
//!
//! Maps node identifiers to the context they were first introduced in. The
//! cache is write-once per identifier: later segments never replace an
//! existing entry, whether they are sentence or document graphs.

use super::types::TooltipEntry;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier → tooltip entry, in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TooltipCache {
    entries: IndexMap<String, TooltipEntry>,
}

impl TooltipCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the identifier is already present
    ///
    /// Returns `true` when the entry was written.
    pub fn insert_first(&mut self, identifier: impl Into<String>, entry: TooltipEntry) -> bool {
        self.insert_first_with(identifier, || entry)
    }

    /// Like [`insert_first`](Self::insert_first), building the entry only when it is written
    pub fn insert_first_with<F>(&mut self, identifier: impl Into<String>, entry: F) -> bool
    where
        F: FnOnce() -> TooltipEntry,
    {
        match self.entries.entry(identifier.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(entry());
                true
            }
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&TooltipEntry> {
        self.entries.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TooltipEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Count of entries that came from the document-level fallback
    pub fn fallback_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_fallback()).count()
    }
}
