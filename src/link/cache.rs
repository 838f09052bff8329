use std::collections::HashMap;

use super::{LinkDirection, LinkedDocument};
use crate::path::InstancePath;

/// A cached listing is keyed by direction and whether it was recursive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub direction: LinkDirection,
    pub recursive: bool,
}

impl CacheKey {
    #[must_use]
    pub fn new(direction: LinkDirection, recursive: bool) -> Self {
        Self {
            direction,
            recursive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub documents: Vec<LinkedDocument>,
    /// Bumped on every write to this entry.
    pub revision: u64,
}

/// Linked-document listings. Writes replace or edit whole entries; the last
/// write to an entry wins.
#[derive(Debug, Default)]
pub struct LinkCache {
    entries: HashMap<CacheKey, CacheEntry>,
    next_revision: u64,
}

impl LinkCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: CacheKey) -> Option<&CacheEntry> {
        self.entries.get(&key)
    }

    fn bump(&mut self) -> u64 {
        self.next_revision = self.next_revision.saturating_add(1);
        self.next_revision
    }

    /// Replaces the listing under `key`. Returns the new revision.
    pub fn set(&mut self, key: CacheKey, documents: Vec<LinkedDocument>) -> u64 {
        let revision = self.bump();
        self.entries.insert(
            key,
            CacheEntry {
                documents,
                revision,
            },
        );
        revision
    }

    /// Appends to the listing under `key` if it was fetched. A listing that
    /// was never fetched stays absent so the next read goes to the backend.
    /// Returns the new revision, or `None` when nothing was cached.
    pub fn append(&mut self, key: CacheKey, document: LinkedDocument) -> Option<u64> {
        let revision = self.next_revision.saturating_add(1);
        let entry = self.entries.get_mut(&key)?;
        entry.documents.push(document);
        entry.revision = revision;
        self.next_revision = revision;
        Some(revision)
    }

    /// Drops every document pointing at `target` from the listing under
    /// `key`. Returns how many were removed.
    pub fn remove_matching(&mut self, key: CacheKey, target: &InstancePath) -> usize {
        let revision = self.bump();
        let Some(entry) = self.entries.get_mut(&key) else {
            return 0;
        };
        let before = entry.documents.len();
        entry.documents.retain(|document| !document.matches(target));
        entry.revision = revision;
        before.saturating_sub(entry.documents.len())
    }

    /// Drops both listings of `direction`.
    pub fn invalidate_direction(&mut self, direction: LinkDirection) {
        self.entries.retain(|key, _| key.direction != direction);
    }

    /// Drops the listing under `key`.
    pub fn invalidate(&mut self, key: CacheKey) {
        self.entries.remove(&key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
