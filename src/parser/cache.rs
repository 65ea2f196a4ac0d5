use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;

use crate::model::UserAgent;

/// Bounded memoization of `input -> result`, LRU-evicted.
///
/// Results are only valid for one container generation; when the store
/// swaps in a new database the whole cache is dropped.
pub(crate) struct ParseCache {
    entries: Cache<String, UserAgent>,
    generation: AtomicU64,
}

impl ParseCache {
    pub(crate) fn new(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
            generation: AtomicU64::new(0),
        }
    }

    /// Drop every entry if the store generation moved since the last call.
    pub(crate) fn sync_generation(&self, generation: u64) {
        let seen = self.generation.swap(generation, Ordering::AcqRel);
        if seen != generation {
            self.entries.invalidate_all();
        }
    }

    pub(crate) fn get(&self, user_agent: &str) -> Option<UserAgent> {
        self.entries.get(user_agent)
    }

    pub(crate) fn insert(&self, user_agent: String, result: UserAgent) {
        self.entries.insert(user_agent, result);
    }
}
