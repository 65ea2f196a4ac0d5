//! Detection engine
//!
//! Applies the rule database to a raw `User-Agent` string and assembles an
//! immutable [`UserAgent`] record. Detection never fails: the worst case is
//! the `unknown` sentinel. The hot path takes one atomic snapshot of the
//! container and does CPU work only.
//!
//! Pipeline: exact robot lookup, then browser patterns, then operating
//! system patterns, then the browser's default OS mapping. The first rule
//! that matches wins per dimension; dimensions are resolved independently
//! and merged.

mod cache;

use tracing::trace;

use crate::data::{Data, Device};
use crate::model::{OperatingSystem, UserAgent, UserAgentBuilder};
use crate::store::DataStore;

use cache::ParseCache;

/// Parses `User-Agent` strings against the store's current database.
///
/// Stateless with respect to mutable shared data; safe to share across
/// threads and cheap to use concurrently.
pub struct UserAgentStringParser {
    store: DataStore,
    cache: Option<ParseCache>,
}

impl UserAgentStringParser {
    /// Create a parser over `store`, with the memoization size taken from
    /// the store's configuration.
    pub fn new(store: DataStore) -> Self {
        let capacity = store.config().parser_cache_size;
        Self::with_cache_size(store, capacity)
    }

    /// Create a parser with an explicit memoization size; `0` disables the
    /// cache.
    pub fn with_cache_size(store: DataStore, capacity: u64) -> Self {
        let cache = (capacity > 0).then(|| ParseCache::new(capacity));
        Self { store, cache }
    }

    /// Classify a raw `User-Agent` value.
    ///
    /// Total over all inputs; undetectable input yields
    /// [`UserAgent::empty`].
    pub fn parse(&self, user_agent: &str) -> UserAgent {
        if user_agent.is_empty() {
            return UserAgent::empty();
        }

        if let Some(cache) = &self.cache {
            cache.sync_generation(self.store.generation());
            if let Some(hit) = cache.get(user_agent) {
                trace!("parse cache hit");
                return hit;
            }
        }

        let data = self.store.current_data();
        let result = parse_snapshot(&data, user_agent);

        if let Some(cache) = &self.cache {
            cache.insert(user_agent.to_string(), result.clone());
        }
        result
    }

    /// Device category for a `User-Agent` value, when a device pattern
    /// matches.
    pub fn detect_device(&self, user_agent: &str) -> Option<Device> {
        let data = self.store.current_data();
        detect_device_snapshot(&data, user_agent).cloned()
    }

    /// Version of the rule database currently in use.
    pub fn current_version(&self) -> String {
        self.store.current_version()
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }
}

/// Run the detection pipeline against one container snapshot.
///
/// Deterministic: identical database version and input give an identical
/// record. Tie-breaks are fixed by pattern `order`, then `id`.
pub fn parse_snapshot(data: &Data, user_agent: &str) -> UserAgent {
    if user_agent.is_empty() {
        return UserAgent::empty();
    }

    // 1. Robot lookup: exact equality on the raw value.
    if let Some(robot) = data.robot_by_user_agent(user_agent) {
        trace!("robot match: {}", robot.name);
        return robot.to_user_agent();
    }

    let mut builder = UserAgentBuilder::new();

    // 2. Browser match, first pattern in evaluation order wins.
    let mut matched_browser = None;
    for p in data.browser_patterns() {
        let Some(caps) = p.pattern.regex().captures(user_agent) else {
            continue;
        };
        let Some(browser) = data.browser_by_id(p.browser_id) else {
            continue;
        };

        // capture group 1 is the version token by database convention
        let name = match caps.get(1).map(|m| m.as_str()).filter(|v| !v.is_empty()) {
            Some(version) => format!("{} {}", browser.family, version),
            None => browser.family.clone(),
        };

        trace!("browser pattern {} matched: {}", p.id, name);
        builder = builder
            .set_family(browser.family.clone())
            .set_name(name)
            .set_producer(browser.producer.clone())
            .set_producer_url(browser.producer_url.clone())
            .set_type_name(browser.type_name.clone())
            .set_url(browser.url.clone());
        matched_browser = Some(browser);
        break;
    }

    // 3. OS match, independent of the browser dimension.
    let mut operating_system = None;
    for p in data.operating_system_patterns() {
        if !p.pattern.regex().is_match(user_agent) {
            continue;
        }
        let Some(os) = data.operating_system_by_id(p.os_id) else {
            continue;
        };
        trace!("operating system pattern {} matched: {}", p.id, os.name);
        operating_system = Some(os_record(os));
        break;
    }

    // 4. OS fallback via the browser's default mapping.
    if operating_system.is_none() {
        if let Some(browser) = matched_browser {
            if let Some(os) = data.default_operating_system_for_browser(browser.id) {
                trace!("operating system fallback via browser {}: {}", browser.id, os.name);
                operating_system = Some(os_record(os));
            }
        }
    }

    // 5. Assemble; without a browser match the record keeps its sentinel
    // fields and carries whatever OS was detected.
    if let Some(os) = operating_system {
        builder = builder.set_operating_system(os);
    }
    builder.build()
}

fn os_record(os: &crate::data::OperatingSystemEntry) -> OperatingSystem {
    OperatingSystem::new(
        os.family.clone(),
        os.name.clone(),
        os.producer.clone(),
        os.producer_url.clone(),
        os.url.clone(),
    )
}

/// First matching device pattern in evaluation order, if any.
pub fn detect_device_snapshot<'a>(data: &'a Data, user_agent: &str) -> Option<&'a Device> {
    if user_agent.is_empty() {
        return None;
    }
    data.device_patterns()
        .iter()
        .find(|p| p.pattern.regex().is_match(user_agent))
        .and_then(|p| data.device_by_id(p.device_id))
}
