//! Rule database store
//!
//! Serves the engine a current [`Data`] container, refreshes it in the
//! background and survives upstream failure. The container sits behind an
//! atomically swappable reference: detections load a snapshot once at entry
//! and never take a lock; the refresh task publishes replacements.
//!
//! Initialization order is local cache, then the bundled fallback resource.
//! The constructor never touches the network; an immediate asynchronous
//! refresh plus a periodic task (default every 24 h) keep the data current.

mod cache_file;
#[cfg(feature = "embedded-data")]
mod fallback;
mod fetcher;

pub use cache_file::CacheFiles;
pub use fetcher::{Fetcher, HttpFetcher};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use arc_swap::ArcSwap;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::config::DetectorConfig;
use crate::data::Data;
use crate::errors::Result;
use crate::loader::DataLoader;

/// Result of a [`DataStore::refresh`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A newer database was installed.
    Updated { version: String },
    /// Upstream has the same version as the in-memory container.
    NotModified,
    /// Coalesced with an in-flight refresh, or the store is shut down.
    Skipped,
}

/// Caches the rule database in memory and keeps it fresh.
///
/// Cheap to clone; all clones share the same container reference and
/// background task.
pub struct DataStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore")
            .field("version", &self.inner.current.load().version())
            .finish_non_exhaustive()
    }
}

struct StoreInner {
    config: DetectorConfig,
    fetcher: Arc<dyn Fetcher>,
    cache: CacheFiles,
    current: ArcSwap<Data>,
    /// Bumped on every successful swap; parse caches key off it.
    generation: AtomicU64,
    refresh_lock: Mutex<()>,
    stopped: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
}

impl DataStore {
    /// Create a store with the production HTTP fetcher.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(
            config.connect_timeout(),
            config.read_timeout(),
        ));
        Self::with_fetcher(config, fetcher)
    }

    /// Create a store with a custom fetcher implementation.
    pub fn with_fetcher(config: DetectorConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        config.validate()?;

        debug!("data store using {} fetcher", fetcher.name());
        let cache = CacheFiles::new(&config.cache_dir);
        let initial = initial_data(&cache);
        let (shutdown_tx, _) = watch::channel(false);

        let inner = Arc::new(StoreInner {
            config,
            fetcher,
            cache,
            current: ArcSwap::from_pointee(initial),
            generation: AtomicU64::new(0),
            refresh_lock: Mutex::new(()),
            stopped: AtomicBool::new(false),
            shutdown_tx,
        });

        spawn_background_refresh(&inner);

        Ok(Self { inner })
    }

    /// The latest successfully loaded container. Lock-free; the returned
    /// snapshot stays valid across later swaps.
    pub fn current_data(&self) -> Arc<Data> {
        self.inner.current.load_full()
    }

    /// Version of the container currently served.
    pub fn current_version(&self) -> String {
        self.inner.current.load().version().to_string()
    }

    /// Swap generation, bumped on every successful refresh.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.inner.config
    }

    /// Force a check against the remote URL.
    ///
    /// Only one refresh runs at a time; concurrent calls coalesce and
    /// return [`RefreshOutcome::Skipped`] without fetching.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        self.inner.refresh().await
    }

    /// Stop the background refresh task. Idempotent and safe from any
    /// thread; the served container stays available.
    pub fn shutdown(&self) {
        if self.inner.stopped.swap(true, Ordering::SeqCst) {
            debug!("data store already shut down");
            return;
        }
        let _ = self.inner.shutdown_tx.send(true);
        info!("data store shut down, background refresh stopped");
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }
}

impl Clone for DataStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl StoreInner {
    async fn refresh(&self) -> Result<RefreshOutcome> {
        if self.stopped.load(Ordering::SeqCst) {
            debug!("refresh skipped: store is shut down");
            return Ok(RefreshOutcome::Skipped);
        }
        let Ok(_guard) = self.refresh_lock.try_lock() else {
            debug!("refresh already in flight, coalescing");
            return Ok(RefreshOutcome::Skipped);
        };
        if self.stopped.load(Ordering::SeqCst) {
            return Ok(RefreshOutcome::Skipped);
        }

        let current_version = self.current.load().version().to_string();

        // 1. 先比对版本哨兵，版本一致就不拉取完整规则库
        if !self.config.version_url.is_empty() && !current_version.is_empty() {
            let bytes = self.fetcher.fetch(&self.config.version_url).await?;
            let remote = String::from_utf8_lossy(&bytes);
            let remote = remote.lines().next().unwrap_or("").trim();
            if remote == current_version {
                debug!("rule database {} is current, skipping download", remote);
                return Ok(RefreshOutcome::NotModified);
            }
        }

        // 2. 拉取完整规则库并装载
        let bytes = self.fetcher.fetch(&self.config.data_url).await?;
        let data = DataLoader::from_bytes(&bytes)?;
        if !current_version.is_empty() && data.version() == current_version {
            debug!(
                "fetched rule database has the current version {}, keeping container",
                current_version
            );
            return Ok(RefreshOutcome::NotModified);
        }

        // 3. 原子替换容器
        let version = data.version().to_string();
        self.current.store(Arc::new(data));
        self.generation.fetch_add(1, Ordering::Release);
        info!(
            "rule database {} installed (previous: {})",
            version,
            if current_version.is_empty() {
                "none"
            } else {
                current_version.as_str()
            }
        );

        // 4. 尽力持久化到本地缓存，失败只记录不影响检测
        if let Err(e) = self.cache.write(&bytes, &version) {
            warn!("persisting rule file cache failed: {}", e);
        }

        Ok(RefreshOutcome::Updated { version })
    }
}

/// Local cache first, bundled fallback second, empty container last.
fn initial_data(cache: &CacheFiles) -> Data {
    match cache
        .read_data()
        .and_then(|bytes| DataLoader::from_bytes(&bytes))
    {
        Ok(data) => {
            info!("rule database {} loaded from local cache", data.version());
            return data;
        }
        Err(e) => {
            debug!("local rule file cache unusable: {}", e);
        }
    }

    if let Some(data) = bundled_data() {
        info!("rule database {} loaded from bundled fallback", data.version());
        return data;
    }

    warn!("no local cache and no bundled fallback, starting with an empty rule database");
    Data::empty()
}

#[cfg(feature = "embedded-data")]
fn bundled_data() -> Option<Data> {
    let bytes = fallback::bundled_rule_file()?;
    match DataLoader::from_bytes(&bytes) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!("bundled rule file unusable: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "embedded-data"))]
fn bundled_data() -> Option<Data> {
    None
}

fn spawn_background_refresh(inner: &Arc<StoreInner>) {
    let interval = inner.config.refresh_interval();
    if interval.is_zero() {
        debug!("background refresh disabled by configuration");
        return;
    }
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        warn!("no tokio runtime available, background refresh disabled");
        return;
    };

    let inner = Arc::clone(inner);
    handle.spawn(async move {
        let mut shutdown_rx = inner.shutdown_tx.subscribe();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        // the first tick fires immediately and doubles as the cold-start
        // fetch promised by the constructor
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => break,
                _ = ticker.tick() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                    match inner.refresh().await {
                        Ok(RefreshOutcome::Updated { version }) => {
                            info!("background refresh installed rule database {}", version);
                        }
                        Ok(RefreshOutcome::NotModified) => {
                            debug!("background refresh: rule database unchanged");
                        }
                        Ok(RefreshOutcome::Skipped) => {}
                        Err(e) => {
                            warn!("background refresh failed: {}", e);
                        }
                    }
                }
            }
        }
        debug!("background refresh task stopped");
    });
}
