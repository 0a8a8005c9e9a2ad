//! In-process cache of loaded sessions

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::fifo::FifoCache;
use crate::domain::{
    CacheEntrySummary, CacheLookup, CachedSession, DomainError, LoadOptions, LoadTiming,
    SessionKey, SessionProvider,
};
use crate::infrastructure::observability::{
    record_cache_eviction, record_cache_lookup, record_session_load, set_cache_entries,
};

/// Session cache bounded to `capacity` entries with FIFO eviction.
///
/// The lock is never held while a session loads; concurrent misses on the
/// same key may both load, and the first insert wins.
#[derive(Debug)]
pub struct SessionCache {
    entries: RwLock<FifoCache<SessionKey, Arc<CachedSession>>>,
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl SessionCache {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(FifoCache::new(capacity)),
        }
    }

    pub async fn capacity(&self) -> usize {
        self.entries.read().await.capacity()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn get(&self, key: &SessionKey) -> Option<Arc<CachedSession>> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn contains(&self, key: &SessionKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Return the cached session for `key`, loading it through `provider`
    /// on a miss
    pub async fn get_or_load(
        &self,
        key: &SessionKey,
        provider: &dyn SessionProvider,
    ) -> Result<CacheLookup, DomainError> {
        if let Some(entry) = self.get(key).await {
            debug!(cache_key = %key, "Session cache hit");
            record_cache_lookup(true);
            return Ok(CacheLookup { entry, hit: true });
        }

        debug!(cache_key = %key, "Session cache miss");
        record_cache_lookup(false);

        let entry = load_session(key, provider).await?;
        Ok(self.insert(Arc::new(entry)).await)
    }

    async fn insert(&self, entry: Arc<CachedSession>) -> CacheLookup {
        let mut entries = self.entries.write().await;

        // Another request loaded the same key first
        if let Some(existing) = entries.get(entry.key()) {
            return CacheLookup {
                entry: Arc::clone(existing),
                hit: false,
            };
        }

        let evicted = entries.insert(entry.key().clone(), Arc::clone(&entry));

        for (key, _) in &evicted {
            info!(cache_key = %key, "Evicted oldest cached session");
            record_cache_eviction();
        }

        set_cache_entries(entries.len());

        info!(
            cache_key = %entry.key(),
            entries = entries.len(),
            capacity = entries.capacity(),
            "Cached session"
        );

        CacheLookup { entry, hit: false }
    }

    /// Summaries of all entries, oldest first
    pub async fn entries(&self) -> Vec<CacheEntrySummary> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(_, entry)| entry.summary())
            .collect()
    }

    /// Drop every entry, returning how many were cached
    pub async fn clear(&self) -> usize {
        let cleared = self.entries.write().await.clear();
        set_cache_entries(0);
        info!(cleared, "Cleared session cache");
        cleared
    }
}

async fn load_session(
    key: &SessionKey,
    provider: &dyn SessionProvider,
) -> Result<CachedSession, DomainError> {
    let started = Instant::now();
    info!(cache_key = %key, provider = provider.name(), "Loading session");

    let result = async {
        let descriptor = provider
            .get_session(key.year, &key.event, &key.session_type)
            .await?;
        let creation = started.elapsed();

        let load_started = Instant::now();
        let session = provider
            .load_session(descriptor, LoadOptions::with_telemetry(key.telemetry))
            .await?;
        let load = load_started.elapsed();

        Ok::<_, DomainError>(CachedSession::new(
            key.clone(),
            session,
            LoadTiming { creation, load },
        ))
    }
    .await;

    record_session_load(provider.name(), started.elapsed(), result.is_ok());

    if let Ok(ref entry) = result {
        let timing = entry.timing();
        info!(
            cache_key = %key,
            creation_ms = timing.creation.as_millis() as u64,
            load_ms = timing.load.as_millis() as u64,
            "Session loaded"
        );
    }

    result
}
