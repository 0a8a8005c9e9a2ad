//! Cached session entries

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::SessionKey;
use crate::domain::session::LoadedSession;

/// Timing of the collaborator calls that produced a cached session
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadTiming {
    /// Time spent resolving the session identifiers
    pub creation: Duration,
    /// Time spent loading laps and telemetry
    pub load: Duration,
}

impl LoadTiming {
    pub fn total(&self) -> Duration {
        self.creation + self.load
    }
}

/// A loaded session retained by the session cache; immutable once built
#[derive(Debug, Clone)]
pub struct CachedSession {
    key: SessionKey,
    session: Arc<dyn LoadedSession>,
    timing: LoadTiming,
    cached_at: DateTime<Utc>,
}

impl CachedSession {
    pub fn new(key: SessionKey, session: Arc<dyn LoadedSession>, timing: LoadTiming) -> Self {
        Self {
            key,
            session,
            timing,
            cached_at: Utc::now(),
        }
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn session(&self) -> &dyn LoadedSession {
        self.session.as_ref()
    }

    pub fn timing(&self) -> LoadTiming {
        self.timing
    }

    pub fn cached_at(&self) -> DateTime<Utc> {
        self.cached_at
    }

    pub fn summary(&self) -> CacheEntrySummary {
        let info = self.session.info();

        CacheEntrySummary {
            key: self.key.clone(),
            event_name: info.event_name.clone(),
            total_laps: self.session.laps().len(),
            total_drivers: self.session.drivers().len(),
            timing: self.timing,
            cached_at: self.cached_at,
        }
    }
}

/// Per-entry description reported by the cache administration endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntrySummary {
    pub key: SessionKey,
    pub event_name: String,
    pub total_laps: usize,
    pub total_drivers: usize,
    pub timing: LoadTiming,
    pub cached_at: DateTime<Utc>,
}

/// Result of a cache lookup
#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub entry: Arc<CachedSession>,
    /// Whether the entry was already present before the lookup
    pub hit: bool,
}
