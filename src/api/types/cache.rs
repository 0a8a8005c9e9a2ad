//! Cache administration response bodies

use serde::{Deserialize, Serialize};

use super::session::TimingResponse;
use crate::domain::CacheEntrySummary;
use crate::infrastructure::cache::DiskCacheStats;
use crate::infrastructure::services::CacheOverview;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiskCacheStatusResponse {
    pub cache_dir: String,
    pub exists: bool,
    pub file_count: u64,
    pub size_bytes: u64,
    pub size_mb: f64,
}

impl From<DiskCacheStats> for DiskCacheStatusResponse {
    fn from(stats: DiskCacheStats) -> Self {
        Self {
            size_mb: stats.size_mb(),
            cache_dir: stats.cache_dir.display().to_string(),
            exists: stats.exists,
            file_count: stats.file_count,
            size_bytes: stats.size_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSessionResponse {
    pub cache_key: String,
    pub year: i32,
    pub event: String,
    pub session_type: String,
    pub telemetry: bool,
    pub event_name: String,
    pub total_laps: usize,
    pub total_drivers: usize,
    pub cached_at: String,
    pub timing: TimingResponse,
}

impl From<CacheEntrySummary> for CachedSessionResponse {
    fn from(entry: CacheEntrySummary) -> Self {
        Self {
            cache_key: entry.key.to_string(),
            timing: TimingResponse::new(entry.timing, true),
            cached_at: entry.cached_at.to_rfc3339(),
            year: entry.key.year,
            event: entry.key.event,
            session_type: entry.key.session_type,
            telemetry: entry.key.telemetry,
            event_name: entry.event_name,
            total_laps: entry.total_laps,
            total_drivers: entry.total_drivers,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSessionsResponse {
    pub success: bool,
    pub cached_sessions: usize,
    pub max_cache_size: usize,
    pub sessions: Vec<CachedSessionResponse>,
}

impl From<CacheOverview> for CachedSessionsResponse {
    fn from(overview: CacheOverview) -> Self {
        Self {
            success: true,
            cached_sessions: overview.cached_sessions,
            max_cache_size: overview.max_cache_size,
            sessions: overview
                .sessions
                .into_iter()
                .map(CachedSessionResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClearCacheResponse {
    pub success: bool,
    pub message: String,
    pub cleared: usize,
}

impl ClearCacheResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            success: true,
            message: format!("Cleared {} cached sessions", cleared),
            cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_disk_status_from_stats() {
        let response = DiskCacheStatusResponse::from(DiskCacheStats {
            cache_dir: PathBuf::from("cache"),
            exists: true,
            file_count: 4,
            size_bytes: 3 * 1024 * 1024,
        });

        assert_eq!(response.cache_dir, "cache");
        assert_eq!(response.size_mb, 3.0);
    }

    #[test]
    fn test_clear_message() {
        let response = ClearCacheResponse::new(3);
        assert_eq!(response.message, "Cleared 3 cached sessions");
        assert_eq!(response.cleared, 3);
    }
}
