//! F1 Telemetry API
//!
//! Serves Formula 1 session data over HTTP:
//! - session summaries, driver rosters and fastest laps
//! - per-lap car telemetry, down-sampled for transport
//! - a bounded in-memory cache of loaded sessions
//!
//! Session data comes from a pluggable `SessionProvider`; the bundled one
//! reads the OpenF1 REST API.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::AppState;
use domain::{SessionProvider, TelemetrySampler};
use infrastructure::cache::{DiskCache, SessionCache};
use infrastructure::openf1::{OpenF1Client, OpenF1Provider};
use infrastructure::services::SessionService;

/// Create application state: OpenF1 provider, session cache and sampler
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let mut disk_cache = DiskCache::new(&config.cache.dir);
    if config.cache.disk_ttl_secs > 0 {
        disk_cache = disk_cache.with_ttl(Duration::from_secs(config.cache.disk_ttl_secs));
    }

    let mut client = OpenF1Client::new(
        &config.openf1.base_url,
        Duration::from_secs(config.openf1.timeout_secs),
    )?;
    if config.openf1.disk_cache {
        client = client.with_disk_cache(disk_cache.clone());
    }

    let provider: Arc<dyn SessionProvider> = Arc::new(OpenF1Provider::new(client));

    info!(
        provider = provider.name(),
        base_url = %config.openf1.base_url,
        cache_dir = %disk_cache.dir().display(),
        disk_cache = config.openf1.disk_cache,
        "Session provider configured"
    );

    let service = SessionService::new(
        provider,
        SessionCache::new(config.cache.max_sessions),
        TelemetrySampler::new(config.telemetry.sample_target),
        disk_cache,
    );

    Ok(AppState::new(Arc::new(service)))
}
