//! Session service - cached session loads, telemetry sampling and cache administration

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::domain::{
    CacheEntrySummary, CacheLookup, DomainError, Lap, LapSelection, LapSelector, LapTelemetry,
    LoadedSession, SessionKey, SessionProvider, TelemetryOutcome, TelemetrySampler,
};
use crate::infrastructure::cache::{DiskCache, DiskCacheStats, SessionCache};

/// Telemetry of one lap together with the cache lookup that served it
#[derive(Debug, Clone)]
pub struct TelemetryReport {
    pub lookup: CacheLookup,
    pub outcome: TelemetryOutcome,
    /// Time spent selecting the lap, reading car data and sampling
    pub processing: Duration,
}

/// Fastest lap of one driver
#[derive(Debug, Clone)]
pub struct DriverLapReport {
    pub lookup: CacheLookup,
    pub lap: Lap,
}

/// State of the in-memory session cache
#[derive(Debug, Clone)]
pub struct CacheOverview {
    pub cached_sessions: usize,
    pub max_cache_size: usize,
    pub sessions: Vec<CacheEntrySummary>,
}

/// Combines the session cache, the data source and the telemetry sampler
pub struct SessionService {
    cache: SessionCache,
    provider: Arc<dyn SessionProvider>,
    sampler: TelemetrySampler,
    disk_cache: DiskCache,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("cache", &self.cache)
            .field("provider", &self.provider.name())
            .field("sampler", &self.sampler)
            .field("disk_cache", &self.disk_cache)
            .finish()
    }
}

impl SessionService {
    pub fn new(
        provider: Arc<dyn SessionProvider>,
        cache: SessionCache,
        sampler: TelemetrySampler,
        disk_cache: DiskCache,
    ) -> Self {
        Self {
            cache,
            provider,
            sampler,
            disk_cache,
        }
    }

    pub fn sampler(&self) -> &TelemetrySampler {
        &self.sampler
    }

    /// Load a session, or return it from the cache
    pub async fn load(&self, key: &SessionKey) -> Result<CacheLookup, DomainError> {
        self.cache.get_or_load(key, self.provider.as_ref()).await
    }

    /// Sampled telemetry for a driver's fastest lap, or for lap `lap` when given
    pub async fn telemetry(
        &self,
        key: &SessionKey,
        driver_code: &str,
        lap: Option<i64>,
    ) -> Result<TelemetryReport, DomainError> {
        let driver_code = driver_code.to_uppercase();
        let lookup = self.load(key).await?;

        let started = Instant::now();
        let outcome = self
            .sample_lap(lookup.entry.session(), &driver_code, LapSelector::from(lap))
            .await?;

        Ok(TelemetryReport {
            lookup,
            outcome,
            processing: started.elapsed(),
        })
    }

    async fn sample_lap(
        &self,
        session: &dyn LoadedSession,
        driver_code: &str,
        selector: LapSelector,
    ) -> Result<TelemetryOutcome, DomainError> {
        let lap = match selector.select(session.laps(), driver_code)? {
            LapSelection::Selected(lap) => lap,
            LapSelection::Missing(lap_number) => {
                debug!(driver = %driver_code, lap = lap_number, "Requested lap not found");
                return Ok(TelemetryOutcome::lap_not_found(driver_code, lap_number));
            }
        };

        let data = session.car_data(lap).await?;
        let sampled = self.sampler.sample(driver_code, &data);

        debug!(
            driver = %driver_code,
            lap = lap.lap_number(),
            total_points = sampled.total_points,
            sampled_points = sampled.points.len(),
            stride = sampled.stride,
            "Sampled lap telemetry"
        );

        Ok(TelemetryOutcome::Found(LapTelemetry {
            driver_code: driver_code.to_string(),
            lap_number: lap.lap_number(),
            lap_time: lap.lap_time(),
            sampled,
        }))
    }

    /// Fastest timed lap of a driver in the session
    pub async fn driver_fastest_lap(
        &self,
        key: &SessionKey,
        driver_code: &str,
    ) -> Result<DriverLapReport, DomainError> {
        let lookup = self.load(key).await?;
        let session = lookup.entry.session();

        if session.driver(driver_code).is_none() {
            return Err(DomainError::not_found(format!(
                "Driver {} not found in session",
                driver_code.to_uppercase()
            )));
        }

        let lap = session
            .laps()
            .pick_driver_fastest(driver_code)
            .cloned()
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "No laps found for driver {}",
                    driver_code.to_uppercase()
                ))
            })?;

        Ok(DriverLapReport { lookup, lap })
    }

    pub async fn cache_overview(&self) -> CacheOverview {
        let sessions = self.cache.entries().await;

        CacheOverview {
            cached_sessions: sessions.len(),
            max_cache_size: self.cache.capacity().await,
            sessions,
        }
    }

    /// Empty the session cache, returning the number of dropped sessions
    pub async fn clear_cache(&self) -> usize {
        self.cache.clear().await
    }

    pub async fn disk_cache_status(&self) -> Result<DiskCacheStats, DomainError> {
        self.disk_cache.stats().await
    }
}
