//! Session data source traits

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{Driver, Lap, Laps, SessionInfo};
use crate::domain::telemetry::CarData;
use crate::domain::DomainError;

/// A session resolved from (year, event, session type) but not yet loaded
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDescriptor {
    /// Data source specific session identifier
    pub id: String,
    pub info: SessionInfo,
}

/// What to load for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub telemetry: bool,
}

impl LoadOptions {
    pub fn with_telemetry(telemetry: bool) -> Self {
        Self { telemetry }
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::with_telemetry(true)
    }
}

/// External motorsport data source
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Short name used in logs, metrics and errors
    fn name(&self) -> &'static str;

    /// Resolve a session by year, event and session type
    async fn get_session(
        &self,
        year: i32,
        event: &str,
        session_type: &str,
    ) -> Result<SessionDescriptor, DomainError>;

    /// Load laps (and optionally telemetry) of a resolved session
    async fn load_session(
        &self,
        descriptor: SessionDescriptor,
        options: LoadOptions,
    ) -> Result<Arc<dyn LoadedSession>, DomainError>;
}

/// A loaded session; read-only once built
#[async_trait]
pub trait LoadedSession: Send + Sync + Debug {
    fn info(&self) -> &SessionInfo;

    /// Driver registry in data source order
    fn drivers(&self) -> &[Driver];

    fn laps(&self) -> &Laps;

    fn telemetry_loaded(&self) -> bool;

    /// Car data series for one lap
    async fn car_data(&self, lap: &Lap) -> Result<CarData, DomainError>;

    fn driver(&self, code: &str) -> Option<&Driver> {
        self.drivers()
            .iter()
            .find(|d| d.abbreviation().eq_ignore_ascii_case(code))
    }

    fn driver_codes(&self) -> Vec<String> {
        self.drivers()
            .iter()
            .map(|d| d.abbreviation().to_string())
            .collect()
    }
}
