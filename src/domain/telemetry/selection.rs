//! Lap selection and the telemetry request outcome

use std::time::Duration;

use crate::domain::session::{Lap, Laps};
use crate::domain::DomainError;

use super::sampler::SampledTelemetry;

/// Which lap of a driver to take telemetry from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LapSelector {
    Fastest,
    /// Lap number as requested; zero or negative numbers never match
    Number(i64),
}

impl From<Option<i64>> for LapSelector {
    fn from(lap: Option<i64>) -> Self {
        lap.map_or(Self::Fastest, Self::Number)
    }
}

/// Lap picked by a selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LapSelection<'a> {
    Selected(&'a Lap),
    /// No lap with this number exists for the driver
    Missing(i64),
}

impl LapSelector {
    /// Resolve the selector against a lap table.
    ///
    /// A missing numbered lap is an expected outcome; a driver without any
    /// timed lap is a `NotFound` error.
    pub fn select<'a>(
        &self,
        laps: &'a Laps,
        driver_code: &str,
    ) -> Result<LapSelection<'a>, DomainError> {
        match *self {
            Self::Number(n) => Ok(u32::try_from(n)
                .ok()
                .and_then(|number| laps.pick_driver_lap(driver_code, number))
                .map_or(LapSelection::Missing(n), LapSelection::Selected)),
            Self::Fastest => laps
                .pick_driver_fastest(driver_code)
                .map(LapSelection::Selected)
                .ok_or_else(|| {
                    DomainError::not_found(format!("No laps found for driver {}", driver_code))
                }),
        }
    }
}

/// Sampled telemetry of one lap
#[derive(Debug, Clone, PartialEq)]
pub struct LapTelemetry {
    pub driver_code: String,
    pub lap_number: u32,
    pub lap_time: Option<Duration>,
    pub sampled: SampledTelemetry,
}

/// Result of a telemetry request
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryOutcome {
    Found(LapTelemetry),
    LapNotFound { driver_code: String, lap_number: i64 },
}

impl TelemetryOutcome {
    pub fn lap_not_found(driver_code: impl Into<String>, lap_number: i64) -> Self {
        Self::LapNotFound {
            driver_code: driver_code.into(),
            lap_number,
        }
    }

    /// Human readable description of a missing lap
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Found(_) => None,
            Self::LapNotFound {
                driver_code,
                lap_number,
            } => Some(format!(
                "No lap {} found for driver {}",
                lap_number, driver_code
            )),
        }
    }
}
