//! Session, driver and lap response bodies

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CacheLookup, Driver, Lap, LoadTiming, LoadedSession};

/// Load timing in seconds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingResponse {
    pub session_creation_time: f64,
    pub session_load_time: f64,
    pub total_time: f64,
    pub from_cache: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telemetry_processing_time: Option<f64>,
}

impl TimingResponse {
    pub fn new(timing: LoadTiming, from_cache: bool) -> Self {
        Self {
            session_creation_time: seconds(timing.creation),
            session_load_time: seconds(timing.load),
            total_time: seconds(timing.total()),
            from_cache,
            telemetry_processing_time: None,
        }
    }

    pub fn from_lookup(lookup: &CacheLookup) -> Self {
        Self::new(lookup.entry.timing(), lookup.hit)
    }

    /// Add telemetry processing time, which also counts towards the total
    pub fn with_processing(mut self, processing: Duration) -> Self {
        self.telemetry_processing_time = Some(seconds(processing));
        self.total_time = round3(self.total_time + processing.as_secs_f64());
        self
    }
}

/// Query accepted by the session, preload and drivers endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct SessionQuery {
    #[serde(default = "default_telemetry")]
    pub telemetry: bool,
}

impl Default for SessionQuery {
    fn default() -> Self {
        Self { telemetry: true }
    }
}

fn default_telemetry() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionInfoResponse {
    pub year: i32,
    pub grand_prix: String,
    pub session_type: String,
    pub track_name: String,
    pub country: Option<String>,
    pub date_start: Option<DateTime<Utc>>,
    pub total_laps: usize,
    pub total_drivers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverResponse {
    pub driver_code: String,
    pub driver_number: u32,
    pub team_name: String,
    pub full_name: Option<String>,
    pub broadcast_name: Option<String>,
    /// Hex RGB without `#`, e.g. "FF8000"
    pub team_colour: Option<String>,
}

impl From<&Driver> for DriverResponse {
    fn from(driver: &Driver) -> Self {
        Self {
            driver_code: driver.abbreviation().to_string(),
            driver_number: driver.number(),
            team_name: driver.team_name().to_string(),
            full_name: driver.full_name().map(str::to_string),
            broadcast_name: driver.broadcast_name().map(str::to_string),
            team_colour: driver.team_colour().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSummaryResponse {
    pub session_info: SessionInfoResponse,
    pub drivers: Vec<DriverResponse>,
}

impl From<&dyn LoadedSession> for SessionSummaryResponse {
    fn from(session: &dyn LoadedSession) -> Self {
        let info = session.info();

        Self {
            session_info: SessionInfoResponse {
                year: info.year,
                grand_prix: info.event_name.clone(),
                session_type: info.session_type.clone(),
                track_name: info.track_name.clone(),
                country: info.country.clone(),
                date_start: info.date_start,
                total_laps: session.laps().len(),
                total_drivers: session.drivers().len(),
            },
            drivers: session.drivers().iter().map(DriverResponse::from).collect(),
        }
    }
}

/// Overall fastest lap of a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FastestLapResponse {
    pub driver: String,
    pub lap_time: Option<String>,
    pub lap_number: u32,
    pub sector1_time: Option<String>,
    pub sector2_time: Option<String>,
    pub sector3_time: Option<String>,
}

impl From<&Lap> for FastestLapResponse {
    fn from(lap: &Lap) -> Self {
        Self {
            driver: lap.driver_code().to_string(),
            lap_time: lap.lap_time_string(),
            lap_number: lap.lap_number(),
            sector1_time: lap.sector_time_string(1),
            sector2_time: lap.sector_time_string(2),
            sector3_time: lap.sector_time_string(3),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub cache_key: String,
    pub cached: bool,
    pub session_summary: SessionSummaryResponse,
    pub fastest_lap: Option<FastestLapResponse>,
    pub timing: TimingResponse,
}

impl From<&CacheLookup> for SessionResponse {
    fn from(lookup: &CacheLookup) -> Self {
        let session = lookup.entry.session();

        Self {
            success: true,
            cache_key: lookup.entry.key().to_string(),
            cached: lookup.hit,
            session_summary: SessionSummaryResponse::from(session),
            fastest_lap: session.laps().pick_fastest().map(FastestLapResponse::from),
            timing: TimingResponse::from_lookup(lookup),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreloadResponse {
    pub success: bool,
    pub cache_key: String,
    pub already_cached: bool,
    pub timing: TimingResponse,
}

impl From<&CacheLookup> for PreloadResponse {
    fn from(lookup: &CacheLookup) -> Self {
        Self {
            success: true,
            cache_key: lookup.entry.key().to_string(),
            already_cached: lookup.hit,
            timing: TimingResponse::from_lookup(lookup),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriversResponse {
    pub success: bool,
    pub drivers: Vec<DriverResponse>,
}

/// Fastest lap of one driver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverLapResponse {
    pub driver_code: String,
    pub lap_time: Option<String>,
    pub lap_time_seconds: Option<f64>,
    pub lap_number: u32,
    pub sector1_time: Option<String>,
    pub sector2_time: Option<String>,
    pub sector3_time: Option<String>,
    pub is_pit_out_lap: bool,
}

impl From<&Lap> for DriverLapResponse {
    fn from(lap: &Lap) -> Self {
        Self {
            driver_code: lap.driver_code().to_string(),
            lap_time: lap.lap_time_string(),
            lap_time_seconds: lap.lap_time_seconds(),
            lap_number: lap.lap_number(),
            sector1_time: lap.sector_time_string(1),
            sector2_time: lap.sector_time_string(2),
            sector3_time: lap.sector_time_string(3),
            is_pit_out_lap: lap.is_pit_out(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverLapInfoResponse {
    pub success: bool,
    pub lap: DriverLapResponse,
    pub timing: TimingResponse,
}

pub(crate) fn seconds(duration: Duration) -> f64 {
    round3(duration.as_secs_f64())
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
