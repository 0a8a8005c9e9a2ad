//! OpenF1 wire types

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::telemetry::CarDataSample;
use crate::domain::{Driver, Lap};

#[derive(Debug, Clone, Deserialize)]
pub struct MeetingRecord {
    pub meeting_key: i64,
    #[serde(default)]
    pub meeting_name: Option<String>,
    #[serde(default)]
    pub meeting_official_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub circuit_short_name: Option<String>,
    #[serde(default)]
    pub date_start: Option<DateTime<Utc>>,
}

impl MeetingRecord {
    pub fn name(&self) -> &str {
        self.meeting_name.as_deref().unwrap_or_default()
    }

    pub fn is_testing(&self) -> bool {
        self.name().to_lowercase().contains("testing")
    }

    /// Case-insensitive match against any of the meeting's names
    pub fn matches(&self, event: &str) -> bool {
        let needle = event.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }

        self.names()
            .any(|name| name == needle || name.contains(&needle))
    }

    /// Exact case-insensitive match against any of the meeting's names
    pub fn matches_exactly(&self, event: &str) -> bool {
        let needle = event.trim().to_lowercase();
        self.names().any(|name| name == needle)
    }

    fn names(&self) -> impl Iterator<Item = String> + '_ {
        [
            &self.meeting_name,
            &self.meeting_official_name,
            &self.location,
            &self.country_name,
            &self.circuit_short_name,
        ]
        .into_iter()
        .flatten()
        .map(|name| name.to_lowercase())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    pub session_key: i64,
    pub session_name: String,
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default)]
    pub date_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub circuit_short_name: Option<String>,
}

impl SessionRecord {
    /// Whether this session answers to `identifier`, either an abbreviation
    /// such as `FP1` or `Q` or a full session name
    pub fn matches(&self, identifier: &str) -> bool {
        let name = self.session_name.to_lowercase();
        let identifier = identifier.trim().to_lowercase();

        let aliases: &[&str] = match identifier.as_str() {
            "fp1" => &["practice 1"],
            "fp2" => &["practice 2"],
            "fp3" => &["practice 3"],
            "q" => &["qualifying"],
            "sq" => &["sprint qualifying", "sprint shootout"],
            "ss" => &["sprint shootout", "sprint qualifying"],
            "s" => &["sprint"],
            "r" => &["race"],
            _ => &[],
        };

        if aliases.is_empty() {
            name == identifier
        } else {
            aliases.contains(&name.as_str())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverRecord {
    pub driver_number: u32,
    #[serde(default)]
    pub name_acronym: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub broadcast_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_colour: Option<String>,
}

impl DriverRecord {
    /// Acronym, or the car number when the feed has none
    pub fn code(&self) -> String {
        self.name_acronym
            .clone()
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| self.driver_number.to_string())
    }

    pub fn into_driver(self) -> Driver {
        let mut driver = Driver::new(
            self.code(),
            self.driver_number,
            self.team_name.unwrap_or_default(),
        );

        if let Some(full_name) = self.full_name {
            driver = driver.with_full_name(full_name);
        }
        if let Some(broadcast_name) = self.broadcast_name {
            driver = driver.with_broadcast_name(broadcast_name);
        }
        if let Some(colour) = self.team_colour {
            driver = driver.with_team_colour(colour);
        }

        driver
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LapRecord {
    pub driver_number: u32,
    pub lap_number: u32,
    #[serde(default)]
    pub lap_duration: Option<f64>,
    #[serde(default)]
    pub duration_sector_1: Option<f64>,
    #[serde(default)]
    pub duration_sector_2: Option<f64>,
    #[serde(default)]
    pub duration_sector_3: Option<f64>,
    #[serde(default)]
    pub date_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_pit_out_lap: Option<bool>,
}

impl LapRecord {
    pub fn into_lap(self, driver_code: impl Into<String>) -> Lap {
        let mut lap = Lap::new(driver_code, self.driver_number, self.lap_number)
            .with_sector_times([
                seconds(self.duration_sector_1),
                seconds(self.duration_sector_2),
                seconds(self.duration_sector_3),
            ])
            .with_pit_out(self.is_pit_out_lap.unwrap_or(false));

        if let Some(lap_time) = seconds(self.lap_duration) {
            lap = lap.with_lap_time(lap_time);
        }
        if let Some(date_start) = self.date_start {
            lap = lap.with_date_start(date_start);
        }

        lap
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarDataRecord {
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub throttle: Option<f64>,
    #[serde(default)]
    pub brake: Option<f64>,
    #[serde(default)]
    pub rpm: Option<f64>,
    #[serde(default)]
    pub n_gear: Option<f64>,
    #[serde(default)]
    pub drs: Option<f64>,
}

impl From<CarDataRecord> for CarDataSample {
    fn from(record: CarDataRecord) -> Self {
        Self {
            date: record.date,
            distance: None,
            speed: record.speed,
            throttle: record.throttle,
            brake: record.brake,
            rpm: record.rpm,
            gear: record.n_gear,
            drs: record.drs,
        }
    }
}

// Negative or non-finite durations are treated as missing.
/// Float seconds to a duration, rounded to whole microseconds
fn seconds(value: Option<f64>) -> Option<Duration> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| Duration::from_micros((v * 1_000_000.0).round() as u64))
}
