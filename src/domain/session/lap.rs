//! Lap entities and lap selection

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timed circuit traversal by a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lap {
    driver_code: String,
    driver_number: u32,
    lap_number: u32,
    lap_time: Option<Duration>,
    sector_times: [Option<Duration>; 3],
    date_start: Option<DateTime<Utc>>,
    pit_out: bool,
}

impl Lap {
    pub fn new(driver_code: impl Into<String>, driver_number: u32, lap_number: u32) -> Self {
        Self {
            driver_code: driver_code.into().to_uppercase(),
            driver_number,
            lap_number,
            lap_time: None,
            sector_times: [None; 3],
            date_start: None,
            pit_out: false,
        }
    }

    pub fn with_lap_time(mut self, lap_time: Duration) -> Self {
        self.lap_time = Some(lap_time);
        self
    }

    pub fn with_sector_times(mut self, sector_times: [Option<Duration>; 3]) -> Self {
        self.sector_times = sector_times;
        self
    }

    pub fn with_date_start(mut self, date_start: DateTime<Utc>) -> Self {
        self.date_start = Some(date_start);
        self
    }

    pub fn with_pit_out(mut self, pit_out: bool) -> Self {
        self.pit_out = pit_out;
        self
    }

    pub fn driver_code(&self) -> &str {
        &self.driver_code
    }

    pub fn driver_number(&self) -> u32 {
        self.driver_number
    }

    pub fn lap_number(&self) -> u32 {
        self.lap_number
    }

    pub fn lap_time(&self) -> Option<Duration> {
        self.lap_time
    }

    pub fn lap_time_seconds(&self) -> Option<f64> {
        self.lap_time.map(|t| t.as_secs_f64())
    }

    /// Sector time for sector `n` (1-based); `None` outside 1..=3
    pub fn sector_time(&self, n: usize) -> Option<Duration> {
        match n {
            1..=3 => self.sector_times[n - 1],
            _ => None,
        }
    }

    /// Sum of the three sector times, when all of them are known
    pub fn sector_total(&self) -> Option<Duration> {
        self.sector_times
            .iter()
            .try_fold(Duration::ZERO, |total, sector| sector.map(|t| total + t))
    }

    pub fn date_start(&self) -> Option<DateTime<Utc>> {
        self.date_start
    }

    pub fn is_pit_out(&self) -> bool {
        self.pit_out
    }

    pub fn lap_time_string(&self) -> Option<String> {
        self.lap_time.map(format_timedelta)
    }

    pub fn sector_time_string(&self, n: usize) -> Option<String> {
        self.sector_time(n).map(format_timedelta)
    }
}

/// Lap table of a loaded session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Laps(Vec<Lap>);

impl Laps {
    pub fn new(laps: Vec<Lap>) -> Self {
        Self(laps)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Laps driven by `driver_code` (case-insensitive), in table order
    pub fn for_driver<'a>(&'a self, driver_code: &str) -> impl Iterator<Item = &'a Lap> + use<'a> {
        let code = driver_code.to_uppercase();

        self.0.iter().filter(move |lap| lap.driver_code == code)
    }

    /// Fastest timed lap of the whole session
    pub fn pick_fastest(&self) -> Option<&Lap> {
        fastest(self.0.iter())
    }

    /// Fastest timed lap of one driver
    pub fn pick_driver_fastest(&self, driver_code: &str) -> Option<&Lap> {
        fastest(self.for_driver(driver_code))
    }

    /// First lap of `driver_code` with the given number
    pub fn pick_driver_lap(&self, driver_code: &str, lap_number: u32) -> Option<&Lap> {
        self.for_driver(driver_code)
            .find(|lap| lap.lap_number == lap_number)
    }

    /// The lap the same driver started after `lap`
    pub fn next_lap(&self, lap: &Lap) -> Option<&Lap> {
        self.pick_driver_lap(&lap.driver_code, lap.lap_number.checked_add(1)?)
    }
}

impl FromIterator<Lap> for Laps {
    fn from_iter<I: IntoIterator<Item = Lap>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Ties resolve to the earliest lap in table order.
fn fastest<'a>(laps: impl Iterator<Item = &'a Lap>) -> Option<&'a Lap> {
    laps.filter_map(|lap| lap.lap_time.map(|t| (t, lap)))
        .min_by_key(|(t, _)| *t)
        .map(|(_, lap)| lap)
}

/// Render a duration as `"<d> days HH:MM:SS[.ffffff]"`
pub fn format_timedelta(duration: Duration) -> String {
    const MICROS_PER_DAY: u128 = 86_400_000_000;

    let total = duration.as_micros();
    let days = total / MICROS_PER_DAY;
    let rem = total % MICROS_PER_DAY;
    let hours = rem / 3_600_000_000;
    let minutes = (rem / 60_000_000) % 60;
    let seconds = (rem / 1_000_000) % 60;
    let micros = rem % 1_000_000;

    if micros == 0 {
        format!("{} days {:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else {
        format!(
            "{} days {:02}:{:02}:{:02}.{:06}",
            days, hours, minutes, seconds, micros
        )
    }
}
