//! Session and driver entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive information about a resolved session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub year: i32,
    /// Event name, e.g. "Monaco Grand Prix"
    pub event_name: String,
    /// Session type as requested, e.g. "Q"
    pub session_type: String,
    /// Session name as known by the data source, e.g. "Qualifying"
    pub session_name: String,
    pub track_name: String,
    pub country: Option<String>,
    pub date_start: Option<DateTime<Utc>>,
}

/// Entry of a session's driver registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    abbreviation: String,
    number: u32,
    team_name: String,
    full_name: Option<String>,
    broadcast_name: Option<String>,
    team_colour: Option<String>,
}

impl Driver {
    /// Create a driver; the abbreviation is normalized to upper case
    pub fn new(abbreviation: impl Into<String>, number: u32, team_name: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into().to_uppercase(),
            number,
            team_name: team_name.into(),
            full_name: None,
            broadcast_name: None,
            team_colour: None,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_broadcast_name(mut self, broadcast_name: impl Into<String>) -> Self {
        self.broadcast_name = Some(broadcast_name.into());
        self
    }

    pub fn with_team_colour(mut self, colour: impl Into<String>) -> Self {
        self.team_colour = Some(colour.into());
        self
    }

    /// Three-letter driver code, e.g. "NOR"
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn broadcast_name(&self) -> Option<&str> {
        self.broadcast_name.as_deref()
    }

    pub fn team_colour(&self) -> Option<&str> {
        self.team_colour.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_abbreviation_is_uppercased() {
        let driver = Driver::new("nor", 4, "McLaren");
        assert_eq!(driver.abbreviation(), "NOR");
        assert_eq!(driver.number(), 4);
        assert_eq!(driver.team_name(), "McLaren");
    }

    #[test]
    fn test_driver_optional_fields() {
        let driver = Driver::new("LEC", 16, "Ferrari");
        assert!(driver.full_name().is_none());

        let driver = driver
            .with_full_name("Charles LECLERC")
            .with_team_colour("E80020");
        assert_eq!(driver.full_name(), Some("Charles LECLERC"));
        assert_eq!(driver.team_colour(), Some("E80020"));
        assert!(driver.broadcast_name().is_none());
    }
}
