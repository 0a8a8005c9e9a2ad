//! Session cache key

use std::fmt;

use serde::{Deserialize, Serialize};

/// Composite identifier of a loaded session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub year: i32,
    pub event: String,
    pub session_type: String,
    /// Whether the session was loaded with telemetry
    pub telemetry: bool,
}

impl SessionKey {
    pub fn new(
        year: i32,
        event: impl Into<String>,
        session_type: impl Into<String>,
        telemetry: bool,
    ) -> Self {
        Self {
            year,
            event: event.into(),
            session_type: session_type.into(),
            telemetry,
        }
    }

    /// Key of a session loaded with telemetry
    pub fn with_telemetry(year: i32, event: impl Into<String>, session_type: impl Into<String>) -> Self {
        Self::new(year, event, session_type, true)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.year, self.event, self.session_type, self.telemetry
        )
    }
}
