//! Infrastructure services

mod session_service;

pub use session_service::{CacheOverview, DriverLapReport, SessionService, TelemetryReport};
