//! Domain layer - entities, traits and errors independent of transport

pub mod cache;
pub mod error;
pub mod session;
pub mod telemetry;

pub use cache::{CacheEntrySummary, CacheLookup, CachedSession, LoadTiming, SessionKey};
pub use error::DomainError;
pub use session::{
    Driver, Lap, Laps, LoadOptions, LoadedSession, SessionDescriptor, SessionInfo,
    SessionProvider,
};
pub use telemetry::{
    CarData, CarDataSample, LapSelection, LapSelector, LapTelemetry, SampledTelemetry,
    TelemetryOutcome, TelemetryPoint, TelemetrySampler,
};
