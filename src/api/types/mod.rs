//! Request and response types of the HTTP API

pub mod cache;
pub mod error;
pub mod extract;
pub mod session;
pub mod telemetry;

pub use cache::{
    CachedSessionResponse, CachedSessionsResponse, ClearCacheResponse, DiskCacheStatusResponse,
};
pub use error::{ApiError, ApiErrorResponse};
pub use extract::{Path, Query};
pub use session::{
    DriverLapInfoResponse, DriverLapResponse, DriverResponse, DriversResponse, FastestLapResponse,
    PreloadResponse, SessionInfoResponse, SessionQuery, SessionResponse, SessionSummaryResponse,
    TimingResponse,
};
pub use telemetry::{
    LapTelemetryResponse, OptimizationResponse, TelemetryQuery, TelemetryResponse,
};
