//! Telemetry domain - car data series, lap selection and sampling

mod car_data;
mod sampler;
mod selection;

pub use car_data::{CarData, CarDataSample};
pub use sampler::{SampledTelemetry, TelemetryPoint, TelemetrySampler};
pub use selection::{LapSelection, LapSelector, LapTelemetry, TelemetryOutcome};
