//! Telemetry response bodies

use serde::{Deserialize, Serialize};

use super::session::{seconds, TimingResponse};
use crate::domain::{LapTelemetry, TelemetryPoint};

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryQuery {
    pub lap: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LapTelemetryResponse {
    pub driver_code: String,
    pub lap_number: u32,
    pub lap_time: Option<String>,
    pub lap_time_seconds: Option<f64>,
    pub data_points: Vec<TelemetryPoint>,
}

/// How the raw series was reduced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizationResponse {
    pub sampled_points: usize,
    pub total_points: usize,
    pub sample_stride: usize,
    pub sample_target: usize,
    pub cached_session: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryResponse {
    pub success: bool,
    pub telemetry: LapTelemetryResponse,
    pub timing: TimingResponse,
    pub optimization: OptimizationResponse,
}

impl TelemetryResponse {
    pub fn new(
        telemetry: LapTelemetry,
        timing: TimingResponse,
        sample_target: usize,
    ) -> Self {
        let optimization = OptimizationResponse {
            sampled_points: telemetry.sampled.points.len(),
            total_points: telemetry.sampled.total_points,
            sample_stride: telemetry.sampled.stride,
            sample_target,
            cached_session: timing.from_cache,
        };

        Self {
            success: true,
            telemetry: LapTelemetryResponse {
                driver_code: telemetry.driver_code,
                lap_number: telemetry.lap_number,
                lap_time: telemetry.lap_time.map(crate::domain::session::format_timedelta),
                lap_time_seconds: telemetry.lap_time.map(seconds),
                data_points: telemetry.sampled.points,
            },
            timing,
            optimization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::telemetry::{CarData, CarDataSample, TelemetrySampler};
    use crate::domain::LoadTiming;

    #[test]
    fn test_telemetry_response_shape() {
        let data = CarData::new(vec![
            CarDataSample {
                speed: Some(280.0),
                gear: Some(7.9),
                ..Default::default()
            };
            120
        ]);
        let sampler = TelemetrySampler::default();
        let telemetry = LapTelemetry {
            driver_code: "NOR".to_string(),
            lap_number: 2,
            lap_time: Some(Duration::from_millis(70_270)),
            sampled: sampler.sample("NOR", &data),
        };

        let response = TelemetryResponse::new(
            telemetry,
            TimingResponse::new(LoadTiming::default(), true),
            sampler.target(),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["telemetry"]["lap_time"], "0 days 00:01:10.270000");
        assert_eq!(json["telemetry"]["lap_time_seconds"], 70.27);
        assert_eq!(json["optimization"]["sampled_points"], 60);
        assert_eq!(json["optimization"]["total_points"], 120);
        assert_eq!(json["optimization"]["sample_stride"], 2);
        assert_eq!(json["optimization"]["sample_target"], 50);
        assert_eq!(json["optimization"]["cached_session"], true);

        let point = &json["telemetry"]["data_points"][1];
        assert_eq!(point["timestamp"], 2);
        assert_eq!(point["gear"], 7);
        assert!(point["rpm"].is_null());
        assert_eq!(point["driver_code"], "NOR");
    }
}
