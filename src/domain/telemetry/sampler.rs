//! Stride-based telemetry down-sampling

use serde::{Deserialize, Serialize};

use super::car_data::{CarData, CarDataSample};

/// A sampled telemetry point as sent to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPoint {
    pub distance: Option<f64>,
    pub speed: Option<f64>,
    pub throttle: Option<f64>,
    pub brake: Option<f64>,
    pub rpm: Option<f64>,
    pub gear: Option<i64>,
    pub drs: Option<i64>,
    /// Row index within the raw series
    pub timestamp: Option<u64>,
    pub driver_code: String,
}

impl TelemetryPoint {
    fn from_sample(index: usize, sample: &CarDataSample, driver_code: &str) -> Self {
        Self {
            distance: finite(sample.distance),
            speed: finite(sample.speed),
            throttle: finite(sample.throttle),
            brake: finite(sample.brake),
            rpm: finite(sample.rpm),
            gear: finite(sample.gear).map(|v| v as i64),
            drs: finite(sample.drs).map(|v| v as i64),
            timestamp: Some(index as u64),
            driver_code: driver_code.to_string(),
        }
    }
}

/// Result of sampling one series
#[derive(Debug, Clone, PartialEq)]
pub struct SampledTelemetry {
    pub points: Vec<TelemetryPoint>,
    pub total_points: usize,
    pub stride: usize,
}

/// Deterministic decimation of a car data series to roughly `target` points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetrySampler {
    target: usize,
}

impl Default for TelemetrySampler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TARGET)
    }
}

impl TelemetrySampler {
    pub const DEFAULT_TARGET: usize = 50;

    /// Create a sampler; a zero target is treated as one
    pub fn new(target: usize) -> Self {
        Self {
            target: target.max(1),
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// `max(1, n / target)`
    pub fn stride(&self, n: usize) -> usize {
        (n / self.target).max(1)
    }

    /// Emit rows `0, stride, 2 * stride, ...`; yields `ceil(n / stride)` points
    pub fn sample(&self, driver_code: &str, data: &CarData) -> SampledTelemetry {
        let total_points = data.len();
        let stride = self.stride(total_points);

        let points = data
            .samples()
            .iter()
            .enumerate()
            .step_by(stride)
            .map(|(index, sample)| TelemetryPoint::from_sample(index, sample, driver_code))
            .collect();

        SampledTelemetry {
            points,
            total_points,
            stride,
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> CarData {
        CarData::new(
            (0..n)
                .map(|i| CarDataSample {
                    distance: Some(i as f64 * 5.0),
                    speed: Some(200.0 + i as f64),
                    throttle: Some(100.0),
                    brake: Some(0.0),
                    rpm: Some(11_000.0),
                    gear: Some(7.0),
                    drs: Some(12.0),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn test_stride_for_thousand_rows() {
        let sampler = TelemetrySampler::default();
        let sampled = sampler.sample("NOR", &series(1000));

        assert_eq!(sampled.stride, 20);
        assert_eq!(sampled.points.len(), 50);
        assert_eq!(sampled.total_points, 1000);
        assert_eq!(sampled.points[1].timestamp, Some(20));
    }

    #[test]
    fn test_output_length_is_ceil_of_n_over_stride() {
        let sampler = TelemetrySampler::default();

        for n in [0usize, 1, 7, 49, 50, 51, 99, 100, 101, 149, 1234, 5003] {
            let sampled = sampler.sample("NOR", &series(n));
            let stride = (n / 50).max(1);

            assert_eq!(sampled.stride, stride, "n = {}", n);
            assert_eq!(sampled.points.len(), n.div_ceil(stride), "n = {}", n);
        }
    }

    #[test]
    fn test_short_series_is_returned_whole() {
        let sampled = TelemetrySampler::default().sample("NOR", &series(30));

        assert_eq!(sampled.stride, 1);
        assert_eq!(sampled.points.len(), 30);
    }

    #[test]
    fn test_missing_speed_maps_to_null() {
        let mut rows = series(3).samples().to_vec();
        rows[1].speed = None;
        rows[2].rpm = Some(f64::NAN);

        let sampled = TelemetrySampler::default().sample("LEC", &CarData::new(rows));
        let point = &sampled.points[1];

        assert_eq!(point.speed, None);
        assert_eq!(point.distance, Some(5.0));
        assert_eq!(point.throttle, Some(100.0));
        assert_eq!(point.brake, Some(0.0));
        assert_eq!(point.rpm, Some(11_000.0));
        assert_eq!(point.gear, Some(7));
        assert_eq!(point.drs, Some(12));
        assert_eq!(point.timestamp, Some(1));
        assert_eq!(point.driver_code, "LEC");

        assert_eq!(sampled.points[2].rpm, None);
    }

    #[test]
    fn test_null_serializes_explicitly() {
        let sampled = TelemetrySampler::default().sample(
            "NOR",
            &CarData::new(vec![CarDataSample::default()]),
        );
        let json = serde_json::to_value(&sampled.points[0]).unwrap();

        assert!(json["speed"].is_null());
        assert!(json["gear"].is_null());
        assert_eq!(json["timestamp"], 0);
    }

    #[test]
    fn test_custom_target() {
        let sampler = TelemetrySampler::new(100);
        let sampled = sampler.sample("NOR", &series(1000));

        assert_eq!(sampler.target(), 100);
        assert_eq!(sampled.stride, 10);
        assert_eq!(sampled.points.len(), 100);
        assert_eq!(TelemetrySampler::new(0).target(), 1);
    }
}
