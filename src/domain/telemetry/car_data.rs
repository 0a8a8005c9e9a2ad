//! Raw per-lap car data time series

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw row of car telemetry; every channel may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarDataSample {
    pub date: Option<DateTime<Utc>>,
    pub distance: Option<f64>,
    /// km/h
    pub speed: Option<f64>,
    /// 0-100 %
    pub throttle: Option<f64>,
    pub brake: Option<f64>,
    pub rpm: Option<f64>,
    pub gear: Option<f64>,
    pub drs: Option<f64>,
}

/// Car data series of a single lap, ordered by sample time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarData {
    samples: Vec<CarDataSample>,
}

impl CarData {
    pub fn new(samples: Vec<CarDataSample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[CarDataSample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&CarDataSample> {
        self.samples.get(index)
    }

    /// Integrate driven distance (meters) from speed and sample time.
    ///
    /// Each row adds `speed / 3.6 * dt` where `dt` is the time since the
    /// previous timestamped row; the first row starts at zero. Rows without
    /// speed or time get no distance but do not reset the running total.
    pub fn add_distance(mut self) -> Self {
        let mut total = 0.0_f64;
        let mut previous: Option<DateTime<Utc>> = None;

        for sample in &mut self.samples {
            let speed = sample.speed.filter(|v| v.is_finite());

            sample.distance = match (sample.date, speed) {
                (Some(date), Some(speed)) => {
                    if let Some(prev) = previous {
                        let dt = (date - prev).num_microseconds().unwrap_or(0) as f64 / 1e6;
                        total += speed / 3.6 * dt;
                    }
                    Some(total)
                }
                _ => None,
            };

            if sample.date.is_some() {
                previous = sample.date;
            }
        }

        self
    }
}
