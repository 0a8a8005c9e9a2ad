//! Observability settings, read from the `observability` config section

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub tracing: TracingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// OTLP span export. Console logging is configured separately under `logging`.
#[derive(Debug, Clone, Deserialize)]
pub struct TracingConfig {
    #[serde(default)]
    pub enabled: bool,
    /// gRPC collector address, e.g. http://localhost:4317
    #[serde(default = "default_otlp_endpoint")]
    pub otlp_endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Fraction of traces kept, clamped to 0.0..=1.0 on use
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
}

impl TracingConfig {
    pub fn effective_sampling_ratio(&self) -> f64 {
        if self.sampling_ratio.is_nan() {
            return 1.0;
        }
        self.sampling_ratio.clamp(0.0, 1.0)
    }
}

/// Prometheus exposition
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
    /// Histogram buckets (seconds) for upstream session loads, which take
    /// far longer than a typical HTTP request
    #[serde(default = "default_session_load_buckets")]
    pub session_load_buckets: Vec<f64>,
}

fn default_otlp_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_sampling_ratio() -> f64 {
    1.0
}

fn default_enabled() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_session_load_buckets() -> Vec<f64> {
    vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: default_otlp_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_metrics_path(),
            session_load_buckets: default_session_load_buckets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ObservabilityConfig::default();

        assert!(!config.tracing.enabled);
        assert_eq!(config.tracing.service_name, "f1-telemetry-api");
        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.path, "/metrics");
        assert_eq!(config.metrics.session_load_buckets.last(), Some(&120.0));
    }

    #[test]
    fn test_sampling_ratio_is_clamped() {
        let mut config = TracingConfig::default();

        config.sampling_ratio = 2.5;
        assert_eq!(config.effective_sampling_ratio(), 1.0);

        config.sampling_ratio = -1.0;
        assert_eq!(config.effective_sampling_ratio(), 0.0);

        config.sampling_ratio = 0.25;
        assert_eq!(config.effective_sampling_ratio(), 0.25);
    }

    #[test]
    fn test_partial_metrics_section() {
        let config: MetricsConfig =
            serde_json::from_str(r#"{"path": "/prom", "session_load_buckets": [1.0, 5.0]}"#)
                .unwrap();

        assert!(config.enabled);
        assert_eq!(config.path, "/prom");
        assert_eq!(config.session_load_buckets, vec![1.0, 5.0]);
    }
}
