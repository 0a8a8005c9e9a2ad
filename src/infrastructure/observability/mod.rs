//! Observability infrastructure - Tracing, Metrics, and Logging

mod config;
mod metrics;
mod tracing_setup;

pub use config::{MetricsConfig, ObservabilityConfig, TracingConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_cache_eviction, record_cache_lookup,
    record_http_request, record_session_load, set_cache_entries, PrometheusMetrics,
};
pub use tracing_setup::{init_tracing, shutdown_tracing};
