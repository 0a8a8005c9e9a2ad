use serde::Deserialize;

use crate::infrastructure::observability::ObservabilityConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub openf1: OpenF1Config,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Session cache and on-disk response cache settings
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of loaded sessions held in memory
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Directory for cached data source responses
    #[serde(default = "default_cache_dir")]
    pub dir: String,
    /// Age after which a cached response is fetched again; 0 keeps entries
    /// forever
    #[serde(default = "default_disk_ttl_secs")]
    pub disk_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Approximate number of points returned per lap
    #[serde(default = "default_sample_target")]
    pub sample_target: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenF1Config {
    #[serde(default = "default_openf1_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Persist raw responses under `cache.dir`
    #[serde(default = "default_true")]
    pub disk_cache: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_level() -> String {
    "info".to_string()
}

fn default_max_sessions() -> usize {
    10
}

fn default_cache_dir() -> String {
    "cache".to_string()
}

fn default_disk_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_sample_target() -> usize {
    50
}

fn default_openf1_base_url() -> String {
    "https://api.openf1.org/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            dir: default_cache_dir(),
            disk_ttl_secs: default_disk_ttl_secs(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            sample_target: default_sample_target(),
        }
    }
}

impl Default for OpenF1Config {
    fn default() -> Self {
        Self {
            base_url: default_openf1_base_url(),
            timeout_secs: default_timeout_secs(),
            disk_cache: true,
        }
    }
}

impl AppConfig {
    /// Layered load: `config/default`, `config/local`, then `F1API__*`
    /// environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("F1API")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
