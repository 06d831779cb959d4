use std::time::Duration;

use serde::Deserialize;

/// Output format of the local log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// `service.name` resource attribute.
    pub service_name: String,

    /// Filter directive used when `RUST_LOG` is not set.
    pub log_level: String,

    pub log_format: LogFormat,

    /// OTLP/gRPC collector endpoint, e.g. `http://tempo:4317`.
    /// Spans are only exported when this is set.
    pub otlp_endpoint: Option<String>,

    /// Delay between batch exports.
    #[serde(with = "humantime_serde")]
    pub batch_timeout: Duration,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "APP".to_owned(),
            log_level: "info".to_owned(),
            log_format: LogFormat::Text,
            otlp_endpoint: None,
            batch_timeout: Duration::from_secs(1),
        }
    }
}
