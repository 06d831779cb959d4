use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::Deserialize;
use tempo_telemetry::TelemetryConfig;

pub const ENV_PREFIX: &str = "TEMPO_HTTP__";

pub const DEFAULT_SERVICE_NAME: &str = "APP";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,

    /// Upper bound on producing a response.
    #[serde(with = "humantime_serde")]
    pub write_timeout: Duration,

    /// Simulated latency is a random number of 100 ms steps below this
    /// bound; 0 disables it.
    pub latency_steps: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 80)),
            write_timeout: Duration::from_secs(10),
            latency_steps: 20,
        }
    }
}

/// Defaults, then the optional YAML file, then `TEMPO_HTTP__SECTION__KEY`.
///
/// # Errors
///
/// Fails when `path` does not exist or a source does not match the schema.
pub fn load(path: Option<&Path>) -> Result<AppConfig, figment::Error> {
    let mut figment = Figment::new().merge(Serialized::default(
        "telemetry.service_name",
        DEFAULT_SERVICE_NAME,
    ));

    if let Some(path) = path {
        if !path.exists() {
            return Err(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Yaml::file(path));
    }

    figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract()
}
