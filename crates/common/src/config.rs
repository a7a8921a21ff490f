//! Application configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Local store configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Simulated service latency.
    #[serde(default)]
    pub latency: LatencyConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which key-value store backs the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// One JSON file per key under `data_dir`.
    #[default]
    File,
    /// Process memory; nothing survives a restart.
    Memory,
}

/// Local store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Store implementation.
    #[serde(default)]
    pub backend: StorageBackendKind,
    /// Directory holding the JSON files of the file store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Artificial delays applied at the service boundary, in milliseconds.
///
/// These stand in for the round trip to a real backend. Set them to zero in
/// tests.
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    /// Delay before a submitted report is stored.
    #[serde(default = "default_submit_ms")]
    pub submit_ms: u64,
    /// Delay before a report lookup answers.
    #[serde(default = "default_lookup_ms")]
    pub lookup_ms: u64,
    /// Delay before login/register answers.
    #[serde(default)]
    pub auth_ms: u64,
}

impl LatencyConfig {
    /// No artificial delay anywhere.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            submit_ms: 0,
            lookup_ms: 0,
            auth_ms: 0,
        }
    }

    /// Delay before a submission completes.
    #[must_use]
    pub const fn submit(&self) -> Duration {
        Duration::from_millis(self.submit_ms)
    }

    /// Delay before a lookup completes.
    #[must_use]
    pub const fn lookup(&self) -> Duration {
        Duration::from_millis(self.lookup_ms)
    }

    /// Delay before a login or registration completes.
    #[must_use]
    pub const fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            submit_ms: default_submit_ms(),
            lookup_ms: default_lookup_ms(),
            auth_ms: 0,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

const fn default_submit_ms() -> u64 {
    2000
}

const fn default_lookup_ms() -> u64 {
    1000
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `CRIMEREPORT_ENV`)
    /// 3. Environment variables with `CRIMEREPORT_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("CRIMEREPORT_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CRIMEREPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("CRIMEREPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// In-memory store and no artificial latency.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig {
                backend: StorageBackendKind::Memory,
                data_dir: default_data_dir(),
            },
            latency: LatencyConfig::none(),
        }
    }

    /// Address the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
