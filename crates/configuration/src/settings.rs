use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataConfig,
    pub access: AccessConfig,
}

/// Where the REST service listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// The `host:port` string handed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Controls the tracing subscriber installed by the binaries.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is not set (e.g. "info").
    pub level: String,
    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// Optional JSON fixtures replacing the built-in sample records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub missions_file: Option<PathBuf>,
    #[serde(default)]
    pub crew_file: Option<PathBuf>,
}

/// Which access policy guards the mission routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum AccessPolicyKind {
    /// Every request is allowed.
    AllowAll,
    /// Requests must carry `Authorization: Bearer <token>`.
    BearerToken,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    pub policy: AccessPolicyKind,
    /// Shared secret for the bearer-token policy.
    #[serde(default)]
    pub token: Option<String>,
}
