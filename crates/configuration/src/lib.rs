use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AccessConfig, AccessPolicyKind, Config, DataConfig, LoggingConfig, ServerConfig,
};

/// Prefix for environment overrides, e.g. `MISSION_CONTROL__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "MISSION_CONTROL";

/// Loads the application configuration.
///
/// Sources are layered in order: built-in defaults, the TOML file at `path` (optional;
/// a missing file is not an error), then `MISSION_CONTROL__*` environment variables.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("logging.level", "info")?
        .set_default("logging.json", false)?
        .set_default("access.policy", "allow-all")?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

/// Checks cross-field rules the type system cannot express.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }

    if config.access.policy == AccessPolicyKind::BearerToken
        && config.access.token.as_deref().is_none_or(|t| t.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(
            "access.token is required when access.policy = \"bearer-token\"".to_string(),
        ));
    }

    Ok(())
}
