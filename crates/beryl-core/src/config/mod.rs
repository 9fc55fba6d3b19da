//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files and `BERYL_` environment
//! variables via the `config` crate. Each sub-module holds one logical
//! section together with its serde defaults.

pub mod jwt;
pub mod logging;
pub mod policy;

use serde::{Deserialize, Serialize};

pub use self::jwt::JwtConfig;
pub use self::logging::LoggingConfig;
pub use self::policy::{PasswordRule, Pattern, SecurityPolicy};

use crate::error::AppError;

/// Root configuration for services built on the Beryl commons.
///
/// Top-level deserialization target for the merged configuration sources.
/// Every section falls back to its documented defaults when absent, so an
/// empty configuration is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Security policy thresholds.
    #[serde(default)]
    pub security: SecurityPolicy,
    /// Token signing settings.
    #[serde(default)]
    pub jwt: JwtConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and validate configuration for the given environment.
    ///
    /// Layers `config/default.toml`, then the `config/{env}.toml` overlay,
    /// then `BERYL_`-prefixed environment variables; later sources win.
    /// The security policy is validated before the result is handed out.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BERYL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.security.validate()?;
        tracing::debug!(env, "configuration loaded");

        Ok(config)
    }
}
