//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `DISPUTE_ASSISTANT`
//! prefix and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use dispute_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod database;
mod error;
mod redis;
mod server;
mod session;

pub use ai::{AiConfig, AiProviderKind};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults except `redis` and `database`, whose presence
/// selects the external session store and dispute store respectively.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub session: SessionConfig,

    /// Redis session store; in-memory when absent
    #[serde(default)]
    pub redis: Option<RedisConfig>,

    /// PostgreSQL dispute store; in-memory when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` if present, then every `DISPUTE_ASSISTANT__*` variable:
    ///
    /// - `DISPUTE_ASSISTANT__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `DISPUTE_ASSISTANT__REDIS__URL=...` -> `redis.url = ...`
    /// - `DISPUTE_ASSISTANT__AI__PROVIDER=ollama` -> `ai.provider = Ollama`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DISPUTE_ASSISTANT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.session.validate()?;
        if let Some(redis) = &self.redis {
            redis.validate()?;
        }
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.ai.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
