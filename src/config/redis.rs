//! Redis configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Redis configuration. When present, chat sessions live in Redis.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RedisConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Redis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("REDIS__URL"));
        }
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ValidationError::InvalidRedisUrl);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> RedisConfig {
        RedisConfig {
            url: url.to_string(),
            timeout_secs: default_timeout(),
        }
    }

    #[test]
    fn accepts_redis_schemes() {
        assert!(config("redis://localhost:6379").validate().is_ok());
        assert!(config("rediss://cache.internal:6380").validate().is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(
            config("http://localhost").validate(),
            Err(ValidationError::InvalidRedisUrl)
        );
        assert_eq!(
            config("").validate(),
            Err(ValidationError::MissingRequired("REDIS__URL"))
        );
    }
}
