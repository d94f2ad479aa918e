//! Configuration management for the CropCast backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROPCAST_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    #[validate]
    pub server: ServerConfig,

    /// Hosted model endpoint configuration
    #[validate]
    pub gemini: GeminiConfig,

    /// Flow tuning knobs
    #[validate]
    pub ai: AiConfig,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    #[validate(length(min = 1))]
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct GeminiConfig {
    /// API key for the hosted model endpoint.
    /// Empty is tolerated at load time so local tooling can start without
    /// credentials; production startup refuses it.
    pub api_key: String,

    /// Model identifier, e.g. "gemini-2.0-flash"
    #[validate(length(min = 1))]
    pub model: String,

    /// Endpoint base URL
    #[validate(url)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AiConfig {
    /// Maximum tool round-trips within one conversation before the flow
    /// is failed.
    #[validate(range(min = 1, max = 10))]
    pub max_tool_rounds: u32,

    /// Wall-clock budget for a whole flow, in seconds
    #[validate(range(min = 1))]
    pub flow_timeout_secs: u64,
}

impl AiConfig {
    pub fn flow_timeout(&self) -> Duration {
        Duration::from_secs(self.flow_timeout_secs)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROPCAST_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("gemini.api_key", "")?
            .set_default("gemini.model", "gemini-2.0-flash")?
            .set_default("gemini.base_url", "https://generativelanguage.googleapis.com")?
            .set_default("ai.max_tool_rounds", 5)?
            .set_default("ai.flow_timeout_secs", 120)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROPCAST_ prefix)
            .add_source(
                Environment::with_prefix("CROPCAST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid configuration: {e}")))?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            gemini: GeminiConfig {
                api_key: String::new(),
                model: "gemini-2.0-flash".to_string(),
                base_url: "https://generativelanguage.googleapis.com".to_string(),
            },
            ai: AiConfig {
                max_tool_rounds: 5,
                flow_timeout_secs: 120,
            },
        }
    }

    #[test]
    fn test_base_config_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_zero_tool_rounds_rejected() {
        let mut config = base_config();
        config.ai.max_tool_rounds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_model_rejected() {
        let mut config = base_config();
        config.gemini.model = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_base_url_rejected() {
        let mut config = base_config();
        config.gemini.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
