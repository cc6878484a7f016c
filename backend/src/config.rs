//! Configuration management for the Power Consumption Dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides such as `PCD__SERVER__PORT` (`PCD`
//!    prefix, `__` between prefix and nested keys)

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Dataset configuration
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Path to the power consumption CSV
    pub path: String,

    /// ISO year used to resolve heatmap clicks; derived from the dataset
    /// when unset
    pub year: Option<i32>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PCD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8050)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("data.path", "./assets/data/powerconsumption.csv")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PCD_ prefix)
            .add_source(
                Environment::with_prefix("PCD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8050,
            host: "0.0.0.0".to_string(),
        }
    }
}
