use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;

use super::RunnerConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Negative seed price: {0}")]
    NegativePrice(Decimal),
}

/// Load runner configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunnerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<RunnerConfig, ConfigError> {
    let config: RunnerConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<RunnerConfig, ConfigError> {
    let default_config = include_str!("default_config.json");
    load_config_from_str(default_config)
}

impl RunnerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::MissingField("symbol"));
        }
        if self.publisher.trim().is_empty() {
            return Err(ConfigError::MissingField("publisher"));
        }
        if self.topic.trim().is_empty() {
            return Err(ConfigError::MissingField("topic"));
        }
        for price in [self.engine.initial_ask_price, self.engine.initial_bid_price] {
            if price.is_sign_negative() {
                return Err(ConfigError::NegativePrice(price));
            }
        }
        Ok(())
    }
}
