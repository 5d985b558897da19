//! # Configuration
//!
//! Settings are read from a TOML file and then overridden from the environment.
//!
//! - `ADMIN_PANEL_CONFIG` - path of the file (default `admin-panel.toml`). A missing file
//!   means defaults.
//! - `ADMIN_PANEL_CHANNEL_CAPACITY` - overrides `gateway.channel_capacity`.
//!
//! ```toml
//! [gateway]
//! channel_capacity = 32
//!
//! [logging]
//! filter = "info"
//! with_target = false
//!
//! [[seed.products]]
//! name = "Gauze"
//! price = "5.50"
//! description = "Sterile gauze pads"
//! quantity = 40
//! product_image = "https://example.com/gauze.png"
//! ```

use crate::model::ProductInsert;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "ADMIN_PANEL_CONFIG";
pub const CHANNEL_CAPACITY_VAR: &str = "ADMIN_PANEL_CHANNEL_CAPACITY";
pub const DEFAULT_CONFIG_PATH: &str = "admin-panel.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bound of each collection's request channel.
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub with_target: bool,
}

/// Products inserted when the system starts, before the first list fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub products: Vec<ProductInsert>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub logging: LoggingConfig,
    pub seed: SeedConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            channel_capacity: 32,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
            with_target: false,
        }
    }
}

impl Config {
    /// Loads the file named by `ADMIN_PANEL_CONFIG` and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load_from_file(Path::new(&path))?;
        config.apply_env_overrides(|var| env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the collections cannot be built with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.channel_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gateway.channel_capacity",
                value: self.gateway.channel_capacity.to_string(),
            });
        }
        Ok(())
    }

    fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(CHANNEL_CAPACITY_VAR) {
            self.gateway.channel_capacity = match value.parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: CHANNEL_CAPACITY_VAR,
                        value,
                    })
                }
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.gateway.channel_capacity, 32);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [logging]
            with_target = true
            "#,
        )
        .unwrap();
        assert!(config.logging.with_target);
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.gateway.channel_capacity, 32);
    }

    #[test]
    fn seed_products_are_parsed_in_order() {
        let config = Config::from_toml_str(
            r#"
            [[seed.products]]
            name = "Gauze"
            price = "5.50"
            description = "Sterile gauze pads"
            quantity = 40
            product_image = "https://example.com/gauze.png"

            [[seed.products]]
            name = "Tape"
            price = "2"
            description = "Surgical tape"
            quantity = 12
            product_image = "https://example.com/tape.png"
            "#,
        )
        .unwrap();

        let names: Vec<&str> = config
            .seed
            .products
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Gauze", "Tape"]);
        assert_eq!(config.seed.products[0].price, Decimal::new(550, 2));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::from_toml_str("[gateway\nchannel_capacity = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load_from_file(Path::new("/nonexistent/admin-panel.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn env_override_replaces_channel_capacity() {
        let mut config = Config::default();
        config
            .apply_env_overrides(|var| (var == CHANNEL_CAPACITY_VAR).then(|| "8".to_string()))
            .unwrap();
        assert_eq!(config.gateway.channel_capacity, 8);
    }

    #[test]
    fn file_with_zero_capacity_is_rejected() {
        let err = Config::from_toml_str("[gateway]\nchannel_capacity = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "gateway.channel_capacity",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Invalid value for gateway.channel_capacity: 0"
        );
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn env_override_rejects_zero_capacity() {
        let mut config = Config::default();
        let err = config
            .apply_env_overrides(|_| Some("0".to_string()))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for ADMIN_PANEL_CHANNEL_CAPACITY: 0"
        );
    }
}
