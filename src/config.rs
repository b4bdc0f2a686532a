use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::storage::DEFAULT_CART_KEY;

#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Key the cart snapshot is stored under.
    pub storage_key: String,
    /// Capacity of the cart service request queue.
    pub buffer_size: usize,
    /// Remote catalog root; the demo falls back to an in-memory catalog when unset.
    pub catalog_base_url: Option<String>,
    pub catalog_timeout: Duration,
    pub data_dir: PathBuf,
    /// Check stock before the first unit of a new product enters the cart.
    pub check_stock_on_first_add: bool,
    pub log_filter: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            buffer_size: 32,
            catalog_base_url: None,
            catalog_timeout: Duration::from_secs(5),
            data_dir: PathBuf::from(".cart"),
            check_stock_on_first_add: false,
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnv { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl CartConfig {
    /// Defaults overlaid with `CART_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`; blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(key) = get("CART_STORAGE_KEY") {
            config.storage_key = key;
        }
        if let Some(value) = get("CART_BUFFER_SIZE") {
            config.buffer_size = parse("CART_BUFFER_SIZE", &value)?;
        }
        if let Some(url) = get("CART_CATALOG_URL") {
            config.catalog_base_url = Some(url);
        }
        if let Some(value) = get("CART_CATALOG_TIMEOUT_MS") {
            let millis = parse("CART_CATALOG_TIMEOUT_MS", &value)?;
            config.catalog_timeout = Duration::from_millis(millis);
        }
        if let Some(dir) = get("CART_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(value) = get("CART_STRICT_FIRST_ADD") {
            config.check_stock_on_first_add = parse_bool("CART_STRICT_FIRST_ADD", &value)?;
        }
        if let Some(filter) = get("CART_LOG") {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Validation("storage key must not be empty".to_string()));
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::Validation("buffer size must be at least 1".to_string()));
        }
        if self.catalog_timeout.is_zero() {
            return Err(ConfigError::Validation("catalog timeout must be positive".to_string()));
        }
        Ok(())
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
