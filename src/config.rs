// file: src/config.rs
// version: 2.0.0
// guid: 6ea31d79-e2bf-4304-a841-22bf1e595512

pub mod loader;

use crate::dialect::Interpolation;
use crate::error::{LichbdError, Result};
use crate::executor::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};
use loader::ConfigLoader;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lichbd: LichbdConfig,
    pub execution: ExecutionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LichbdConfig {
    /// Internal version id of the deployed lichbd tool
    pub version: Option<u64>,
    /// Protocol passed as `-p` by legacy dialects
    pub protocol: String,
    pub interpolation: Interpolation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub working_directory: Option<PathBuf>,
    pub max_attempts: u32,
    pub retry_delay_seconds: u64,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LichbdConfig {
    fn default() -> Self {
        Self {
            version: None,
            protocol: "nbd".to_string(),
            interpolation: Interpolation::Verbatim,
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            working_directory: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_seconds: 1,
            dry_run: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the user config file, an optional explicit
    /// file, then environment overrides. Later sources win per key: a key
    /// the explicit file leaves out keeps its user config value.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let loader = ConfigLoader::new();
        let mut merged = Value::Object(Map::new());

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                info!("Loading user configuration from: {}", user_config.display());
                merge_values(&mut merged, loader.load_value(&user_config).await?);
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(LichbdError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            info!("Loading configuration from: {}", path.display());
            merge_values(&mut merged, loader.load_value(path).await?);
        }

        let config: Self = serde_json::from_value(merged)?;
        let config = Self::apply_env_overrides(config, |key| std::env::var(key).ok())?;

        debug!("Final configuration: {:#?}", config);
        Ok(config)
    }

    /// Get the user configuration file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lichbd-dialect").join("config.toml"))
    }

    /// Apply `LICHBD_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(mut config: Self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(version) = lookup("LICHBD_VERSION") {
            config.lichbd.version = Some(parse_env("LICHBD_VERSION", &version)?);
        }

        if let Some(protocol) = lookup("LICHBD_PROTOCOL") {
            config.lichbd.protocol = protocol;
        }

        if let Some(dry_run) = lookup("LICHBD_DRY_RUN") {
            config.execution.dry_run = parse_env("LICHBD_DRY_RUN", &dry_run)?;
        }

        if let Some(attempts) = lookup("LICHBD_MAX_ATTEMPTS") {
            config.execution.max_attempts = parse_env("LICHBD_MAX_ATTEMPTS", &attempts)?;
        }

        if let Some(level) = lookup("LICHBD_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.execution.max_attempts,
            Duration::from_secs(self.execution.retry_delay_seconds),
        )
    }
}

/// Overlay `overlay` onto `base`, recursing into tables
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        // Empty YAML documents parse to null
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| LichbdError::config(format!("Invalid value '{}' for {}: {}", value, key, e)))
}
