// file: src/config/loader.rs
// version: 2.0.0
// guid: d4e5f6g7-h8i9-0123-4567-890123defghi

//! Configuration file loading and environment variable substitution

use super::Config;
use crate::error::LichbdError;
use crate::Result;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Load a TOML, or YAML when the extension says so
    pub async fn load_config<P: AsRef<Path>>(&self, path: P) -> Result<Config> {
        let value = self.load_value(path).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Load a config file as an untyped tree, keeping only the keys it sets
    pub async fn load_value<P: AsRef<Path>>(&self, path: P) -> Result<Value> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            LichbdError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let expanded = self.expand_env_vars(&content)?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );

        let value = if is_yaml {
            serde_yaml::from_str(&expanded)?
        } else {
            toml::from_str(&expanded)?
        };
        Ok(value)
    }

    /// Expand `${VAR}` references in configuration content
    fn expand_env_vars(&self, content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| LichbdError::config(format!("Invalid regex pattern: {}", e)))?;

        let mut result = content.to_string();
        let mut missing_vars = Vec::new();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];

            if let Some(value) = self.env_vars.get(var_name) {
                result = result.replace(placeholder, value);
            } else if !missing_vars.iter().any(|v| v == var_name) {
                missing_vars.push(var_name.to_string());
            }
        }

        if !missing_vars.is_empty() {
            return Err(LichbdError::config(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result)
    }

    /// Set environment variable for substitution
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
