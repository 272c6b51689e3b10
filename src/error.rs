// file: src/error.rs
// version: 3.0.0
// guid: 57b83a63-07b6-4534-aa6c-51e8797254e0

use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, LichbdError>;

/// Error types for lichbd command building, parsing and execution
#[derive(Error, Debug)]
pub enum LichbdError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Operation '{operation}' requires parameter '{parameter}'")]
    MissingParameter {
        operation: String,
        parameter: &'static str,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Command '{command}' failed (exit code {exit_code:?}): {stderr}")]
    Execution {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LichbdError {
    /// Create a new unknown operation error
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation(name.into())
    }

    /// Create a new missing parameter error
    pub fn missing_parameter(operation: impl Into<String>, parameter: &'static str) -> Self {
        Self::MissingParameter {
            operation: operation.into(),
            parameter,
        }
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new execution error
    pub fn execution(
        command: impl Into<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::Execution {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error is a stat output mismatch
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
