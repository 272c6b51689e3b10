// file: src/executor/local.rs
// version: 1.0.0
// guid: 0d8e2b7a-64f1-4c39-a5b2-e91f3c6d7a08

//! Local command execution through `bash -c`

use super::{CommandExecutor, ExecutionResult};
use crate::error::LichbdError;
use crate::Result;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Runs commands on this machine
#[derive(Debug, Clone)]
pub struct LocalExecutor {
    shell: String,
    dry_run: bool,
}

impl LocalExecutor {
    pub fn new() -> Self {
        Self {
            shell: "bash".to_string(),
            dry_run: false,
        }
    }

    /// Log commands instead of running them; every command "succeeds"
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Default for LocalExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CommandExecutor for LocalExecutor {
    async fn execute(&self, command: &str, workdir: Option<&Path>) -> Result<ExecutionResult> {
        if self.dry_run {
            info!("DRY RUN: Would execute: {}", command);
            return Ok(ExecutionResult::default());
        }

        debug!("Executing local command: {}", command);

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = workdir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| {
            LichbdError::execution(command, None, format!("Failed to execute command: {}", e))
        })?;

        // Killed by a signal
        let exit_code = output.status.code().unwrap_or(-1);
        let result = ExecutionResult {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if result.success() {
            debug!("Command executed successfully: {} bytes of output", result.stdout.len());
        } else {
            debug!("Command '{}' exited with code {}", command, exit_code);
            if !result.stderr.trim().is_empty() {
                debug!("STDERR: {}", result.stderr.trim());
            }
        }

        Ok(result)
    }
}
