// file: src/executor.rs
// version: 3.0.0
// guid: bb371682-35cb-4f34-b318-8bf69ec125bd

//! Command execution seam
//!
//! Rendered lichbd commands are shell strings. They reach the system through
//! a [`CommandExecutor`], normally wrapped in [`retry::call_try`].

pub mod local;
pub mod retry;

pub use local::LocalExecutor;
pub use retry::{call_try, RetryPolicy, DEFAULT_MAX_ATTEMPTS};

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outcome of one command invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a shell command string and captures its output
#[async_trait::async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute `command`, optionally from `workdir`. A non-zero exit is not
    /// an error here; only a failure to run the command at all is.
    async fn execute(&self, command: &str, workdir: Option<&Path>) -> Result<ExecutionResult>;
}

#[async_trait::async_trait]
impl<T: CommandExecutor + ?Sized> CommandExecutor for std::sync::Arc<T> {
    async fn execute(&self, command: &str, workdir: Option<&Path>) -> Result<ExecutionResult> {
        (**self).execute(command, workdir).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Replays scripted results and records every command it was given
    #[derive(Default)]
    pub struct ScriptedExecutor {
        results: Mutex<VecDeque<ExecutionResult>>,
        pub commands: Mutex<Vec<String>>,
        pub workdirs: Mutex<Vec<Option<PathBuf>>>,
    }

    impl ScriptedExecutor {
        pub fn with_exit_codes(codes: &[i32]) -> Self {
            let results = codes
                .iter()
                .map(|&exit_code| ExecutionResult {
                    exit_code,
                    ..Default::default()
                })
                .collect();
            Self {
                results: Mutex::new(results),
                ..Default::default()
            }
        }

        pub fn with_stdout(stdout: &str) -> Self {
            Self {
                results: Mutex::new(VecDeque::from(vec![ExecutionResult {
                    exit_code: 0,
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                }])),
                ..Default::default()
            }
        }

        pub fn recorded(&self) -> Vec<String> {
            self.commands.lock().unwrap().clone()
        }

        pub fn recorded_workdirs(&self) -> Vec<Option<PathBuf>> {
            self.workdirs.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl CommandExecutor for ScriptedExecutor {
        async fn execute(&self, command: &str, workdir: Option<&Path>) -> Result<ExecutionResult> {
            self.commands.lock().unwrap().push(command.to_string());
            self.workdirs.lock().unwrap().push(workdir.map(Path::to_path_buf));
            Ok(self
                .results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_default())
        }
    }
}
