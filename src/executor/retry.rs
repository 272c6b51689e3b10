// file: src/executor/retry.rs
// version: 1.0.0
// guid: 6c5f1a93-d8b0-4e27-9b46-3a0e7f2c18d5

//! Retry wrapper for idempotent lichbd commands

use super::{CommandExecutor, ExecutionResult};
use crate::Result;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// How often to run a command and which exit codes end the loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub success_codes: Vec<i32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
            // "already exists" means a previous attempt got through
            success_codes: vec![0, libc::EEXIST],
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            ..Self::default()
        }
    }

    pub fn is_success(&self, exit_code: i32) -> bool {
        self.success_codes.contains(&exit_code)
    }
}

/// Run `command` until it exits with a success code or the attempts run out.
/// Returns the last result either way; failure to spawn propagates at once.
pub async fn call_try<E: CommandExecutor + ?Sized>(
    executor: &E,
    command: &str,
    workdir: Option<&Path>,
    policy: &RetryPolicy,
) -> Result<ExecutionResult> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let result = executor.execute(command, workdir).await?;

        if policy.is_success(result.exit_code) {
            if attempt > 1 {
                info!("Command '{}' succeeded on attempt {}/{}", command, attempt, max_attempts);
            }
            return Ok(result);
        }

        if attempt >= max_attempts {
            warn!(
                "Command '{}' still failing after {} attempts (exit code {})",
                command, attempt, result.exit_code
            );
            return Ok(result);
        }

        warn!(
            "Attempt {}/{} of '{}' failed with exit code {}, retrying in {:?}",
            attempt, max_attempts, command, result.exit_code, policy.delay
        );
        tokio::time::sleep(policy.delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::ScriptedExecutor;

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.delay, Duration::from_secs(1));
        assert!(policy.is_success(0));
        assert!(policy.is_success(libc::EEXIST));
        assert!(!policy.is_success(1));
    }

    #[tokio::test]
    async fn test_stops_on_first_success() {
        let executor = ScriptedExecutor::with_exit_codes(&[1, 5, 0, 1]);
        let result = call_try(&executor, "lichbd vol rm x", None, &fast(10)).await.unwrap();

        assert_eq!(result.exit_code, 0);
        assert_eq!(executor.recorded().len(), 3);
    }

    #[tokio::test]
    async fn test_already_exists_counts_as_success() {
        let executor = ScriptedExecutor::with_exit_codes(&[libc::EEXIST]);
        let result = call_try(&executor, "lichbd dir create /default/nbd/p", None, &fast(10))
            .await
            .unwrap();

        assert_eq!(result.exit_code, libc::EEXIST);
        assert_eq!(executor.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_returns_last_failure_after_exhausting_attempts() {
        let executor = ScriptedExecutor::with_exit_codes(&[2, 3, 4, 0]);
        let result = call_try(&executor, "lichbd vol info v", None, &fast(3)).await.unwrap();

        assert_eq!(result.exit_code, 4);
        assert_eq!(executor.recorded(), vec!["lichbd vol info v"; 3]);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let executor = ScriptedExecutor::with_exit_codes(&[1]);
        let result = call_try(&executor, "true", None, &fast(0)).await.unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(executor.recorded().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_between_attempts_only() {
        let executor = ScriptedExecutor::with_exit_codes(&[1, 1, 1]);
        let start = tokio::time::Instant::now();
        call_try(&executor, "false", None, &RetryPolicy::new(3, Duration::from_secs(1)))
            .await
            .unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(3));
    }
}
