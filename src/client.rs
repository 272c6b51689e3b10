// file: src/client.rs
// version: 1.0.0
// guid: f27d8c40-3b96-4e1a-8c05-b4e9a1d6f3c2

//! lichbd client: a resolved dialect bound to an executor and retry policy

use crate::config::Config;
use crate::dialect::{
    build_command_with, parse_cluster_stat, parse_used, resolve_dialect, ClusterStat, Dialect,
    Interpolation, Operation, OperationParams,
};
use crate::error::LichbdError;
use crate::executor::{call_try, CommandExecutor, ExecutionResult, RetryPolicy};
use crate::logging::with_operation_span;
use crate::Result;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Cluster capacity query; its output format follows the dialect
pub const CLUSTER_STAT_COMMAND: &str = "lich stat --human-unreadable 2>/dev/null";

pub struct LichbdClient<E> {
    dialect: &'static Dialect,
    executor: E,
    policy: RetryPolicy,
    protocol: String,
    working_directory: Option<PathBuf>,
    interpolation: Interpolation,
}

impl<E: CommandExecutor> LichbdClient<E> {
    pub fn new(version: u64, executor: E) -> Self {
        let dialect = resolve_dialect(version);
        info!("lichbd version is {}, using {} dialect", version, dialect.name());

        Self {
            dialect,
            executor,
            policy: RetryPolicy::default(),
            protocol: "nbd".to_string(),
            working_directory: None,
            interpolation: Interpolation::Verbatim,
        }
    }

    /// Build a client from configuration; the lichbd version must be known
    pub fn from_config(config: &Config, executor: E) -> Result<Self> {
        let version = config
            .lichbd
            .version
            .ok_or_else(|| LichbdError::config("lichbd version is not set"))?;

        let mut client = Self::new(version, executor)
            .with_policy(config.retry_policy())
            .with_protocol(config.lichbd.protocol.clone())
            .with_interpolation(config.lichbd.interpolation);
        if let Some(dir) = &config.execution.working_directory {
            client = client.with_working_directory(dir);
        }
        Ok(client)
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Protocol used when a call's params carry none
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Render `op`, filling in the default protocol
    pub fn command(&self, op: Operation, params: &OperationParams) -> Result<String> {
        let mut params = params.clone();
        if params.protocol.is_none() {
            params.protocol = Some(self.protocol.clone());
        }
        build_command_with(self.dialect, op, &params, self.interpolation)
    }

    /// Render and execute `op` with retry. The last result is returned as-is;
    /// deciding whether a non-zero exit is fatal is up to the caller.
    pub async fn run(&self, op: Operation, params: &OperationParams) -> Result<ExecutionResult> {
        let command = self.command(op, params)?;
        with_operation_span(op.as_str(), || self.call(&command)).await
    }

    async fn call(&self, command: &str) -> Result<ExecutionResult> {
        debug!("Running: {}", command);
        call_try(
            &self.executor,
            command,
            self.working_directory.as_deref(),
            &self.policy,
        )
        .await
    }

    /// Execute and require exit code 0, returning stdout
    async fn call_for_output(&self, command: &str) -> Result<String> {
        let result = self.call(command).await?;
        if !result.success() {
            error!("Command '{}' failed with exit code {}", command, result.exit_code);
            return Err(LichbdError::execution(
                command,
                Some(result.exit_code),
                result.stderr,
            ));
        }
        Ok(result.stdout)
    }

    async fn run_for_output(&self, op: Operation, params: &OperationParams) -> Result<String> {
        let command = self.command(op, params)?;
        with_operation_span(op.as_str(), || self.call_for_output(&command)).await
    }

    pub async fn create_pool(&self, pool: &str) -> Result<ExecutionResult> {
        self.run(Operation::PoolCreate, &OperationParams::new().path(pool)).await
    }

    pub async fn list_pools(&self) -> Result<String> {
        self.run_for_output(Operation::PoolList, &OperationParams::new()).await
    }

    pub async fn remove_pool(&self, pool: &str) -> Result<ExecutionResult> {
        self.run(Operation::PoolRemove, &OperationParams::new().path(pool)).await
    }

    pub async fn create_volume(&self, path: &str, size: u64) -> Result<ExecutionResult> {
        let params = OperationParams::new().path(path).size(size);
        self.run(Operation::VolCreate, &params).await
    }

    pub async fn remove_volume(&self, path: &str) -> Result<ExecutionResult> {
        self.run(Operation::VolRemove, &OperationParams::new().path(path)).await
    }

    pub async fn volume_info(&self, path: &str) -> Result<String> {
        self.run_for_output(Operation::VolInfo, &OperationParams::new().path(path)).await
    }

    pub async fn create_snapshot(&self, snap: &str) -> Result<ExecutionResult> {
        self.run(Operation::SnapCreate, &OperationParams::new().path(snap)).await
    }

    pub async fn list_snapshots(&self, image: &str) -> Result<String> {
        self.run_for_output(Operation::SnapList, &OperationParams::new().path(image)).await
    }

    pub async fn remove_snapshot(&self, snap: &str) -> Result<ExecutionResult> {
        self.run(Operation::SnapRemove, &OperationParams::new().path(snap)).await
    }

    /// Raw `lich stat` output
    pub async fn cluster_stat_output(&self) -> Result<String> {
        with_operation_span("cluster-stat", || self.call_for_output(CLUSTER_STAT_COMMAND)).await
    }

    pub async fn capacity(&self) -> Result<ClusterStat> {
        let output = self.cluster_stat_output().await?;
        parse_cluster_stat(self.dialect, &output)
    }

    pub async fn used(&self) -> Result<u64> {
        let output = self.cluster_stat_output().await?;
        parse_used(self.dialect, &output)
    }
}
