// file: src/cli/commands.rs
// version: 2.0.0
// guid: g7h8i9j0-k1l2-3456-7890-123456ghijkl

//! Command implementations for the CLI

use crate::{
    cli::args::OperationArgs,
    client::LichbdClient,
    config::Config,
    dialect::{
        build_command_with, parse_cluster_stat, resolve_dialect, ClusterStat, Dialect,
        Interpolation, Operation,
    },
    executor::LocalExecutor,
};
use anyhow::Context;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

fn require_version(config: &Config) -> anyhow::Result<u64> {
    config
        .lichbd
        .version
        .context("lichbd version is not set; use --lichbd-version or LICHBD_VERSION")
}

fn warn_if_missing(binary: &str) {
    if which::which(binary).is_err() {
        warn!("{} not found in PATH; commands will likely fail", binary);
    }
}

/// Show the resolved dialect
pub fn dialect_command(config: &Config, json: bool) -> anyhow::Result<()> {
    let dialect = resolve_dialect(require_version(config)?);

    if json {
        println!("{}", serde_json::to_string_pretty(&dialect.summary())?);
        return Ok(());
    }

    println!("{}", describe_dialect(dialect));
    Ok(())
}

fn describe_dialect(dialect: &Dialect) -> String {
    let pool_path = if dialect.pool_path().is_empty() {
        "(none)"
    } else {
        dialect.pool_path()
    };

    let mut out = format!(
        "dialect:        {}\npool path:      {}\nprotocol flag:  {}\nsnapshot tree:  {}\nqemu:           {}\nqemu-img:       {}\noperations:\n",
        dialect.name(),
        pool_path,
        dialect.uses_protocol_flag(),
        dialect.supports_snapshot_tree(),
        dialect.qemu_path(),
        dialect.qemu_img_path(),
    );
    for op in Operation::ALL {
        let verb = dialect.verb(op).unwrap_or("(unsupported)");
        out.push_str(&format!("  {:<18}lichbd {}\n", op.as_str(), verb));
    }
    out
}

/// Print the command line for an operation
pub fn render_command(config: &Config, args: &OperationArgs, quote: bool) -> anyhow::Result<()> {
    let dialect = resolve_dialect(require_version(config)?);
    let op: Operation = args.operation.parse()?;

    let mut params = args.params();
    if params.protocol.is_none() {
        params.protocol = Some(config.lichbd.protocol.clone());
    }

    let interpolation = if quote {
        Interpolation::ShellQuoted
    } else {
        config.lichbd.interpolation
    };

    println!("{}", build_command_with(dialect, op, &params, interpolation)?);
    Ok(())
}

/// Execute an operation; returns the tool's final exit code
pub async fn run_command(
    config: &Config,
    args: &OperationArgs,
    dry_run: bool,
) -> anyhow::Result<i32> {
    let op: Operation = args.operation.parse()?;
    let executor = LocalExecutor::new().dry_run(dry_run || config.execution.dry_run);
    if !executor.is_dry_run() {
        warn_if_missing("lichbd");
    }

    let client = LichbdClient::from_config(config, executor)?;
    let result = client
        .run(op, &args.params())
        .await
        .with_context(|| format!("Failed to run {}", op))?;

    print!("{}", result.stdout);
    if !result.stderr.is_empty() {
        eprint!("{}", result.stderr);
    }

    if result.success() {
        info!("{} completed", op);
    } else {
        warn!("{} exited with code {}", op, result.exit_code);
    }
    Ok(result.exit_code)
}

/// Parse stat output from a file or stdin
pub async fn parse_stat_command(
    config: &Config,
    file: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let dialect = resolve_dialect(require_version(config)?);

    let raw = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };

    let stat = parse_cluster_stat(dialect, &raw)?;
    print_stat(&stat, json)
}

/// Query `lich stat` and print capacity figures
pub async fn stat_command(config: &Config, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let executor = LocalExecutor::new().dry_run(dry_run || config.execution.dry_run);
    let dry_run = executor.is_dry_run();
    if !dry_run {
        warn_if_missing("lich");
    }

    let client = LichbdClient::from_config(config, executor)?;

    if dry_run {
        client.cluster_stat_output().await?;
        return Ok(());
    }

    let stat = client.capacity().await?;
    print_stat(&stat, json)
}

fn print_stat(stat: &ClusterStat, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(stat)?);
    } else {
        println!("total: {}", stat.total);
        println!("used: {}", stat.used);
        println!("free: {}", stat.free());
    }
    Ok(())
}
