// file: src/cli/args.rs
// version: 2.0.0
// guid: f6g7h8i9-j0k1-2345-6789-012345fghijk

//! Command line argument definitions

use clap::{Args, Parser, Subcommand};
use crate::dialect::OperationParams;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lichbd-dialect")]
#[command(about = "Render, run and parse version-specific lichbd commands")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Configuration file (TOML, or YAML by extension)")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Internal lichbd version id (overrides config and LICHBD_VERSION)"
    )]
    pub lichbd_version: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dialect selected for the lichbd version
    Dialect {
        #[arg(long)]
        json: bool,
    },

    /// Print the command line for an operation
    Render {
        #[command(flatten)]
        operation: OperationArgs,

        #[arg(long, help = "Shell-quote arguments containing metacharacters")]
        quote: bool,
    },

    /// Execute an operation with retry
    Run {
        #[command(flatten)]
        operation: OperationArgs,

        #[arg(long, help = "Show what would be run without running it")]
        dry_run: bool,
    },

    /// Parse `lich stat --human-unreadable` output from a file or stdin
    ParseStat {
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Query cluster capacity through `lich stat`
    Stat {
        #[arg(long)]
        dry_run: bool,

        #[arg(long)]
        json: bool,
    },
}

/// An operation name and its parameters
#[derive(Args, Debug, Clone)]
pub struct OperationArgs {
    #[arg(help = "Operation name, e.g. pool-create, vol-info, snap-clone")]
    pub operation: String,

    #[arg(long, help = "Pool, volume, snapshot or image path")]
    pub path: Option<String>,

    #[arg(long)]
    pub src: Option<String>,

    #[arg(long)]
    pub dst: Option<String>,

    #[arg(long, help = "Volume size in bytes")]
    pub size: Option<u64>,

    #[arg(long, help = "Transport protocol for legacy dialects (default from config)")]
    pub protocol: Option<String>,
}

impl OperationArgs {
    pub fn params(&self) -> OperationParams {
        OperationParams {
            path: self.path.clone(),
            src: self.src.clone(),
            dst: self.dst.clone(),
            size: self.size,
            protocol: self.protocol.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "lichbd-dialect",
            "-l",
            "380",
            "render",
            "vol-create",
            "--path",
            "v1",
            "--size",
            "1024",
        ])
        .unwrap();

        assert_eq!(cli.lichbd_version, Some(380));
        match cli.command {
            Commands::Render { operation, quote } => {
                assert!(!quote);
                assert_eq!(operation.operation, "vol-create");
                let params = operation.params();
                assert_eq!(params.path.as_deref(), Some("v1"));
                assert_eq!(params.size, Some(1024));
                assert_eq!(params.protocol, None);
            }
            _ => panic!("expected render"),
        }
    }
}
