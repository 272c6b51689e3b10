// file: src/main.rs
// version: 2.0.0
// guid: h8i9j0k1-l2m3-4567-8901-234567hijklm

//! lichbd-dialect - Main entry point

use clap::Parser;
use lichbd_dialect::{
    cli::{args::Cli, args::Commands, commands::*},
    config::Config,
    logging::logger,
};
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).await?;
    if let Some(version) = cli.lichbd_version {
        config.lichbd.version = Some(version);
    }

    // Initialize logging
    logger::init_logger(cli.verbose, cli.quiet, &config.logging.level)?;
    debug!("Using lichbd version {:?}", config.lichbd.version);

    match cli.command {
        Commands::Dialect { json } => dialect_command(&config, json),
        Commands::Render { operation, quote } => render_command(&config, &operation, quote),
        Commands::Run { operation, dry_run } => {
            let exit_code = run_command(&config, &operation, dry_run).await?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
        Commands::ParseStat { file, json } => {
            parse_stat_command(&config, file.as_deref(), json).await
        }
        Commands::Stat { dry_run, json } => stat_command(&config, dry_run, json).await,
    }
}
