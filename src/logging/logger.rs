// file: src/logging/logger.rs
// version: 2.0.0
// guid: j0k1l2m3-n4o5-6789-0123-456789jklmno

//! Logger initialization and operation spans

use crate::error::LichbdError;
use crate::Result;
use tracing::Instrument;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the filter directive: `--quiet` beats `--verbose`, which beats the
/// configured level
pub fn filter_directive(verbose: bool, quiet: bool, level: &str) -> String {
    if quiet {
        "error".to_string()
    } else if verbose {
        "debug".to_string()
    } else {
        level.to_string()
    }
}

/// Initialize the logging system. Output goes to stderr so command output on
/// stdout stays machine-readable.
pub fn init_logger(verbose: bool, quiet: bool, level: &str) -> Result<()> {
    let directive = filter_directive(verbose, quiet, level);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| LichbdError::config(format!("Invalid log level '{}': {}", directive, e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| LichbdError::config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Run a future inside an `operation` span
pub async fn with_operation_span<F, Fut, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = R>,
{
    let span = tracing::info_span!("operation", name = operation);
    async move { f().await }.instrument(span).await
}
