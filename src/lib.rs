// file: src/lib.rs
// version: 3.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # lichbd-dialect
//!
//! Builds command lines for the `lichbd` block-storage CLI and parses its
//! capacity output. Three generations of the tool spell the same pool,
//! volume and snapshot operations differently; the [`dialect`] module picks
//! the right spelling from a numeric tool version.
//!
//! ```
//! use lichbd_dialect::dialect::{build_command, resolve_dialect, Operation, OperationParams};
//!
//! let dialect = resolve_dialect(403);
//! let params = OperationParams::new().path("p1");
//! let cmd = build_command(dialect, Operation::PoolCreate, &params).unwrap();
//! assert_eq!(cmd, "lichbd dir create /default/nbd/p1 2>/dev/null");
//! ```
//!
//! Execution, retry, configuration and logging live in [`executor`],
//! [`client`], [`config`] and [`logging`]; the dialect core itself is pure.

pub mod cli;
pub mod client;
pub mod config;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod logging;

pub use client::LichbdClient;
pub use dialect::{resolve_dialect, Dialect, DialectTag};
pub use error::{LichbdError, Result};

/// Version information for the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
