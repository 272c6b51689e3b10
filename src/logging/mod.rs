// file: src/logging/mod.rs
// version: 1.1.0
// guid: i9j0k1l2-m3n4-5678-9012-345678ijklmn

//! Logging setup for the lichbd collaborators and CLI

pub mod logger;

pub use logger::{init_logger, with_operation_span};
