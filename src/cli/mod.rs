//! Command-line interface for barcode-albums.
//!
//! This module provides CLI commands for resolving barcodes and inspecting
//! the local album cache.

mod commands;

pub use commands::{Cli, Commands, run_command};
