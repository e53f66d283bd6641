#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings; tempfile is only used by tests
#[cfg(test)]
use tempfile as _;

// Dependencies used only by the binary entry point
use anyhow as _;
use dotenvy as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap, init_tracing};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
