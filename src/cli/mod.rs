//! Command-line shell
//!
//! Stands in for the upload transport: each positional argument is one
//! uploaded file, and the flags map onto [`crate::core::IngestConfig`],
//! [`crate::strategy::ConcurrencyConfig`] and the log filter.

mod args;

pub use args::{CliArgs, OutputFormat, StrategyType};

use clap::Parser;

/// Parse the process arguments
///
/// Invalid arguments or `--help` make clap print to stderr and exit.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
