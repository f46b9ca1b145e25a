use crate::core::{IngestConfig, PageRequest, DEFAULT_PAGE_SIZE};
use crate::strategy::ConcurrencyConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Validate and summarize transaction CSV files
#[derive(Parser, Debug)]
#[command(name = "transaction-ingest")]
#[command(about = "Validate transaction CSV files and summarize them by category", long_about = None)]
pub struct CliArgs {
    /// Input CSV files, each ingested independently
    #[arg(value_name = "INPUT", required = true, help = "Path(s) to input CSV files")]
    pub input_files: Vec<PathBuf>,

    /// Processing strategy to use across input files
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for one file at a time or 'async' for concurrent files"
    )]
    pub strategy: StrategyType,

    /// Output format
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "json",
        help = "Output format: 'json' (one report per line) or 'csv' (normalized transactions)"
    )]
    pub format: OutputFormat,

    /// Page of sorted transactions to include in the report
    #[arg(
        long = "page",
        value_name = "PAGE",
        help = "1-based page number to include in the report"
    )]
    pub page: Option<usize>,

    /// Transactions per page
    #[arg(
        long = "page-size",
        value_name = "SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        help = "Number of transactions per page (default: 10)"
    )]
    pub page_size: usize,

    /// Field delimiter
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value_t = ',',
        help = "Single-byte field delimiter (default: ',')"
    )]
    pub delimiter: char,

    /// Infer blank categories from description keywords
    #[arg(long = "infer-categories", help = "Infer blank categories from description keywords")]
    pub infer_categories: bool,

    /// Maximum number of files ingested concurrently (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of files ingested concurrently (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl CliArgs {
    /// Create an IngestConfig from CLI arguments
    ///
    /// # Errors
    ///
    /// Returns a message if the delimiter is not a single-byte character.
    pub fn to_ingest_config(&self) -> Result<IngestConfig, String> {
        if !self.delimiter.is_ascii() {
            return Err(format!(
                "Delimiter '{}' must be a single-byte (ASCII) character",
                self.delimiter
            ));
        }

        Ok(IngestConfig {
            delimiter: self.delimiter as u8,
            infer_categories: self.infer_categories,
            page: self.page.map(|page_number| PageRequest {
                page_number,
                page_size: self.page_size,
            }),
        })
    }

    /// Create a ConcurrencyConfig from CLI arguments
    ///
    /// Falls back to defaults when no value is provided.
    pub fn to_concurrency_config(&self) -> ConcurrencyConfig {
        match self.max_concurrent {
            Some(max_concurrent) => ConcurrencyConfig::new(max_concurrent),
            None => ConcurrencyConfig::default(),
        }
    }

    /// Default log filter for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
