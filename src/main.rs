//! Transaction Ingest CLI
//!
//! Command-line interface for validating and summarizing transaction CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv > reports.jsonl
//! cargo run -- --page 1 --page-size 20 transactions.csv
//! cargo run -- --format csv --infer-categories transactions.csv > normalized.csv
//! cargo run -- --strategy async --max-concurrent 8 jan.csv feb.csv mar.csv
//! ```
//!
//! Every input file is ingested independently. In JSON mode one line is written
//! per file, holding either its report or its error. Diagnostics go to stderr
//! through `env_logger` (`-v` for info, `-vv` for debug, or `RUST_LOG`).
//!
//! # Processing Strategies
//!
//! - **sync**: Files are ingested one after another (default)
//! - **async**: Files are ingested concurrently on a tokio runtime
//!
//! # Exit Codes
//!
//! - 0: Every file produced a report
//! - 1: Error (invalid arguments, output failure, or at least one file failed)

use env_logger::Env;
use std::process;
use transaction_ingest::cli;
use transaction_ingest::strategy::{self, RunOptions};

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_filter())).init();

    let ingest = match args.to_ingest_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
    };

    // Create the appropriate processing strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_concurrency_config())
        } else {
            None
        };
        let options = RunOptions {
            ingest,
            format: args.format,
        };
        strategy::create_strategy(args.strategy.clone(), options, config)
    };

    // Output goes to stdout
    let mut output = std::io::stdout();
    match strategy.process(&args.input_files, &mut output) {
        Ok(summary) => {
            log::info!(
                "Processed {} file(s): {} succeeded, {} failed",
                summary.succeeded + summary.failed,
                summary.succeeded,
                summary.failed
            );
            if summary.failed > 0 {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
