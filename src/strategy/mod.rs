//! Processing strategy module
//!
//! This module defines the Strategy pattern for running the ingestion pipeline
//! over a set of input files. Every file is an independent ingestion request:
//! strategies only differ in how those requests are scheduled, never in what
//! a single run produces.

use crate::cli::{OutputFormat, StrategyType};
use crate::core::IngestConfig;
use crate::types::IngestError;
use std::io::Write;
use std::path::PathBuf;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, ConcurrencyConfig};
pub use sync::SyncProcessingStrategy;

/// Options shared by every strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Pipeline configuration applied to every file
    pub ingest: IngestConfig,
    /// How each outcome is written
    pub format: OutputFormat,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ingest: IngestConfig::default(),
            format: OutputFormat::Json,
        }
    }
}

/// Counts of per-file outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Files that produced a report
    pub succeeded: usize,
    /// Files whose run failed as a whole
    pub failed: usize,
}

impl ProcessSummary {
    pub(crate) fn record<T>(&mut self, outcome: &Result<T, IngestError>) {
        match outcome {
            Ok(_) => self.succeeded += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Processing strategy trait for ingesting a set of files
pub trait ProcessingStrategy: Send + Sync {
    /// Ingest every input file and write one outcome per file, in input order
    ///
    /// # Arguments
    ///
    /// * `inputs` - Paths of the files to ingest
    /// * `output` - Mutable reference to a writer for the outcomes
    ///
    /// # Returns
    ///
    /// * `Ok(ProcessSummary)` once every file has been handled, including
    ///   files whose run failed (those are written as error outcomes)
    /// * `Err(IngestError)` if the strategy itself could not run or the
    ///   output could not be written
    fn process(
        &self,
        inputs: &[PathBuf],
        output: &mut dyn Write,
    ) -> Result<ProcessSummary, IngestError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `options` - Pipeline and output options shared by every file
/// * `config` - Optional concurrency configuration (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    options: RunOptions,
    config: Option<ConcurrencyConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(options)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(options, config))
        }
    }
}
