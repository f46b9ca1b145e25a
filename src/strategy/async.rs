//! Asynchronous processing strategy
//!
//! Ingests independent input files concurrently on a tokio multi-threaded
//! runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── ConcurrencyConfig (max_concurrent)
//!     ├── read_input_async (tokio::fs)
//!     └── spawn_blocking(ingest)  ← the synchronous pipeline, one task per file
//! ```
//!
//! Up to `max_concurrent` files are in flight at once. Runs share no state,
//! so no locking is involved; outcomes are still written in input order.

use crate::core::{ingest, IngestReport};
use crate::io::{read_input_async, OutcomeWriter};
use crate::strategy::{ProcessSummary, ProcessingStrategy, RunOptions};
use crate::types::IngestError;
use futures::stream::{self, StreamExt};
use std::io::Write;
use std::path::PathBuf;

/// Configuration for concurrent ingestion
#[derive(Clone, Debug)]
pub struct ConcurrencyConfig {
    /// Maximum number of files ingested at the same time
    pub max_concurrent: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent: num_cpus::get(),
        }
    }
}

impl ConcurrencyConfig {
    /// Create a new ConcurrencyConfig with a custom limit
    pub fn new(max_concurrent: usize) -> Self {
        let default = Self::default();

        let max_concurrent = if max_concurrent == 0 {
            log::warn!(
                "Invalid max_concurrent ({}), using default ({})",
                max_concurrent,
                default.max_concurrent
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self { max_concurrent }
    }
}

/// Asynchronous processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    options: RunOptions,
    config: ConcurrencyConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(options: RunOptions, config: ConcurrencyConfig) -> Self {
        Self { options, config }
    }
}

/// Read and ingest one file without blocking the runtime
async fn ingest_file(
    path: PathBuf,
    options: RunOptions,
) -> (PathBuf, Result<IngestReport, IngestError>) {
    let outcome = match read_input_async(&path).await {
        Ok(bytes) => tokio::task::spawn_blocking(move || ingest(&bytes, &options.ingest))
            .await
            .unwrap_or_else(|e| {
                Err(IngestError::IoError {
                    message: format!("Ingestion task failed: {}", e),
                })
            }),
        Err(e) => Err(e),
    };

    (path, outcome)
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Ingest every input file concurrently
    ///
    /// 1. Creates a tokio multi-threaded runtime sized by `max_concurrent`
    /// 2. Reads each file with `tokio::fs`
    /// 3. Runs the pipeline for each file on the blocking pool
    /// 4. Writes outcomes in input order as they complete
    fn process(
        &self,
        inputs: &[PathBuf],
        output: &mut dyn Write,
    ) -> Result<ProcessSummary, IngestError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .max_blocking_threads(self.config.max_concurrent)
            .build()
            .map_err(|e| IngestError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let mut summary = ProcessSummary::default();
            let mut writer = OutcomeWriter::new(self.options.format);

            let mut outcomes = stream::iter(inputs.iter().cloned())
                .map(|path| ingest_file(path, self.options))
                .buffered(self.config.max_concurrent);

            while let Some((path, outcome)) = outcomes.next().await {
                let source = path.display().to_string();
                if let Err(e) = &outcome {
                    log::warn!("{}: {}", source, e);
                }

                summary.record(&outcome);
                writer.write(&source, &outcome, output)?;
            }

            Ok::<_, IngestError>(summary)
        })
    }
}
