//! Synchronous processing strategy
//!
//! Ingests input files one after another on the calling thread. Each file is
//! read into memory, run through the pipeline, and its outcome written before
//! the next file is opened.

use crate::core::ingest;
use crate::io::{read_input, OutcomeWriter};
use crate::strategy::{ProcessSummary, ProcessingStrategy, RunOptions};
use crate::types::IngestError;
use std::io::Write;
use std::path::PathBuf;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use transaction_ingest::strategy::{ProcessingStrategy, RunOptions, SyncProcessingStrategy};
/// use std::io;
/// use std::path::PathBuf;
///
/// let strategy = SyncProcessingStrategy::new(RunOptions::default());
/// let mut output = io::stdout();
///
/// strategy.process(&[PathBuf::from("transactions.csv")], &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    options: RunOptions,
}

impl SyncProcessingStrategy {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        inputs: &[PathBuf],
        output: &mut dyn Write,
    ) -> Result<ProcessSummary, IngestError> {
        let mut summary = ProcessSummary::default();
        let mut writer = OutcomeWriter::new(self.options.format);

        for path in inputs {
            let source = path.display().to_string();
            log::info!("Ingesting {}", source);

            let outcome = read_input(path).and_then(|bytes| ingest(&bytes, &self.options.ingest));
            if let Err(e) = &outcome {
                log::warn!("{}: {}", source, e);
            }

            summary.record(&outcome);
            writer.write(&source, &outcome, output)?;
        }

        Ok(summary)
    }
}
