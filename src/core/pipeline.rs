//! Ingestion pipeline
//!
//! This module wires the components of one ingestion run together:
//!
//! ```text
//! bytes → RowParser → FieldNormalizer (per row) → { transactions, rejections }
//!                                                        ↓
//!                                   ResultAssembler (aggregate, sort, paginate)
//!                                                        ↓
//!                                                   IngestReport
//! ```
//!
//! A run is a pure, synchronous function of its input bytes and
//! configuration. It keeps no state between calls, so independent runs can
//! execute in parallel without coordination.

use crate::core::assembler::{IngestReport, PageRequest, ResultAssembler};
use crate::core::normalizer::FieldNormalizer;
use crate::io::row_parser::RowParser;
use crate::types::{IngestError, RowOutcome};

/// Configuration for one ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestConfig {
    /// Field delimiter of the input
    pub delimiter: u8,
    /// Infer blank categories from description keywords
    pub infer_categories: bool,
    /// Page to include in the report
    pub page: Option<PageRequest>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_categories: false,
            page: None,
        }
    }
}

impl IngestConfig {
    fn normalizer(&self) -> FieldNormalizer {
        if self.infer_categories {
            FieldNormalizer::with_keyword_categories()
        } else {
            FieldNormalizer::default()
        }
    }
}

/// Run the full pipeline over one input
///
/// # Arguments
///
/// * `input` - Raw uploaded bytes (UTF-8 delimited text with a header line)
/// * `config` - Delimiter, category policy and optional page request
///
/// # Returns
///
/// * `Ok(IngestReport)` - The run succeeded, possibly with every row rejected
/// * `Err(IngestError)` - The run failed as a whole; no report is produced
///
/// # Errors
///
/// - `MalformedInput` if there is no header, the bytes are not text, or the
///   header lacks a required column
/// - `EmptyInput` if the header is followed by no data rows
/// - `InvalidPage` if page 0 was requested
/// - `ArithmeticOverflow` if the totals cannot be represented
///
/// # Examples
///
/// ```
/// use transaction_ingest::{ingest, IngestConfig};
///
/// let input = b"date,description,amount,category\n\
///               2024-01-05,Coffee,4.50,Food\n\
///               2024-01-01,Rent,1200.00,Housing";
/// let report = ingest(input, &IngestConfig::default()).unwrap();
///
/// assert_eq!(report.stats().total_count(), 2);
/// assert_eq!(report.stats().total_amount().to_string(), "1204.50");
/// assert_eq!(report.transactions()[0].description, "Coffee");
/// ```
pub fn ingest(input: &[u8], config: &IngestConfig) -> Result<IngestReport, IngestError> {
    if let Some(request) = config.page {
        if request.page_number < 1 {
            return Err(IngestError::InvalidPage {
                page: request.page_number,
            });
        }
    }

    let parser = RowParser::new(input, config.delimiter)?;

    let missing = parser.missing_required_columns();
    if !missing.is_empty() {
        return Err(IngestError::missing_columns(&missing));
    }

    let normalizer = config.normalizer();
    let mut transactions = Vec::new();
    let mut rejections = Vec::new();
    let mut row_count = 0usize;

    for row in parser.rows() {
        let row = row?;
        row_count += 1;

        match normalizer.normalize(&row) {
            RowOutcome::Accepted(transaction) => transactions.push(transaction),
            RowOutcome::Rejected(rejection) => rejections.push(rejection),
        }
    }

    if row_count == 0 {
        return Err(IngestError::EmptyInput);
    }

    log::info!(
        "Ingested {} rows: {} accepted, {} rejected",
        row_count,
        transactions.len(),
        rejections.len()
    );

    ResultAssembler::assemble(transactions, rejections, config.page)
}
