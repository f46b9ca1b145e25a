//! Error types for the transaction ingestion pipeline
//!
//! This module defines the run-level (fatal) errors of an ingestion run.
//! Row-level problems are not errors: they are collected as
//! [`Rejection`](crate::types::Rejection)s and never abort a run.
//!
//! # Error Categories
//!
//! - **Input Errors**: no header, undecodable bytes, missing required columns, no data rows
//! - **Request Errors**: page numbers below 1
//! - **Arithmetic Errors**: decimal overflow while aggregating
//! - **File I/O Errors**: file not found, read/write failures in the CLI shell

use thiserror::Error;

/// Main error type for an ingestion run
///
/// Every variant is fatal to the run that produced it: no partial report is
/// returned alongside it. Use [`IngestError::code`] when a stable,
/// machine-readable reason is needed (e.g. to map onto a protocol status).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading input
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The input has no header row or cannot be read as delimited text
    #[error("Malformed input ({reason}){}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedInput {
        /// Short reason code (`no_header`, `not_utf8`, `missing_columns`, `unparseable`)
        reason: String,
        /// Line number where parsing failed (if available)
        line: Option<u64>,
    },

    /// The header is present but there are zero data rows
    #[error("Input contains a header but no data rows")]
    EmptyInput,

    /// A page number below 1 was requested
    #[error("Invalid page number {page}: pages are numbered from 1")]
    InvalidPage {
        /// The requested page number
        page: usize,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// The report could not be written to the output
    #[error("Output error: {message}")]
    OutputError {
        /// Description of the write failure
        message: String,
    },
}

impl IngestError {
    /// Stable reason code for this error
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::FileNotFound { .. } => "file_not_found",
            IngestError::IoError { .. } => "io_error",
            IngestError::MalformedInput { .. } => "malformed_input",
            IngestError::EmptyInput => "empty_input",
            IngestError::InvalidPage { .. } => "invalid_page",
            IngestError::ArithmeticOverflow { .. } => "arithmetic_overflow",
            IngestError::OutputError { .. } => "output_error",
        }
    }

    /// Create a MalformedInput error without line information
    pub fn malformed(reason: &str) -> Self {
        IngestError::MalformedInput {
            reason: reason.to_string(),
            line: None,
        }
    }

    /// Create a MalformedInput error for columns absent from the header
    pub fn missing_columns(columns: &[&str]) -> Self {
        IngestError::MalformedInput {
            reason: format!("missing_columns: {}", columns.join(", ")),
            line: None,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        IngestError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create an OutputError
    pub fn output(message: impl std::fmt::Display) -> Self {
        IngestError::OutputError {
            message: message.to_string(),
        }
    }
}

// Conversion from io::Error to IngestError
impl From<std::io::Error> for IngestError {
    fn from(error: std::io::Error) -> Self {
        IngestError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to IngestError
impl From<csv::Error> for IngestError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        let reason = match error.kind() {
            csv::ErrorKind::Utf8 { .. } => "not_utf8",
            _ => "unparseable",
        };

        IngestError::MalformedInput {
            reason: reason.to_string(),
            line,
        }
    }
}
