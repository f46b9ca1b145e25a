//! Report output formats
//!
//! This module centralizes all output format concerns:
//! - JSON lines: one object per input file, holding either the full report
//!   envelope or the run-level error
//! - CSV: the normalized transactions of every successful run, as one
//!   stream with a single header
//!
//! Writers take the run outcome as-is and never recompute statistics, so the
//! printed `stats` always come from the same run as the printed transactions.

use crate::cli::OutputFormat;
use crate::core::IngestReport;
use crate::types::{IngestError, Transaction};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct OutcomeLine<'a> {
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a IngestReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

/// Write one run outcome as a single JSON line
///
/// Success: `{"source": ..., "report": {...}}`
/// Failure: `{"source": ..., "error": {"code": ..., "message": ...}}`
pub fn write_outcome_json(
    source: &str,
    outcome: &Result<IngestReport, IngestError>,
    output: &mut dyn Write,
) -> Result<(), IngestError> {
    let line = match outcome {
        Ok(report) => OutcomeLine {
            source,
            report: Some(report),
            error: None,
        },
        Err(error) => OutcomeLine {
            source,
            report: None,
            error: Some(ErrorBody {
                code: error.code(),
                message: error.to_string(),
            }),
        },
    };

    serde_json::to_writer(&mut *output, &line).map_err(IngestError::output)?;
    writeln!(output).map_err(IngestError::output)?;

    Ok(())
}

/// Write transactions in normalized CSV form
///
/// Columns: date, description, amount, category. Dates are `YYYY-MM-DD` and
/// amounts keep the scale they were written with.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), IngestError> {
    write_csv_rows(transactions, true, output)
}

fn write_csv_rows(
    transactions: &[Transaction],
    with_header: bool,
    output: &mut dyn Write,
) -> Result<(), IngestError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    if with_header {
        writer
            .write_record(["date", "description", "amount", "category"])
            .map_err(IngestError::output)?;
    }

    for transaction in transactions {
        writer
            .write_record(&[
                transaction.date.format("%Y-%m-%d").to_string(),
                transaction.description.clone(),
                transaction.amount.to_string(),
                transaction.category.clone(),
            ])
            .map_err(IngestError::output)?;
    }

    writer.flush().map_err(IngestError::output)?;

    Ok(())
}

/// Writes the outcomes of one process run in the selected format
///
/// In CSV mode the outcomes of every file form a single CSV stream: the
/// header is written once, before the first rows. A failed run writes
/// nothing; the failure is logged instead. When the report carries a page,
/// only the page items are written as CSV.
#[derive(Debug, Clone, Copy)]
pub struct OutcomeWriter {
    format: OutputFormat,
    csv_header_written: bool,
}

impl OutcomeWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            csv_header_written: false,
        }
    }

    /// Write one run outcome
    pub fn write(
        &mut self,
        source: &str,
        outcome: &Result<IngestReport, IngestError>,
        output: &mut dyn Write,
    ) -> Result<(), IngestError> {
        match (self.format, outcome) {
            (OutputFormat::Json, _) => write_outcome_json(source, outcome, output),
            (OutputFormat::Csv, Ok(report)) => {
                let transactions = match report.page() {
                    Some(page) => page.items(),
                    None => report.transactions(),
                };
                write_csv_rows(transactions, !self.csv_header_written, output)?;
                self.csv_header_written = true;
                Ok(())
            }
            (OutputFormat::Csv, Err(error)) => {
                log::error!("{}: {}", source, error);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ingest, IngestConfig, PageRequest};
    use rstest::rstest;

    const INPUT: &[u8] = b"date,description,amount,category\n\
                           2024-01-05,Coffee,4.50,Food\n\
                           2024-01-06,Broken,abc,Food\n\
                           2024-01-01,Rent,\"1,200.00\",Housing\n";

    fn report(page: Option<PageRequest>) -> Result<IngestReport, IngestError> {
        ingest(
            INPUT,
            &IngestConfig {
                page,
                ..IngestConfig::default()
            },
        )
    }

    #[test]
    fn test_write_outcome_json_success() {
        let mut output = Vec::new();
        write_outcome_json("input.csv", &report(None), &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            concat!(
                r#"{"source":"input.csv","report":{"#,
                r#""transactions":["#,
                r#"{"row_index":0,"date":"2024-01-05","description":"Coffee","amount":"4.50","category":"Food"},"#,
                r#"{"row_index":2,"date":"2024-01-01","description":"Rent","amount":"1200.00","category":"Housing"}],"#,
                r#""rejections":[{"row_index":1,"reason":"invalid_amount"}],"#,
                r#""stats":{"total_rows":2,"total_amount":"1204.50","category_totals":{"Food":"4.50","Housing":"1200.00"}}}}"#,
                "\n"
            )
        );
    }

    #[test]
    fn test_write_outcome_json_includes_page() {
        let mut output = Vec::new();
        let outcome = report(Some(PageRequest {
            page_number: 2,
            page_size: 1,
        }));
        write_outcome_json("input.csv", &outcome, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["report"]["page"]["page_number"], 2);
        assert_eq!(value["report"]["page"]["page_count"], 2);
        assert_eq!(value["report"]["page"]["items"][0]["description"], "Rent");
    }

    #[rstest]
    #[case::empty_input(Err(IngestError::EmptyInput), "empty_input")]
    #[case::missing_file(
        Err(IngestError::FileNotFound { path: "gone.csv".to_string() }),
        "file_not_found"
    )]
    fn test_write_outcome_json_error(
        #[case] outcome: Result<IngestReport, IngestError>,
        #[case] code: &str,
    ) {
        let mut output = Vec::new();
        write_outcome_json("input.csv", &outcome, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["source"], "input.csv");
        assert_eq!(value["error"]["code"], code);
        assert_eq!(
            value["error"]["message"],
            outcome.as_ref().unwrap_err().to_string()
        );
        assert!(value.get("report").is_none());
    }

    #[test]
    fn test_write_transactions_csv() {
        let report = report(None).unwrap();
        let mut output = Vec::new();
        write_transactions_csv(report.transactions(), &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "date,description,amount,category\n\
             2024-01-05,Coffee,4.50,Food\n\
             2024-01-01,Rent,1200.00,Housing\n"
        );
    }

    #[test]
    fn test_write_transactions_csv_quotes_fields() {
        let report = ingest(
            b"date,description,amount\n2024-01-05,\"Coffee, large\",4.50\n",
            &IngestConfig::default(),
        )
        .unwrap();
        let mut output = Vec::new();
        write_transactions_csv(report.transactions(), &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("\"Coffee, large\""));
    }

    #[test]
    fn test_write_outcome_csv_uses_page_items() {
        let outcome = report(Some(PageRequest {
            page_number: 1,
            page_size: 1,
        }));
        let mut output = Vec::new();
        OutcomeWriter::new(OutputFormat::Csv)
            .write("input.csv", &outcome, &mut output)
            .unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "date,description,amount,category\n2024-01-05,Coffee,4.50,Food\n"
        );
    }

    #[test]
    fn test_write_outcome_csv_error_writes_nothing() {
        let mut output = Vec::new();
        OutcomeWriter::new(OutputFormat::Csv)
            .write("input.csv", &Err(IngestError::EmptyInput), &mut output)
            .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_outcome_writer_csv_writes_header_once() {
        let mut writer = OutcomeWriter::new(OutputFormat::Csv);
        let mut output = Vec::new();

        writer
            .write("missing.csv", &Err(IngestError::EmptyInput), &mut output)
            .unwrap();
        writer.write("a.csv", &report(None), &mut output).unwrap();
        writer.write("b.csv", &report(None), &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "date,description,amount,category
             2024-01-05,Coffee,4.50,Food
             2024-01-01,Rent,1200.00,Housing
             2024-01-05,Coffee,4.50,Food
             2024-01-01,Rent,1200.00,Housing
"
        );
    }

    #[test]
    fn test_outcome_writer_json_writes_one_line_per_outcome() {
        let mut writer = OutcomeWriter::new(OutputFormat::Json);
        let mut output = Vec::new();

        writer.write("a.csv", &report(None), &mut output).unwrap();
        writer
            .write("b.csv", &Err(IngestError::EmptyInput), &mut output)
            .unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str.lines().count(), 2);
    }
}
