//! Benchmark suite for comparing processing strategies
//!
//! This benchmark compares the synchronous and asynchronous processing
//! strategies using the divan benchmarking framework, plus the raw pipeline
//! on in-memory input.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Benchmark Inputs
//!
//! Inputs are generated into a temporary directory before each benchmark:
//! - 8 files of 100, 1,000 or 10,000 rows for the strategy benchmarks
//! - a single in-memory input for the pipeline benchmark
//!
//! Every generated input mixes valid rows, blank categories and rows that
//! fail validation.

use divan::Bencher;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use transaction_ingest::cli::StrategyType;
use transaction_ingest::strategy::{create_strategy, ConcurrencyConfig, RunOptions};
use transaction_ingest::{ingest, IngestConfig};

const FILES: usize = 8;
const CATEGORIES: [&str; 5] = ["Food", "Housing", "Leisure", "Income", ""];

fn main() {
    divan::main();
}

fn generate_csv(rows: usize) -> String {
    let mut csv = String::from("date,description,amount,category\n");

    for i in 0..rows {
        let day = i % 28 + 1;
        let month = i % 12 + 1;
        let written = match i % 20 {
            18 => writeln!(csv, "2024-13-{:02},Bad date {},1.00,Food", day, i),
            19 => writeln!(csv, "2024-{:02}-{:02},Bad amount {},n/a,Food", month, day, i),
            _ => writeln!(
                csv,
                "2024-{:02}-{:02},Purchase {},\"{},{:03}.{:02}\",{}",
                month,
                day,
                i,
                i % 9 + 1,
                i % 1000,
                i % 100,
                CATEGORIES[i % CATEGORIES.len()]
            ),
        };
        written.expect("Writing to a String cannot fail");
    }

    csv
}

fn generate_files(rows: usize) -> (TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let content = generate_csv(rows);

    let paths = (0..FILES)
        .map(|i| {
            let path = dir.path().join(format!("input_{}.csv", i));
            fs::write(&path, &content).expect("Failed to write input file");
            path
        })
        .collect();

    (dir, paths)
}

/// Benchmark synchronous processing strategy over several files
#[divan::bench(args = [100, 1_000, 10_000])]
fn sync_strategy(bencher: Bencher, rows: usize) {
    let (_dir, paths) = generate_files(rows);
    let strategy = create_strategy(StrategyType::Sync, RunOptions::default(), None);

    bencher.bench_local(|| {
        let mut output = Vec::new();
        strategy
            .process(&paths, &mut output)
            .expect("Processing failed");
        output
    });
}

/// Benchmark asynchronous processing strategy over several files
#[divan::bench(args = [100, 1_000, 10_000])]
fn async_strategy(bencher: Bencher, rows: usize) {
    let (_dir, paths) = generate_files(rows);
    let strategy = create_strategy(
        StrategyType::Async,
        RunOptions::default(),
        Some(ConcurrencyConfig::default()),
    );

    bencher.bench_local(|| {
        let mut output = Vec::new();
        strategy
            .process(&paths, &mut output)
            .expect("Processing failed");
        output
    });
}

/// Benchmark a single in-memory pipeline run
#[divan::bench(args = [1_000, 100_000])]
fn pipeline(bencher: Bencher, rows: usize) {
    let input = generate_csv(rows).into_bytes();
    let config = IngestConfig::default();

    bencher.bench_local(|| ingest(divan::black_box(&input), &config).expect("Ingestion failed"));
}
