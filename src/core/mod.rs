//! Core business logic module
//!
//! This module contains the ingestion pipeline components:
//! - `traits` - Trait abstractions (category recovery policy)
//! - `categorizer` - Category recovery implementations
//! - `normalizer` - Row validation into transactions or rejections
//! - `aggregator` - Single-pass summary statistics
//! - `paginator` - Date ordering and page slicing
//! - `assembler` - Report envelope construction
//! - `pipeline` - End-to-end orchestration of one run

pub mod aggregator;
pub mod assembler;
pub mod categorizer;
pub mod normalizer;
pub mod paginator;
pub mod pipeline;
pub mod traits;

pub use aggregator::{aggregate, Aggregator};
pub use assembler::{IngestReport, PageRequest, ResultAssembler};
pub use categorizer::{DefaultCategorizer, KeywordCategorizer, KeywordRule};
pub use normalizer::FieldNormalizer;
pub use paginator::{sort_by_date_desc, Paginator, DEFAULT_PAGE_SIZE};
pub use pipeline::{ingest, IngestConfig};
pub use traits::Categorizer;
