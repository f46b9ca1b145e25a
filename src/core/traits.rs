//! Core traits for the ingestion pipeline
//!
//! This module defines the trait abstractions that let the field normalizer
//! swap its category recovery policy without touching the validation rules.

/// Policy for rows whose category field is absent or blank
///
/// Category is advisory metadata, so a missing one is recovered rather than
/// rejected. Implementations must be pure: the same description always yields
/// the same category.
pub trait Categorizer: Send + Sync {
    /// Choose a category for a row, given its (already trimmed, non-empty) description
    fn fallback_category(&self, description: &str) -> String;
}
