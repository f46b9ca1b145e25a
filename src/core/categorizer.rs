//! Category recovery policies
//!
//! - [`DefaultCategorizer`] always answers [`DEFAULT_CATEGORY`]
//! - [`KeywordCategorizer`] looks for keywords in the description first and
//!   falls back to [`DEFAULT_CATEGORY`] when none match

use crate::core::traits::Categorizer;
use crate::types::DEFAULT_CATEGORY;

/// Assigns the sentinel category to every uncategorized row
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCategorizer;

impl Categorizer for DefaultCategorizer {
    fn fallback_category(&self, _description: &str) -> String {
        DEFAULT_CATEGORY.to_string()
    }
}

/// Keyword rule: a category and the lowercase keywords that select it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// Infers a category from keywords in the description
///
/// Rules are tried in order and the first rule with a keyword contained in
/// the lowercased description wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCategorizer {
    rules: Vec<KeywordRule>,
}

impl KeywordCategorizer {
    /// Create a categorizer from custom rules
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// Configured rules, in match order
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordCategorizer {
    /// The built-in spending categories
    fn default() -> Self {
        Self::new(vec![
            KeywordRule::new("Transportation", &["bus", "train", "taxi"]),
            KeywordRule::new("Healthcare", &["doctor", "pharmacy", "hospital"]),
        ])
    }
}

impl Categorizer for KeywordCategorizer {
    fn fallback_category(&self, description: &str) -> String {
        let description = description.to_lowercase();

        self.rules
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|keyword| description.contains(keyword.as_str()))
            })
            .map(|rule| rule.category.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
    }
}
