//! Field-of-study extraction.

use std::collections::HashSet;

use super::normalize::collapse_whitespace;
use crate::models::PaperRecord;

/// Normalized, deduplicated field labels in discovery order.
pub fn extract_fields(paper: &PaperRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    paper
        .field_entries()
        .iter()
        .map(|entry| collapse_whitespace(entry.label()))
        .filter(|label| !label.is_empty())
        .filter(|label| seen.insert(label.clone()))
        .collect()
}
