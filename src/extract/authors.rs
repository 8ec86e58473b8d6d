//! Author name extraction.

use std::collections::HashSet;

use super::normalize::collapse_whitespace;
use crate::models::PaperRecord;

/// Author names from the structured list, falling back to the first line of
/// each free-text author block. Names are whitespace-normalized and
/// deduplicated; an empty result means no author is resolvable.
pub fn extract_author_names(paper: &PaperRecord) -> Vec<String> {
    let structured: Vec<String> = paper
        .structured_authors()
        .unwrap_or_default()
        .iter()
        .map(|a| collapse_whitespace(a.name()))
        .collect();

    let names = if structured.iter().any(|n| !n.is_empty()) {
        structured
    } else {
        paper
            .author_blocks()
            .unwrap_or_default()
            .iter()
            .filter_map(|block| block.lines().map(str::trim).find(|l| !l.is_empty()))
            .map(collapse_whitespace)
            .collect()
    };

    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.clone()))
        .collect()
}
