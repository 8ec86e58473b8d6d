//! Institution extraction strategies.
//!
//! Each strategy reads one kind of affiliation signal from a record and
//! returns `None` when that signal is absent or yields nothing usable. The
//! [`ChainExtractor`](super::ChainExtractor) tries them in priority order.

use std::fmt::Debug;

use super::normalize::{is_sub_unit, InstitutionNormalizer};
use crate::models::PaperRecord;

bitflags::bitflags! {
    /// Institution strategies enabled in a chain
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Strategies: u32 {
        const POSITIONAL = 1 << 0;
        const FREE_TEXT = 1 << 1;
        const MATCHED_STRINGS = 1 << 2;
        const VENUE = 1 << 3;
    }
}

impl Default for Strategies {
    fn default() -> Self {
        Self::all()
    }
}

/// One way of deriving institution names from a paper record
pub trait InstitutionStrategy: Debug + Send + Sync {
    /// Short identifier used in logs
    fn id(&self) -> &str;

    /// Institution names in discovery order, or `None` if this signal is
    /// unavailable for the record
    fn institutions(
        &self,
        paper: &PaperRecord,
        normalizer: &InstitutionNormalizer,
    ) -> Option<Vec<String>>;
}

fn non_empty(names: Vec<String>) -> Option<Vec<String>> {
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Non-empty author list lengths the record declares: structured, then blocks
fn declared_author_counts(paper: &PaperRecord) -> Vec<usize> {
    [
        paper.structured_authors().map(|a| a.len()),
        paper.author_blocks().map(|b| b.len()),
    ]
    .into_iter()
    .flatten()
    .filter(|&n| n > 0)
    .collect()
}

/// Per-author affiliation strings aligned with the author list
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalAffiliations;

impl InstitutionStrategy for PositionalAffiliations {
    fn id(&self) -> &str {
        "positional"
    }

    fn institutions(
        &self,
        paper: &PaperRecord,
        normalizer: &InstitutionNormalizer,
    ) -> Option<Vec<String>> {
        let affiliations = paper.positional_affiliations()?;
        let aligned = declared_author_counts(paper)
            .into_iter()
            .any(|authors| affiliations.len() >= authors);
        if !aligned {
            return None;
        }

        non_empty(
            affiliations
                .iter()
                .filter_map(|a| normalizer.institution(a))
                .collect(),
        )
    }
}

/// Free-text author blocks: name on the first line, affiliation below
#[derive(Debug, Default, Clone, Copy)]
pub struct FreeTextBlocks;

impl InstitutionStrategy for FreeTextBlocks {
    fn id(&self) -> &str {
        "free_text"
    }

    fn institutions(
        &self,
        paper: &PaperRecord,
        normalizer: &InstitutionNormalizer,
    ) -> Option<Vec<String>> {
        let blocks = paper.author_blocks()?;

        non_empty(
            blocks
                .iter()
                .filter_map(|block| {
                    let lines: Vec<&str> = block
                        .lines()
                        .map(str::trim)
                        .filter(|l| !l.is_empty())
                        .collect();
                    if lines.len() < 2 {
                        return None;
                    }
                    normalizer.best_fragment(&lines[1..].join("\n"))
                })
                .collect(),
        )
    }
}

/// Pre-extracted `matched_strings`
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchedStrings;

impl InstitutionStrategy for MatchedStrings {
    fn id(&self) -> &str {
        "matched_strings"
    }

    fn institutions(
        &self,
        paper: &PaperRecord,
        normalizer: &InstitutionNormalizer,
    ) -> Option<Vec<String>> {
        non_empty(
            paper
                .matched_strings()?
                .iter()
                .filter_map(|m| normalizer.institution(m))
                .collect(),
        )
    }
}

/// Venue or journal name standing in for an institution
#[derive(Debug, Default, Clone, Copy)]
pub struct VenueFallback;

impl InstitutionStrategy for VenueFallback {
    fn id(&self) -> &str {
        "venue"
    }

    fn institutions(
        &self,
        paper: &PaperRecord,
        normalizer: &InstitutionNormalizer,
    ) -> Option<Vec<String>> {
        normalizer
            .normalize(paper.venue()?)
            .filter(|name| !is_sub_unit(name))
            .map(|name| vec![name])
    }
}
