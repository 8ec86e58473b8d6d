//! Affiliation, field and author extraction from heterogeneous paper records.
//!
//! The [`Extractor`] trait maps one [`PaperRecord`] to an [`Extraction`].
//! [`ChainExtractor`] is the standard implementation: institution names come
//! from the first [`InstitutionStrategy`] in its chain that yields anything.
//!
//! ```rust
//! use research_rank::extract::{ChainExtractor, Extractor};
//! use research_rank::models::PaperRecordBuilder;
//!
//! let paper = PaperRecordBuilder::new("1")
//!     .authors(["A. Author"])
//!     .affiliations(["Alpha University"])
//!     .fields(["Biology"])
//!     .build();
//!
//! let extraction = ChainExtractor::default().extract(&paper);
//! assert_eq!(extraction.institutions, vec!["Alpha University"]);
//! assert_eq!(extraction.fields, vec!["Biology"]);
//! ```

mod authors;
mod fields;
mod institutions;
pub mod normalize;

pub use authors::extract_author_names;
pub use fields::extract_fields;
pub use institutions::{
    FreeTextBlocks, InstitutionStrategy, MatchedStrings, PositionalAffiliations, Strategies,
    VenueFallback,
};
pub use normalize::InstitutionNormalizer;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ExtractionConfig;
use crate::models::PaperRecord;

/// Name credited when no author can be resolved
pub const DEFAULT_PLACEHOLDER_AUTHOR: &str = "(unknown author)";

/// Canonical view of one paper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Normalized institution names in discovery order (may repeat)
    pub institutions: Vec<String>,

    /// Normalized, deduplicated field labels; empty means field-unknown
    pub fields: Vec<String>,

    /// Deduplicated author names
    pub authors: Vec<String>,
}

impl Extraction {
    pub fn is_field_unknown(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Maps paper records to institutions, fields and authors
pub trait Extractor: Send + Sync {
    /// Extract from one record. Never fails; missing data yields empty lists.
    fn extract(&self, paper: &PaperRecord) -> Extraction;

    /// Author name used when a paper names no resolvable authors
    fn placeholder_author(&self) -> &str {
        DEFAULT_PLACEHOLDER_AUTHOR
    }
}

/// Extractor running an ordered chain of institution strategies
#[derive(Debug, Clone)]
pub struct ChainExtractor {
    normalizer: InstitutionNormalizer,
    strategies: Vec<Arc<dyn InstitutionStrategy>>,
    placeholder_author: String,
}

impl Default for ChainExtractor {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl ChainExtractor {
    /// Create an extractor with the standard chain, honouring the config's
    /// venue fallback switch
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let mut enabled = Strategies::all();
        if !config.venue_fallback {
            enabled.remove(Strategies::VENUE);
        }
        Self::with_strategies(config, enabled)
    }

    /// Create an extractor with an explicit set of standard strategies
    pub fn with_strategies(config: &ExtractionConfig, enabled: Strategies) -> Self {
        let mut extractor = Self {
            normalizer: InstitutionNormalizer::from_config(config),
            strategies: Vec::new(),
            placeholder_author: config.placeholder_author.clone(),
        };

        if enabled.contains(Strategies::POSITIONAL) {
            extractor.register(Arc::new(PositionalAffiliations));
        }
        if enabled.contains(Strategies::FREE_TEXT) {
            extractor.register(Arc::new(FreeTextBlocks));
        }
        if enabled.contains(Strategies::MATCHED_STRINGS) {
            extractor.register(Arc::new(MatchedStrings));
        }
        if enabled.contains(Strategies::VENUE) {
            extractor.register(Arc::new(VenueFallback));
        }

        extractor
    }

    /// Append a strategy to the end of the chain
    pub fn register(&mut self, strategy: Arc<dyn InstitutionStrategy>) {
        self.strategies.push(strategy);
    }

    /// Strategy identifiers in chain order
    pub fn strategy_ids(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.id()).collect()
    }

    /// Institution names from the first strategy that yields any
    pub fn institutions(&self, paper: &PaperRecord) -> Vec<String> {
        self.strategies
            .iter()
            .find_map(|strategy| {
                let found = strategy.institutions(paper, &self.normalizer)?;
                tracing::trace!(
                    "Strategy {} found {} institutions for paper {}",
                    strategy.id(),
                    found.len(),
                    paper.id().unwrap_or_default()
                );
                Some(found)
            })
            .unwrap_or_default()
    }
}

impl Extractor for ChainExtractor {
    fn extract(&self, paper: &PaperRecord) -> Extraction {
        if paper.is_empty() {
            return Extraction::default();
        }

        let mut authors = extract_author_names(paper);
        if authors.is_empty() {
            authors.push(self.placeholder_author.clone());
        }

        Extraction {
            institutions: self.institutions(paper),
            fields: extract_fields(paper),
            authors,
        }
    }

    fn placeholder_author(&self) -> &str {
        &self.placeholder_author
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaperRecordBuilder;
    use serde_json::json;

    #[test]
    fn test_chain_order() {
        let extractor = ChainExtractor::default();
        assert_eq!(
            extractor.strategy_ids(),
            vec!["positional", "free_text", "matched_strings", "venue"]
        );

        let config = ExtractionConfig {
            venue_fallback: false,
            ..Default::default()
        };
        assert!(!ChainExtractor::from_config(&config)
            .strategy_ids()
            .contains(&"venue"));
    }

    #[test]
    fn test_first_non_empty_strategy_wins() {
        let paper = PaperRecordBuilder::new("1")
            .authors(["A"])
            .affiliations(["Department of Physics"])
            .matched_strings(["Beta Institute"])
            .journal("Some Journal")
            .build();
        let extraction = ChainExtractor::default().extract(&paper);
        assert_eq!(extraction.institutions, vec!["Beta Institute"]);
    }

    #[test]
    fn test_venue_fallback_can_be_disabled() {
        let paper = PaperRecordBuilder::new("1").journal("Some Journal").build();
        assert_eq!(
            ChainExtractor::default().extract(&paper).institutions,
            vec!["Some Journal"]
        );

        let strict = ChainExtractor::with_strategies(
            &ExtractionConfig::default(),
            Strategies::all() - Strategies::VENUE,
        );
        assert!(strict.extract(&paper).institutions.is_empty());
    }

    #[test]
    fn test_placeholder_author() {
        let paper = PaperRecordBuilder::new("1")
            .matched_strings(["Alpha University"])
            .build();
        let extraction = ChainExtractor::default().extract(&paper);
        assert_eq!(extraction.authors, vec![DEFAULT_PLACEHOLDER_AUTHOR]);
    }

    #[test]
    fn test_malformed_record_is_empty() {
        let extractor = ChainExtractor::default();
        let extraction = extractor.extract(&PaperRecord::from_value(json!("garbage")));
        assert_eq!(extraction, Extraction::default());
        assert!(extraction.is_field_unknown());
    }
}
