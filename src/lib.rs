//! # Research Rank
//!
//! Ranks research institutions by fractional contribution over a pre-built
//! dataset of academic papers.
//!
//! Each paper carries one unit of credit, split equally among the distinct
//! institutions it names; each institution's share is split again among the
//! paper's authors and attributed to every field of study the paper carries.
//!
//! ## Architecture
//!
//! - [`models`]: paper records, datasets and report structures
//! - [`extract`]: affiliation, field and author extraction from heterogeneous records
//! - [`aggregate`]: the contribution aggregator and field filter
//! - [`dashboard`]: selection, pagination and detail-view state
//! - [`ui`]: terminal rendering (tables, bar chart, detail view)
//! - [`utils`]: report memoization, text width handling, name suggestions
//! - [`config`]: configuration management
//!
//! ```rust
//! use research_rank::aggregate::{aggregate, FieldFilter};
//! use research_rank::extract::ChainExtractor;
//! use research_rank::models::PaperRecordBuilder;
//!
//! let papers = vec![PaperRecordBuilder::new("1")
//!     .authors(["A"])
//!     .matched_strings(["Alpha University", "Beta Institute"])
//!     .build()];
//!
//! let report = aggregate(&papers, &ChainExtractor::default(), &FieldFilter::All);
//! assert_eq!(report.ranking.len(), 2);
//! assert_eq!(report.ranking[0].total_contribution, 0.5);
//! ```

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod extract;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use aggregate::{aggregate, FieldFilter};
pub use dashboard::Dashboard;
pub use extract::{ChainExtractor, Extractor};
pub use models::{ContributionReport, Dataset, PaperRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
