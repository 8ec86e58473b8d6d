//! Utility modules supporting ranking and presentation.
//!
//! - [`ReportCache`]: memoizes contribution reports per dataset and field filter
//! - [`truncate_with_ellipsis`] / [`truncate_at_word`]: width-aware truncation
//! - [`render_bar`]: fixed-width horizontal bars for charts
//! - [`suggest`]: fuzzy institution name suggestions
//!
//! # Report memoization
//!
//! ```rust
//! use research_rank::aggregate::FieldFilter;
//! use research_rank::models::ContributionReport;
//! use research_rank::utils::ReportCache;
//!
//! let mut cache = ReportCache::new();
//! let report = cache.get_or_insert_with("fingerprint", &FieldFilter::All, ContributionReport::default);
//! assert!(report.is_empty());
//! assert_eq!(cache.len(), 1);
//! ```

mod cache;
mod display;
mod suggest;

pub use cache::{CacheResult, CacheStats, ReportCache, DEFAULT_CAPACITY};
pub use display::{
    calculate_column_widths, display_width, format_contribution, format_percent, is_terminal,
    ranking_table_columns, render_bar, terminal_info, terminal_width, truncate_at_word,
    truncate_with_ellipsis, ColumnConfig, Terminal, DEFAULT_WIDTH,
};
pub use suggest::{find_exact, suggest, SUGGESTION_THRESHOLD};
