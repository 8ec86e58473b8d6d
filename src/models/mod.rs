//! Core data models: paper records, datasets and ranking results.

mod dataset;
mod paper;
mod ranking;

pub use dataset::{Dataset, DatasetError};
pub use paper::{AuthorEntry, FieldEntry, PaperRecord, PaperRecordBuilder};
pub use ranking::{
    AuthorContribution, ContributionReport, ContributionRow, FieldContributions, FieldShare,
};
