//! Presentation state for the ranking dashboard.
//!
//! [`Dashboard`] owns everything the views need: the extracted dataset, the
//! field checkbox state, table and chart pagination, and the institution
//! currently opened in the detail view. Every selection change recomputes
//! the report from scratch (or fetches it from the [`ReportCache`]).

mod chart;
mod detail;
mod pagination;
mod selection;

pub use chart::{ChartBar, ChartPage, LABEL_INSIDE_THRESHOLD, MIN_BAR_PERCENT};
pub use detail::InstitutionDetail;
pub use pagination::{PageLink, Pagination};
pub use selection::FieldSelection;

use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::aggregate::{
    aggregate_extracted, extract_all, field_paper_counts, unique_fields, FieldFilter,
};
use crate::config::{Config, DisplayConfig};
use crate::extract::{ChainExtractor, Extraction, Extractor};
use crate::models::{ContributionReport, ContributionRow, Dataset};
use crate::utils::{find_exact, suggest, ReportCache};

/// Maximum number of "did you mean" suggestions
const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Institution '{name}' is not in the current ranking")]
    UnknownInstitution {
        name: String,
        suggestions: Vec<String>,
    },
}

/// Ranking dashboard over one dataset
#[derive(Debug)]
pub struct Dashboard {
    fingerprint: String,
    extractions: Vec<Extraction>,
    placeholder_author: String,
    unique_fields: Vec<String>,
    selection: FieldSelection,
    cache: ReportCache,
    report: Arc<ContributionReport>,
    table: Pagination,
    chart: Pagination,
    selected_institution: Option<String>,
    display: DisplayConfig,
}

impl Dashboard {
    /// Build a dashboard, extracting every paper once up front
    pub fn new<E: Extractor + ?Sized>(
        dataset: &Dataset,
        extractor: &E,
        display: DisplayConfig,
    ) -> Self {
        let extractions = extract_all(dataset.papers(), extractor);
        let unique_fields = unique_fields(&extractions);

        tracing::debug!(
            "Extracted {} papers, {} distinct fields",
            extractions.len(),
            unique_fields.len()
        );

        let mut dashboard = Self {
            fingerprint: dataset.fingerprint().to_string(),
            extractions,
            placeholder_author: extractor.placeholder_author().to_string(),
            selection: FieldSelection::new(unique_fields.clone()),
            unique_fields,
            cache: ReportCache::new(),
            report: Arc::new(ContributionReport::default()),
            table: Pagination::new(0, display.table_page_size),
            chart: Pagination::new(0, display.chart_page_size),
            selected_institution: None,
            display,
        };
        dashboard.recompute();
        dashboard
    }

    /// Build a dashboard with the standard extractor for `config`
    pub fn from_config(dataset: &Dataset, config: &Config) -> Self {
        let extractor = ChainExtractor::from_config(&config.extraction);
        Self::new(dataset, &extractor, config.display.clone())
    }

    /// Recompute the report for the current selection
    pub fn recompute(&mut self) -> Arc<ContributionReport> {
        let filter = self.selection.to_filter();
        let extractions = &self.extractions;
        let placeholder = &self.placeholder_author;

        self.report = self.cache.get_or_insert_with(&self.fingerprint, &filter, || {
            aggregate_extracted(extractions, &filter, placeholder)
        });

        let rows = self.report.ranking.len();
        self.table.set_total_rows(rows);
        self.chart.set_total_rows(rows);

        tracing::debug!(
            "Ranking has {} institutions ({} papers included, {} excluded)",
            rows,
            self.report.included_papers,
            self.report.excluded_papers
        );

        Arc::clone(&self.report)
    }

    pub fn report(&self) -> &ContributionReport {
        &self.report
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn paper_count(&self) -> usize {
        self.extractions.len()
    }

    /// Sorted distinct field labels across the whole dataset
    pub fn unique_fields(&self) -> &[String] {
        &self.unique_fields
    }

    /// Papers tagged with each field, over the whole dataset
    pub fn field_paper_counts(&self) -> BTreeMap<String, usize> {
        field_paper_counts(&self.extractions)
    }

    pub fn selection(&self) -> &FieldSelection {
        &self.selection
    }

    pub fn filter(&self) -> FieldFilter {
        self.selection.to_filter()
    }

    /// Flip one field checkbox. Unknown fields leave the ranking untouched.
    pub fn toggle_field(&mut self, field: &str) -> bool {
        let changed = self.selection.toggle(field);
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn select_all_fields(&mut self) {
        self.selection.select_all();
        self.recompute();
    }

    pub fn clear_fields(&mut self) {
        self.selection.clear();
        self.recompute();
    }

    /// Check exactly these fields; returns labels not present in the dataset
    pub fn select_fields<I, S>(&mut self, fields: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unknown = self.selection.set_only(fields);
        for field in &unknown {
            tracing::warn!("Field '{}' does not occur in the dataset", field);
        }
        self.recompute();
        unknown
    }

    pub fn table_pagination(&self) -> &Pagination {
        &self.table
    }

    /// Rows of the current table page
    pub fn table_rows(&self) -> &[ContributionRow] {
        self.table.slice(&self.report.ranking)
    }

    pub fn go_to_table_page(&mut self, page: usize) -> usize {
        self.table.go_to(page)
    }

    pub fn chart_pagination(&self) -> &Pagination {
        &self.chart
    }

    pub fn chart_page(&self) -> ChartPage {
        ChartPage::build(&self.report.ranking, &self.chart)
    }

    pub fn go_to_chart_page(&mut self, page: usize) -> usize {
        self.chart.go_to(page)
    }

    /// Open an institution's detail view.
    ///
    /// Matching ignores case and spacing. On a miss the error carries
    /// similar names from the current ranking.
    pub fn select_institution(&mut self, name: &str) -> Result<&str, DashboardError> {
        let names = self.report.ranking.iter().map(|r| r.institution.as_str());
        match find_exact(name, names) {
            Some(found) => {
                let found = found.to_string();
                Ok(self.selected_institution.insert(found).as_str())
            }
            None => {
                let names = self.report.ranking.iter().map(|r| r.institution.as_str());
                let suggestions = suggest(name, names, MAX_SUGGESTIONS)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                Err(DashboardError::UnknownInstitution {
                    name: name.to_string(),
                    suggestions,
                })
            }
        }
    }

    pub fn selected_institution(&self) -> Option<&str> {
        self.selected_institution.as_deref()
    }

    pub fn close_detail(&mut self) {
        self.selected_institution = None;
    }

    /// Detail view for the selected institution under the current report
    pub fn detail(&self) -> Option<InstitutionDetail> {
        self.selected_institution
            .as_deref()
            .map(|name| InstitutionDetail::from_report(&self.report, name))
    }

    pub fn cache_stats(&self) -> crate::utils::CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaperRecordBuilder;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            PaperRecordBuilder::new("1")
                .authors(["A", "B"])
                .affiliations(["Alpha University", "Alpha University"])
                .fields(["Biology"])
                .build(),
            PaperRecordBuilder::new("2")
                .authors(["C"])
                .matched_strings(["Alpha University", "Beta Institute"])
                .fields(["Physics"])
                .build(),
            PaperRecordBuilder::new("3")
                .authors(["D"])
                .matched_strings(["Gamma College"])
                .build(),
        ])
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(&dataset(), &ChainExtractor::default(), DisplayConfig::default())
    }

    #[test]
    fn test_default_selection_excludes_field_unknown() {
        let d = dashboard();
        assert_eq!(d.unique_fields(), &["Biology", "Physics"]);
        assert!(d.selection().is_all_selected());
        assert_eq!(d.report().excluded_papers, 1);
        assert!(d.report().row("Gamma College").is_none());
    }

    #[test]
    fn test_toggle_recomputes() {
        let mut d = dashboard();
        assert_eq!(d.report().ranking[0].total_contribution, 1.5);

        assert!(d.toggle_field("Physics"));
        assert_eq!(d.report().ranking.len(), 1);
        assert_eq!(d.report().ranking[0].total_contribution, 1.0);

        d.clear_fields();
        assert!(d.report().is_empty());
        assert!(d.table_rows().is_empty());

        d.select_all_fields();
        assert_eq!(d.report().ranking.len(), 2);
    }

    #[test]
    fn test_reports_are_memoized() {
        let mut d = dashboard();
        d.toggle_field("Physics");
        d.toggle_field("Physics");
        let stats = d.cache_stats();
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_select_institution() {
        let mut d = dashboard();
        assert_eq!(d.select_institution("alpha university"), Ok("Alpha University"));

        let detail = d.detail().unwrap_or_else(|| panic!("detail missing"));
        assert_eq!(detail.rank, Some(1));
        assert_eq!(detail.authors.len(), 3);

        match d.select_institution("Alpha Univ") {
            Err(DashboardError::UnknownInstitution { suggestions, .. }) => {
                assert_eq!(suggestions, vec!["Alpha University"]);
            }
            other => panic!("unexpected {:?}", other),
        }

        d.close_detail();
        assert!(d.detail().is_none());
    }

    #[test]
    fn test_dataset_without_fields_ranks_everything() {
        let dataset = Dataset::new(vec![
            PaperRecordBuilder::new("1")
                .authors(["A"])
                .matched_strings(["Alpha University"])
                .build(),
            PaperRecordBuilder::new("2")
                .authors(["B"])
                .matched_strings(["Beta Institute"])
                .build(),
        ]);
        let mut d = Dashboard::from_config(&dataset, &Config::default());
        assert!(d.unique_fields().is_empty());
        assert_eq!(d.filter(), FieldFilter::All);
        assert_eq!(d.report().ranking.len(), 2);
        assert_eq!(d.report().excluded_papers, 0);

        d.clear_fields();
        assert_eq!(d.report().ranking.len(), 2);
    }

    #[test]
    fn test_select_unknown_fields() {
        let mut d = dashboard();
        assert_eq!(d.select_fields(["Biology", "Geology"]), vec!["Geology"]);
        assert_eq!(d.report().ranking.len(), 1);
    }
}
