//! Contribution aggregation.
//!
//! Every paper carries one unit of credit. The credit is split equally among
//! the paper's distinct institutions; each institution's share is split
//! equally among the paper's distinct authors, and added in full to every
//! field bucket the paper is tagged with.
//!
//! Accumulation follows paper order, then institution first-seen order, so
//! repeated runs over the same input produce bit-identical reports.

mod filter;

pub use filter::FieldFilter;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::extract::{Extraction, Extractor};
use crate::models::{
    AuthorContribution, ContributionReport, ContributionRow, FieldContributions, PaperRecord,
};

/// Running totals for one institution
#[derive(Debug)]
struct InstitutionTally {
    name: String,
    total: f64,
    papers: usize,
    authors: Vec<(String, f64)>,
    author_index: HashMap<String, usize>,
    fields: FieldContributions,
}

impl InstitutionTally {
    fn new(name: String) -> Self {
        Self {
            name,
            total: 0.0,
            papers: 0,
            authors: Vec::new(),
            author_index: HashMap::new(),
            fields: BTreeMap::new(),
        }
    }

    fn credit_author(&mut self, author: &str, amount: f64) {
        match self.author_index.get(author) {
            Some(&i) => self.authors[i].1 += amount,
            None => {
                self.author_index
                    .insert(author.to_string(), self.authors.len());
                self.authors.push((author.to_string(), amount));
            }
        }
    }
}

/// Distinct values in first-seen order
fn distinct(values: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(String::as_str)
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .collect()
}

/// Aggregate already-extracted papers.
///
/// `placeholder_author` is credited for papers whose extraction lists no
/// authors.
pub fn aggregate_extracted(
    extractions: &[Extraction],
    filter: &FieldFilter,
    placeholder_author: &str,
) -> ContributionReport {
    let mut tallies: Vec<InstitutionTally> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut included = 0usize;
    let mut excluded = 0usize;

    for extraction in extractions {
        if !filter.admits(&extraction.fields) {
            excluded += 1;
            continue;
        }
        included += 1;

        let institutions = distinct(&extraction.institutions);
        if institutions.is_empty() {
            continue;
        }

        let mut authors = distinct(&extraction.authors);
        if authors.is_empty() {
            authors.push(placeholder_author);
        }

        let share = 1.0 / institutions.len() as f64;
        let author_share = share / authors.len() as f64;

        for institution in institutions {
            let i = match index.get(institution) {
                Some(&i) => i,
                None => {
                    index.insert(institution.to_string(), tallies.len());
                    tallies.push(InstitutionTally::new(institution.to_string()));
                    tallies.len() - 1
                }
            };
            let tally = &mut tallies[i];

            tally.total += share;
            tally.papers += 1;
            for author in &authors {
                tally.credit_author(author, author_share);
            }
            for field in &extraction.fields {
                *tally.fields.entry(field.clone()).or_insert(0.0) += share;
            }
        }
    }

    let mut report = ContributionReport {
        included_papers: included,
        excluded_papers: excluded,
        ..Default::default()
    };

    for tally in tallies {
        let total = tally.total;
        let mut authors: Vec<AuthorContribution> = tally
            .authors
            .into_iter()
            .map(|(author, contribution)| AuthorContribution {
                author,
                contribution,
                percent: if total > 0.0 {
                    contribution / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        authors.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));

        report.ranking.push(ContributionRow {
            institution: tally.name.clone(),
            total_contribution: total,
            paper_count: tally.papers,
            author_count: authors.len(),
        });
        report
            .authors_by_institution
            .insert(tally.name.clone(), authors);
        if !tally.fields.is_empty() {
            report
                .field_contribution_by_institution
                .insert(tally.name, tally.fields);
        }
    }

    report
        .ranking
        .sort_by(|a, b| b.total_contribution.total_cmp(&a.total_contribution));

    tracing::debug!(
        "Aggregated {} papers ({} excluded by {}) into {} institutions",
        included,
        excluded,
        filter,
        report.ranking.len()
    );

    report
}

/// Extract every paper, in order
pub fn extract_all<E: Extractor + ?Sized>(papers: &[PaperRecord], extractor: &E) -> Vec<Extraction> {
    papers.iter().map(|p| extractor.extract(p)).collect()
}

/// Compute the full contribution report for a paper collection.
pub fn aggregate<E: Extractor + ?Sized>(
    papers: &[PaperRecord],
    extractor: &E,
    filter: &FieldFilter,
) -> ContributionReport {
    let extractions = extract_all(papers, extractor);
    aggregate_extracted(&extractions, filter, extractor.placeholder_author())
}

/// Sorted, deduplicated field labels across all extracted papers
pub fn unique_fields(extractions: &[Extraction]) -> Vec<String> {
    extractions
        .iter()
        .flat_map(|e| e.fields.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of papers tagged with each field
pub fn field_paper_counts(extractions: &[Extraction]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for field in extractions.iter().flat_map(|e| e.fields.iter()) {
        *counts.entry(field.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extraction(institutions: &[&str], authors: &[&str], fields: &[&str]) -> Extraction {
        Extraction {
            institutions: institutions.iter().map(|s| s.to_string()).collect(),
            authors: authors.iter().map(|s| s.to_string()).collect(),
            fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_equal_split_across_distinct_institutions() {
        let papers = vec![extraction(
            &["Alpha University", "Beta Institute", "Alpha University"],
            &["A"],
            &[],
        )];
        let report = aggregate_extracted(&papers, &FieldFilter::All, "?");

        assert_eq!(report.ranking.len(), 2);
        for row in &report.ranking {
            assert_eq!(row.total_contribution, 0.5);
            assert_eq!(row.paper_count, 1);
        }
    }

    #[test]
    fn test_stable_order_on_ties() {
        let papers = vec![
            extraction(&["Zeta College"], &["A"], &[]),
            extraction(&["Alpha University"], &["B"], &[]),
        ];
        let report = aggregate_extracted(&papers, &FieldFilter::All, "?");
        let names: Vec<&str> = report.ranking.iter().map(|r| r.institution.as_str()).collect();
        assert_eq!(names, vec!["Zeta College", "Alpha University"]);
    }

    #[test]
    fn test_ranking_descending() {
        let papers = vec![
            extraction(&["Alpha University", "Beta Institute"], &["A"], &[]),
            extraction(&["Beta Institute"], &["B"], &[]),
        ];
        let report = aggregate_extracted(&papers, &FieldFilter::All, "?");
        assert_eq!(report.ranking[0].institution, "Beta Institute");
        assert_eq!(report.ranking[0].total_contribution, 1.5);
        assert_eq!(report.ranking[0].paper_count, 2);
        assert_eq!(report.ranking[0].author_count, 2);
    }

    #[test]
    fn test_placeholder_author_when_none() {
        let papers = vec![extraction(&["Alpha University"], &[], &[])];
        let report = aggregate_extracted(&papers, &FieldFilter::All, "(unknown author)");
        let authors = report.authors("Alpha University");
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].author, "(unknown author)");
        assert_eq!(authors[0].contribution, 1.0);
        assert_eq!(authors[0].percent, 100.0);
    }

    #[test]
    fn test_field_attribution_not_partition() {
        let papers = vec![extraction(
            &["Alpha University", "Beta Institute"],
            &["A"],
            &["Biology", "Medicine"],
        )];
        let report = aggregate_extracted(&papers, &FieldFilter::All, "?");
        let fields = &report.field_contribution_by_institution["Alpha University"];
        assert_eq!(fields["Biology"], 0.5);
        assert_eq!(fields["Medicine"], 0.5);
    }

    #[test]
    fn test_filter_exclusion_counts() {
        let papers = vec![
            extraction(&["Alpha University"], &["A"], &["Biology"]),
            extraction(&["Alpha University"], &["A"], &[]),
            extraction(&[], &["A"], &["Physics"]),
        ];
        let report = aggregate_extracted(&papers, &FieldFilter::only(["Biology"]), "?");
        assert_eq!(report.included_papers, 1);
        assert_eq!(report.excluded_papers, 2);
        assert_eq!(report.ranking[0].total_contribution, 1.0);

        let unrestricted = aggregate_extracted(&papers, &FieldFilter::All, "?");
        assert_eq!(unrestricted.included_papers, 3);
        assert_eq!(unrestricted.ranking[0].total_contribution, 2.0);
    }

    #[test]
    fn test_unique_fields_and_counts() {
        let papers = vec![
            extraction(&[], &[], &["Physics", "Biology"]),
            extraction(&[], &[], &["Biology"]),
            extraction(&[], &[], &[]),
        ];
        assert_eq!(unique_fields(&papers), vec!["Biology", "Physics"]);
        let counts = field_paper_counts(&papers);
        assert_eq!(counts["Biology"], 2);
        assert_eq!(counts["Physics"], 1);
    }
}
