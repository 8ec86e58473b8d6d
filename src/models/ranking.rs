//! Result structures produced by contribution aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One institution's line in the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRow {
    /// Normalized institution name (unique within a ranking)
    pub institution: String,

    /// Sum of per-paper shares
    pub total_contribution: f64,

    /// Number of distinct papers naming this institution
    pub paper_count: usize,

    /// Number of distinct author names attributed to this institution
    pub author_count: usize,
}

/// An author's accumulated credit within one institution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorContribution {
    pub author: String,

    pub contribution: f64,

    /// Share of the institution total, in percent (0 to 100)
    pub percent: f64,
}

/// One row of an institution's field breakdown, with its share computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldShare {
    pub field: String,

    pub contribution: f64,

    /// Share of the sum of the institution's field buckets, in percent
    pub percent: f64,
}

/// Field label → accumulated contribution for one institution
pub type FieldContributions = BTreeMap<String, f64>;

/// Everything one aggregation pass produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionReport {
    /// Institutions sorted by descending total contribution
    pub ranking: Vec<ContributionRow>,

    /// Per-institution author breakdown, sorted by descending contribution
    pub authors_by_institution: BTreeMap<String, Vec<AuthorContribution>>,

    /// Per-institution field buckets
    pub field_contribution_by_institution: BTreeMap<String, FieldContributions>,

    /// Papers that passed the field filter
    pub included_papers: usize,

    /// Papers dropped by the field filter
    pub excluded_papers: usize,
}

impl ContributionReport {
    /// Returns true when no institution received any contribution
    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    /// Look up an institution's ranking row
    pub fn row(&self, institution: &str) -> Option<&ContributionRow> {
        self.ranking.iter().find(|r| r.institution == institution)
    }

    /// 1-based rank of an institution
    pub fn rank_of(&self, institution: &str) -> Option<usize> {
        self.ranking
            .iter()
            .position(|r| r.institution == institution)
            .map(|i| i + 1)
    }

    /// Author breakdown for one institution (empty if unknown)
    pub fn authors(&self, institution: &str) -> &[AuthorContribution] {
        self.authors_by_institution
            .get(institution)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Field breakdown as percentages of the institution's field-bucket sum,
    /// sorted by descending contribution.
    pub fn field_shares(&self, institution: &str) -> Vec<FieldShare> {
        let Some(buckets) = self.field_contribution_by_institution.get(institution) else {
            return Vec::new();
        };

        let total: f64 = buckets.values().sum();
        let mut shares: Vec<FieldShare> = buckets
            .iter()
            .map(|(field, &contribution)| FieldShare {
                field: field.clone(),
                contribution,
                percent: if total > 0.0 {
                    contribution / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        shares.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        shares
    }

    /// Sum of an institution's field buckets
    pub fn field_total(&self, institution: &str) -> f64 {
        self.field_contribution_by_institution
            .get(institution)
            .map(|buckets| buckets.values().sum())
            .unwrap_or(0.0)
    }

    /// Sum of all institution totals
    pub fn grand_total(&self) -> f64 {
        self.ranking.iter().map(|r| r.total_contribution).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContributionReport {
        let mut fields = FieldContributions::new();
        fields.insert("Biology".to_string(), 0.25);
        fields.insert("Physics".to_string(), 0.75);

        let mut report = ContributionReport {
            ranking: vec![
                ContributionRow {
                    institution: "Alpha University".into(),
                    total_contribution: 1.5,
                    paper_count: 2,
                    author_count: 3,
                },
                ContributionRow {
                    institution: "Beta Institute".into(),
                    total_contribution: 0.5,
                    paper_count: 1,
                    author_count: 1,
                },
            ],
            ..Default::default()
        };
        report
            .field_contribution_by_institution
            .insert("Alpha University".into(), fields);
        report
    }

    #[test]
    fn test_rank_lookup() {
        let report = sample();
        assert_eq!(report.rank_of("Beta Institute"), Some(2));
        assert_eq!(report.rank_of("Gamma College"), None);
        assert_eq!(report.row("Alpha University").unwrap().paper_count, 2);
        assert!((report.grand_total() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_field_shares_sorted_with_percent() {
        let report = sample();
        let shares = report.field_shares("Alpha University");
        assert_eq!(shares[0].field, "Physics");
        assert!((shares[0].percent - 75.0).abs() < 1e-9);
        assert!((shares[1].percent - 25.0).abs() < 1e-9);
        assert!(report.field_shares("Beta Institute").is_empty());
    }

    #[test]
    fn test_unknown_institution_has_no_authors() {
        assert!(sample().authors("Nowhere").is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json["ranking"][0]["totalContribution"].is_number());
        assert!(json["fieldContributionByInstitution"]["Alpha University"].is_object());
    }
}
