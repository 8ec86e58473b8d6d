//! Per-institution drill-down.

use serde::Serialize;

use crate::models::{AuthorContribution, ContributionReport, ContributionRow, FieldShare};

/// Everything the detail view shows for one institution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionDetail {
    pub institution: String,

    /// 1-based rank, absent if the institution dropped out of the ranking
    pub rank: Option<usize>,

    pub row: Option<ContributionRow>,

    pub authors: Vec<AuthorContribution>,

    /// Sum of author contributions; equals the institution total
    pub author_total: f64,

    pub fields: Vec<FieldShare>,

    /// Sum of the field buckets; exceeds the total for multi-field papers
    pub field_total: f64,
}

impl InstitutionDetail {
    pub fn from_report(report: &ContributionReport, institution: &str) -> Self {
        let authors = report.authors(institution).to_vec();
        let author_total = authors.iter().map(|a| a.contribution).sum();

        Self {
            institution: institution.to_string(),
            rank: report.rank_of(institution),
            row: report.row(institution).cloned(),
            authors,
            author_total,
            fields: report.field_shares(institution),
            field_total: report.field_total(institution),
        }
    }

    /// The `n` largest field shares
    pub fn top_fields(&self, n: usize) -> &[FieldShare] {
        &self.fields[..n.min(self.fields.len())]
    }

    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate_extracted, FieldFilter};
    use crate::extract::Extraction;

    fn extraction(institutions: &[&str], authors: &[&str], fields: &[&str]) -> Extraction {
        Extraction {
            institutions: institutions.iter().map(|s| s.to_string()).collect(),
            authors: authors.iter().map(|s| s.to_string()).collect(),
            fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_detail_totals() {
        let papers = vec![
            extraction(&["Alpha University"], &["A", "B"], &["Biology", "Medicine"]),
            extraction(&["Alpha University", "Beta Institute"], &["A"], &["Biology"]),
        ];
        let report = aggregate_extracted(&papers, &FieldFilter::All, "?");
        let detail = InstitutionDetail::from_report(&report, "Alpha University");

        assert_eq!(detail.rank, Some(1));
        assert!((detail.author_total - 1.5).abs() < 1e-12);
        assert_eq!(detail.authors[0].author, "A");
        assert_eq!(detail.fields[0].field, "Biology");
        assert!((detail.field_total - 2.5).abs() < 1e-12);
        assert_eq!(detail.top_fields(1).len(), 1);
        assert_eq!(detail.top_fields(10).len(), 2);
    }

    #[test]
    fn test_unknown_institution_is_empty() {
        let detail = InstitutionDetail::from_report(&ContributionReport::default(), "Nowhere");
        assert_eq!(detail.rank, None);
        assert!(detail.authors.is_empty());
        assert!(!detail.has_fields());
        assert_eq!(detail.field_total, 0.0);
    }
}
