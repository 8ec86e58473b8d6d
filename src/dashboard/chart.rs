//! Ranked bar chart model.

use serde::Serialize;

use super::pagination::Pagination;
use crate::models::ContributionRow;

/// Bars at or above this share of the longest bar carry their value inside
pub const LABEL_INSIDE_THRESHOLD: f64 = 18.0;

/// Bars never render shorter than this percentage of the full width
pub const MIN_BAR_PERCENT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBar {
    /// 1-based rank in the full ranking
    pub rank: usize,
    pub institution: String,
    pub contribution: f64,
    pub paper_count: usize,

    /// Contribution relative to the top-ranked institution, 0 to 100
    pub percent_of_max: f64,

    pub label_inside: bool,
}

impl ChartBar {
    /// Rendered length as a fraction of the full bar width
    pub fn fill_fraction(&self) -> f64 {
        self.percent_of_max.max(MIN_BAR_PERCENT).min(100.0) / 100.0
    }
}

/// One page of bars, scaled against the whole ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPage {
    pub page: usize,
    pub total_pages: usize,
    pub bars: Vec<ChartBar>,
}

impl ChartPage {
    pub fn build(ranking: &[ContributionRow], pagination: &Pagination) -> Self {
        let global_max = ranking
            .iter()
            .map(|r| r.total_contribution)
            .fold(0.0_f64, f64::max);

        let range = pagination.range();
        let offset = range.start;
        let bars = pagination
            .slice(ranking)
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let percent_of_max = if global_max > 0.0 {
                    row.total_contribution / global_max * 100.0
                } else {
                    0.0
                };
                ChartBar {
                    rank: offset + i + 1,
                    institution: row.institution.clone(),
                    contribution: row.total_contribution,
                    paper_count: row.paper_count,
                    percent_of_max,
                    label_inside: percent_of_max >= LABEL_INSIDE_THRESHOLD,
                }
            })
            .collect();

        Self {
            page: pagination.page(),
            total_pages: pagination.total_pages(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, total: f64) -> ContributionRow {
        ContributionRow {
            institution: name.to_string(),
            total_contribution: total,
            paper_count: 1,
            author_count: 1,
        }
    }

    #[test]
    fn test_bars_scale_against_global_max() {
        let ranking = vec![row("A", 10.0), row("B", 5.0), row("C", 1.0)];
        let mut pagination = Pagination::new(ranking.len(), 2);
        pagination.go_to(1);

        let page = ChartPage::build(&ranking, &pagination);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.bars.len(), 1);
        assert_eq!(page.bars[0].rank, 3);
        assert_eq!(page.bars[0].percent_of_max, 10.0);
        assert!(!page.bars[0].label_inside);

        pagination.first();
        let page = ChartPage::build(&ranking, &pagination);
        assert_eq!(page.bars[0].percent_of_max, 100.0);
        assert!(page.bars[1].label_inside);
    }

    #[test]
    fn test_tiny_bars_keep_minimum_width() {
        let ranking = vec![row("A", 1000.0), row("B", 0.001)];
        let page = ChartPage::build(&ranking, &Pagination::new(2, 10));
        assert_eq!(page.bars[1].fill_fraction(), 0.01);
    }

    #[test]
    fn test_empty_ranking() {
        let page = ChartPage::build(&[], &Pagination::new(0, 10));
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
