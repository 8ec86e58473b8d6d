//! Fuzzy institution name lookup.

use strsim::jaro_winkler;

/// Minimum similarity for a name to be suggested
pub const SUGGESTION_THRESHOLD: f64 = 0.85;

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Find a candidate equal to `query`, ignoring case and spacing
pub fn find_exact<'a, I>(query: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = normalize_name(query);
    candidates
        .into_iter()
        .find(|c| normalize_name(c) == wanted)
}

/// Candidates most similar to `query`, best first, at most `limit` of them.
///
/// A candidate containing the query as a substring always qualifies.
pub fn suggest<'a, I>(query: &str, candidates: I, limit: usize) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = normalize_name(query);
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &'a str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let name = normalize_name(candidate);
            let score = if name.contains(&wanted) {
                1.0
            } else {
                jaro_winkler(&wanted, &name)
            };
            (score >= SUGGESTION_THRESHOLD).then_some((score, candidate))
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 3] = [
        "Hanoi Medical University",
        "Hue University of Medicine and Pharmacy",
        "Vietnam National University",
    ];

    #[test]
    fn test_find_exact_ignores_case_and_spacing() {
        assert_eq!(
            find_exact("hanoi  medical university", NAMES),
            Some("Hanoi Medical University")
        );
        assert_eq!(find_exact("Hanoi", NAMES), None);
    }

    #[test]
    fn test_suggest_substring_and_typos() {
        assert_eq!(suggest("Hanoi", NAMES, 5), vec!["Hanoi Medical University"]);
        assert_eq!(
            suggest("Hanoi Medcal University", NAMES, 5),
            vec!["Hanoi Medical University"]
        );
        assert!(suggest("Stanford", NAMES, 5).is_empty());
        assert!(suggest("  ", NAMES, 5).is_empty());
    }
}
