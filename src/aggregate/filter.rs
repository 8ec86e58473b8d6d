//! Field filter applied before aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which fields of study a ranking is restricted to.
///
/// `All` admits every paper, including field-unknown ones. `Only(set)` admits
/// papers carrying at least one field in `set`; an empty `Only` admits nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl FieldFilter {
    /// Build a filter from a selection set, where an empty set means
    /// "no restriction"
    pub fn from_set(fields: BTreeSet<String>) -> Self {
        if fields.is_empty() {
            FieldFilter::All
        } else {
            FieldFilter::Only(fields)
        }
    }

    /// Restrict to exactly these fields; an empty list excludes every paper
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldFilter::Only(fields.into_iter().map(Into::into).collect())
    }

    /// True when some papers may be excluded on field grounds
    pub fn is_restricted(&self) -> bool {
        matches!(self, FieldFilter::Only(_))
    }

    /// Whether a paper with these fields passes the filter
    pub fn admits(&self, fields: &[String]) -> bool {
        match self {
            FieldFilter::All => true,
            FieldFilter::Only(selected) => fields.iter().any(|f| selected.contains(f)),
        }
    }

    /// Selected fields, if restricted
    pub fn selected(&self) -> Option<&BTreeSet<String>> {
        match self {
            FieldFilter::All => None,
            FieldFilter::Only(selected) => Some(selected),
        }
    }
}

impl std::fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldFilter::All => write!(f, "all fields"),
            FieldFilter::Only(selected) if selected.is_empty() => write!(f, "no fields"),
            FieldFilter::Only(selected) => {
                write!(f, "{}", selected.iter().cloned().collect::<Vec<_>>().join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_admits_everything() {
        assert!(FieldFilter::All.admits(&[]));
        assert!(FieldFilter::All.admits(&fields(&["Biology"])));
        assert!(!FieldFilter::All.is_restricted());
    }

    #[test]
    fn test_only_requires_intersection() {
        let filter = FieldFilter::only(["Biology", "Physics"]);
        assert!(filter.admits(&fields(&["Chemistry", "Physics"])));
        assert!(!filter.admits(&fields(&["Chemistry"])));
        assert!(!filter.admits(&[]));
    }

    #[test]
    fn test_empty_only_admits_nothing() {
        let filter = FieldFilter::only(Vec::<String>::new());
        assert!(filter.is_restricted());
        assert!(!filter.admits(&fields(&["Biology"])));
        assert_eq!(filter.to_string(), "no fields");
    }

    #[test]
    fn test_empty_set_means_unrestricted() {
        assert_eq!(FieldFilter::from_set(BTreeSet::new()), FieldFilter::All);
        let set: BTreeSet<String> = ["Biology".to_string()].into_iter().collect();
        assert!(FieldFilter::from_set(set).is_restricted());
    }
}
