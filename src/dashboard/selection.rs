//! Field checkbox state.

use std::collections::BTreeSet;

use crate::aggregate::FieldFilter;

/// Which of the dataset's fields are checked.
///
/// Starts with every available field selected. Unlike
/// [`FieldFilter::from_set`], an empty selection is a real restriction: with
/// nothing checked, nothing is ranked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    available: Vec<String>,
    selected: BTreeSet<String>,
}

impl FieldSelection {
    /// Create a selection over `available` with everything checked
    pub fn new(available: Vec<String>) -> Self {
        let selected = available.iter().cloned().collect();
        Self {
            available,
            selected,
        }
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, field: &str) -> bool {
        self.selected.contains(field)
    }

    fn is_available(&self, field: &str) -> bool {
        self.available.iter().any(|f| f == field)
    }

    /// Flip one checkbox. Returns false if the field is unknown.
    pub fn toggle(&mut self, field: &str) -> bool {
        if !self.is_available(field) {
            return false;
        }
        if !self.selected.remove(field) {
            self.selected.insert(field.to_string());
        }
        true
    }

    pub fn select_all(&mut self) {
        self.selected = self.available.iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Check exactly the given fields. Unknown labels are skipped and returned.
    pub fn set_only<I, S>(&mut self, fields: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected.clear();
        let mut unknown = Vec::new();
        for field in fields {
            let field = field.as_ref();
            if self.is_available(field) {
                self.selected.insert(field.to_string());
            } else {
                unknown.push(field.to_string());
            }
        }
        unknown
    }

    pub fn is_all_selected(&self) -> bool {
        self.selected.len() == self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The filter the aggregator receives for this selection.
    ///
    /// A dataset without any field labels offers nothing to restrict on, so
    /// it is never filtered.
    pub fn to_filter(&self) -> FieldFilter {
        if self.available.is_empty() {
            FieldFilter::All
        } else {
            FieldFilter::Only(self.selected.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> FieldSelection {
        FieldSelection::new(vec!["Biology".into(), "Medicine".into(), "Physics".into()])
    }

    #[test]
    fn test_starts_all_selected() {
        let s = selection();
        assert!(s.is_all_selected());
        assert_eq!(s.to_filter(), FieldFilter::only(["Biology", "Medicine", "Physics"]));
    }

    #[test]
    fn test_toggle() {
        let mut s = selection();
        assert!(s.toggle("Medicine"));
        assert!(!s.is_selected("Medicine"));
        assert!(s.toggle("Medicine"));
        assert!(s.is_selected("Medicine"));
        assert!(!s.toggle("Geology"));
    }

    #[test]
    fn test_clear_gives_restrictive_filter() {
        let mut s = selection();
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.to_filter(), FieldFilter::only(Vec::<String>::new()));

        s.select_all();
        assert!(s.is_all_selected());
    }

    #[test]
    fn test_no_available_fields_is_unrestricted() {
        let mut s = FieldSelection::new(Vec::new());
        assert_eq!(s.to_filter(), FieldFilter::All);
        s.clear();
        assert_eq!(s.to_filter(), FieldFilter::All);
    }

    #[test]
    fn test_set_only_reports_unknown() {
        let mut s = selection();
        let unknown = s.set_only(["Physics", "Geology"]);
        assert_eq!(unknown, vec!["Geology"]);
        assert_eq!(s.selected().len(), 1);
        assert!(s.is_selected("Physics"));
    }
}
