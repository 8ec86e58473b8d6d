//! Institution name normalization and plausibility checks.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::ExtractionConfig;

fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn sub_unit_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, r"(?i)^\s*(department|dept|division|section|faculty\s+of)\b")
}

fn keyword_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(
        &RE,
        r"(?i)\b(univ\w*|college|institut\w*|hospital|school|faculty|cent(?:re|er)|academy|research|clinic)\b",
    )
}

fn university_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, r"(?i)\buniv")
}

fn figure_label_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, r"(?i)^(fig(ure)?|tab(le)?)\.?\s*\d")
}

fn hits(re: Option<&Regex>, text: &str) -> bool {
    re.is_some_and(|re| re.is_match(text))
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim leading/trailing commas, periods, dashes, colons and whitespace.
pub fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| matches!(c, ',' | '.' | '-' | ':') || c.is_whitespace())
}

/// True for organizational sub-unit labels such as "Department of Physics".
pub fn is_sub_unit(text: &str) -> bool {
    hits(sub_unit_re(), text)
}

/// True when the text names a proper institution type.
pub fn has_institution_keyword(text: &str) -> bool {
    hits(keyword_re(), text)
}

/// True when the text mentions a university.
pub fn mentions_university(text: &str) -> bool {
    hits(university_re(), text)
}

/// True for figure and table captions ("Fig. 2", "Table 1").
pub fn is_figure_label(text: &str) -> bool {
    hits(figure_label_re(), text)
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sub-unit labels survive only when something after the sub-unit prefix
/// names a proper institution ("Department of Physics, Hanoi University").
pub fn is_plausible_institution(text: &str) -> bool {
    match sub_unit_re().and_then(|re| re.find(text)) {
        Some(prefix) => has_institution_keyword(&text[prefix.end()..]),
        None => true,
    }
}

/// Cleans raw affiliation text into institution names.
#[derive(Debug, Clone)]
pub struct InstitutionNormalizer {
    min_length: usize,
    country_suffix: Option<Regex>,
}

impl Default for InstitutionNormalizer {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl InstitutionNormalizer {
    pub fn new<S: AsRef<str>>(min_length: usize, strip_countries: &[S]) -> Self {
        let alternatives: Vec<String> = strip_countries
            .iter()
            .map(|c| c.as_ref().trim())
            .filter(|c| !c.is_empty())
            .map(regex::escape)
            .collect();

        let country_suffix = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!(r"(?i)[\s,]+(?:{})$", alternatives.join("|"));
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("Ignoring country suffix list: {}", e);
                    None
                }
            }
        };

        Self {
            min_length,
            country_suffix,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.min_institution_length, &config.strip_countries)
    }

    /// Normalize one raw string. Returns `None` for text too short to be a name.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let collapsed = collapse_whitespace(raw);
        let mut name = trim_separators(&collapsed).to_string();
        if name.is_empty() {
            return None;
        }

        if let Some(re) = &self.country_suffix {
            if let Some(m) = re.find(&name) {
                name = trim_separators(&name[..m.start()]).to_string();
            }
        }

        if name.chars().count() < self.min_length {
            return None;
        }
        Some(name)
    }

    /// Normalize and drop implausible sub-unit labels.
    pub fn institution(&self, raw: &str) -> Option<String> {
        self.normalize(raw)
            .filter(|name| is_plausible_institution(name))
    }

    /// Pick the most institution-like fragment of a free-text affiliation.
    ///
    /// Preference order: first fragment mentioning a university, first with
    /// any institution keyword, longest with three or more words, and finally
    /// the last fragment if it has at least two words.
    pub fn best_fragment(&self, text: &str) -> Option<String> {
        let fragments: Vec<String> = text
            .split(['\n', '\r', ';', ',', '(', ')'])
            .filter_map(|f| self.normalize(f))
            .collect();

        if let Some(f) = fragments.iter().find(|f| mentions_university(f)) {
            return Some(f.clone());
        }

        if let Some(f) = fragments
            .iter()
            .find(|f| has_institution_keyword(f) && is_plausible_institution(f))
        {
            return Some(f.clone());
        }

        let longest = fragments
            .iter()
            .filter(|f| word_count(f) >= 3 && !is_sub_unit(f) && !is_figure_label(f))
            .fold(None::<&String>, |best, f| match best {
                Some(b) if b.chars().count() >= f.chars().count() => Some(b),
                _ => Some(f),
            });
        if let Some(f) = longest {
            return Some(f.clone());
        }

        fragments
            .last()
            .filter(|f| word_count(f) >= 2 && !is_sub_unit(f))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> InstitutionNormalizer {
        InstitutionNormalizer::default()
    }

    #[test]
    fn test_normalize_collapses_and_trims() {
        let n = normalizer();
        assert_eq!(
            n.normalize("  ,Hanoi   University\n of Science. ").as_deref(),
            Some("Hanoi University of Science")
        );
        assert_eq!(n.normalize(" - : ").as_deref(), None);
    }

    #[test]
    fn test_normalize_min_length() {
        let n = normalizer();
        assert_eq!(n.normalize("AB"), None);
        assert_eq!(n.normalize("MIT").as_deref(), Some("MIT"));
        assert_eq!(InstitutionNormalizer::new(4, &["Vietnam"]).normalize("MIT"), None);
    }

    #[test]
    fn test_strips_trailing_country() {
        let n = normalizer();
        assert_eq!(
            n.normalize("Hanoi University, Vietnam").as_deref(),
            Some("Hanoi University")
        );
        assert_eq!(
            n.normalize("Can Tho University VIETNAM").as_deref(),
            Some("Can Tho University")
        );
        // Only a trailing token is stripped
        assert_eq!(
            n.normalize("Vietnam National University").as_deref(),
            Some("Vietnam National University")
        );
        assert_eq!(n.normalize("Vietnam").as_deref(), Some("Vietnam"));
    }

    #[test]
    fn test_no_country_list() {
        let n = InstitutionNormalizer::new::<&str>(3, &[]);
        assert_eq!(
            n.normalize("Hanoi University, Vietnam").as_deref(),
            Some("Hanoi University, Vietnam")
        );
    }

    #[test]
    fn test_sub_unit_detection() {
        assert!(is_sub_unit("Department of Physics"));
        assert!(is_sub_unit("dept. of Chemistry"));
        assert!(is_sub_unit("Faculty of Medicine"));
        assert!(!is_sub_unit("Faculty Club"));
        assert!(!is_sub_unit("Alpha University"));
    }

    #[test]
    fn test_plausibility_requires_keyword_after_sub_unit() {
        assert!(!is_plausible_institution("Department of Physics"));
        assert!(!is_plausible_institution("Faculty of Medicine"));
        assert!(is_plausible_institution("Department of Physics, Hanoi University"));
        assert!(is_plausible_institution("Beta Institute"));
        assert_eq!(normalizer().institution("Division of Surgery"), None);
    }

    #[test]
    fn test_best_fragment_prefers_university() {
        let n = normalizer();
        let text = "Department of Biology; National Institute of Health, Hanoi Medical University";
        assert_eq!(n.best_fragment(text).as_deref(), Some("Hanoi Medical University"));
    }

    #[test]
    fn test_best_fragment_keyword_then_longest() {
        let n = normalizer();
        assert_eq!(
            n.best_fragment("Department of Biology, Pasteur Institute, Paris").as_deref(),
            Some("Pasteur Institute")
        );
        assert_eq!(
            n.best_fragment("Fig. 3 shows the whole thing\nAcme Bio Labs Incorporated\nParis")
                .as_deref(),
            Some("Acme Bio Labs Incorporated")
        );
    }

    #[test]
    fn test_best_fragment_last_resort() {
        let n = normalizer();
        assert_eq!(n.best_fragment("Paris, Acme Labs").as_deref(), Some("Acme Labs"));
        assert_eq!(n.best_fragment("Department of Physics"), None);
        assert_eq!(n.best_fragment("Paris"), None);
    }

    #[test]
    fn test_figure_label() {
        assert!(is_figure_label("Fig. 2 results"));
        assert!(is_figure_label("Table 1"));
        assert!(!is_figure_label("Tabriz University"));
    }
}
