//! Dataset loading and shape normalization.
//!
//! Three top-level layouts are accepted and flattened into one ordered
//! sequence of [`PaperRecord`]s:
//!
//! ```text
//! [ {paper}, {paper}, ... ]                 flat array
//! { "results": [ {paper}, ... ] }           results wrapper
//! { "<id>": {paper}, "<id>": {paper}, ... } object keyed by id
//! ```

use std::path::Path;

use serde_json::Value;

use super::paper::{json_kind, PaperRecord};

/// Errors raised while reading a dataset file
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported dataset layout: top-level {0}")]
    UnsupportedLayout(&'static str),
}

/// An ordered, immutable collection of paper records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    papers: Vec<PaperRecord>,
    fingerprint: String,
}

impl Dataset {
    /// Build a dataset from already-parsed records
    pub fn new(papers: Vec<PaperRecord>) -> Self {
        let fingerprint = fingerprint_records(&papers);
        Self {
            papers,
            fingerprint,
        }
    }

    /// Normalize any supported top-level JSON layout into a dataset.
    ///
    /// `null` yields an empty dataset; scalars and strings are rejected.
    pub fn from_value(value: Value) -> Result<Self, DatasetError> {
        let papers = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items.into_iter().map(PaperRecord::from_value).collect(),
            Value::Object(mut obj) if matches!(obj.get("results"), Some(Value::Array(_))) => {
                match obj.remove("results") {
                    Some(Value::Array(items)) => {
                        items.into_iter().map(PaperRecord::from_value).collect()
                    }
                    _ => Vec::new(),
                }
            }
            Value::Object(obj) => obj
                .into_iter()
                .map(|(_, v)| PaperRecord::from_value(v))
                .collect(),
            other => return Err(DatasetError::UnsupportedLayout(json_kind(&other))),
        };

        tracing::debug!("Normalized dataset with {} records", papers.len());
        Ok(Self::new(papers))
    }

    /// Parse a dataset from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Load a dataset from a JSON file
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded {} papers from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Records in original order
    pub fn papers(&self) -> &[PaperRecord] {
        &self.papers
    }

    /// MD5 digest of the canonical record JSON; identifies the collection
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

impl From<Vec<PaperRecord>> for Dataset {
    fn from(papers: Vec<PaperRecord>) -> Self {
        Self::new(papers)
    }
}

fn fingerprint_records(papers: &[PaperRecord]) -> String {
    let mut context = md5::Context::new();
    for paper in papers {
        // Serializing a map of JSON values cannot fail.
        if let Ok(bytes) = serde_json::to_vec(paper) {
            context.consume(&bytes);
        }
        context.consume(b"\n");
    }
    format!("{:x}", context.compute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ids(dataset: &Dataset) -> Vec<String> {
        dataset
            .papers()
            .iter()
            .filter_map(|p| p.id())
            .collect()
    }

    #[test]
    fn test_flat_array() {
        let dataset = Dataset::from_value(json!([{ "id": "a" }, { "id": "b" }])).unwrap();
        assert_eq!(ids(&dataset), vec!["a", "b"]);
    }

    #[test]
    fn test_results_wrapper() {
        let dataset =
            Dataset::from_value(json!({ "results": [{ "id": "x" }, { "id": "y" }] })).unwrap();
        assert_eq!(ids(&dataset), vec!["x", "y"]);
    }

    #[test]
    fn test_object_keyed_by_id_keeps_document_order() {
        let dataset = Dataset::from_json_str(
            r#"{ "p9": { "id": "p9" }, "p1": { "id": "p1" }, "p5": { "id": "p5" } }"#,
        )
        .unwrap();
        assert_eq!(ids(&dataset), vec!["p9", "p1", "p5"]);
    }

    #[test]
    fn test_null_is_empty() {
        assert!(Dataset::from_value(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_is_rejected() {
        let err = Dataset::from_value(json!("papers")).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedLayout("string")));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Dataset::from_json_str("{ not json"),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = Dataset::from_value(json!([{ "id": "a" }])).unwrap();
        let a_again = Dataset::from_value(json!([{ "id": "a" }])).unwrap();
        let b = Dataset::from_value(json!([{ "id": "b" }])).unwrap();
        assert_eq!(a.fingerprint(), a_again.fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "results": [{ "corpusid": 7 }] }"#).unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(ids(&dataset), vec!["7"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Dataset::load(Path::new("/nonexistent/data.json"));
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }
}
