//! Paper record model for heterogeneous dataset entries.
//!
//! Datasets come from several exporter variants that disagree on attribute
//! names and value shapes. [`PaperRecord`] keeps the raw JSON object and
//! exposes lenient accessors that coalesce those variants; nothing here fails
//! on missing or oddly-typed attributes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One author entry: either a bare name or an object carrying a `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorEntry {
    Name(String),
    Structured { name: String },
}

impl AuthorEntry {
    /// Returns the author's name as written in the record
    pub fn name(&self) -> &str {
        match self {
            AuthorEntry::Name(name) => name,
            AuthorEntry::Structured { name } => name,
        }
    }
}

/// One field-of-study entry: a plain label or a tagged category object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldEntry {
    Label(String),
    Category {
        #[serde(alias = "label", alias = "name")]
        category: String,
    },
}

impl FieldEntry {
    pub fn label(&self) -> &str {
        match self {
            FieldEntry::Label(label) => label,
            FieldEntry::Category { category } => category,
        }
    }
}

/// Attributes that may carry a paper's fields of study, in lookup order
const FIELD_ATTRIBUTES: &[&str] = &[
    "api_fieldsOfStudy",
    "fieldsOfStudy",
    "s2FieldsOfStudy",
    "fields",
    "field",
];

/// A single paper as found in a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperRecord {
    raw: Map<String, Value>,
}

impl PaperRecord {
    /// Wrap a JSON value. Anything other than an object yields an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(raw) => Self { raw },
            other => {
                tracing::warn!(
                    "Ignoring paper entry that is not a JSON object: {}",
                    json_kind(&other)
                );
                Self::default()
            }
        }
    }

    /// The raw attribute map
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Returns true when the record carries no attributes at all
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Paper identifier (`corpusid`, `corpusId` or `id`), rendered as a string
    pub fn id(&self) -> Option<String> {
        ["corpusid", "corpusId", "id"]
            .iter()
            .filter_map(|key| self.raw.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// Paper title (`title` or `api_title`)
    pub fn title(&self) -> Option<&str> {
        ["title", "api_title"]
            .iter()
            .filter_map(|key| self.raw.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    /// Structured author list (`api_authors` or `authors`).
    ///
    /// Returns `None` when neither attribute is an array. Entries that are
    /// neither a string nor a name-bearing object are skipped.
    pub fn structured_authors(&self) -> Option<Vec<AuthorEntry>> {
        let list = ["api_authors", "authors"]
            .iter()
            .find_map(|key| self.raw.get(*key).and_then(Value::as_array))?;

        Some(
            list.iter()
                .filter_map(|entry| serde_json::from_value::<AuthorEntry>(entry.clone()).ok())
                .collect(),
        )
    }

    /// Per-author affiliation strings aligned with the author list
    /// (`content.annotations.authoraffiliation`).
    pub fn positional_affiliations(&self) -> Option<Vec<String>> {
        self.annotation_strings("authoraffiliation")
    }

    /// Free-text author blocks (`content.annotations.author`): the first line
    /// names the author, any following lines describe the affiliation.
    pub fn author_blocks(&self) -> Option<Vec<String>> {
        self.annotation_strings("author")
    }

    /// Pre-extracted institution candidates (`matched_strings`)
    pub fn matched_strings(&self) -> Option<Vec<String>> {
        self.raw.get("matched_strings").and_then(string_array)
    }

    /// Publication venue or journal name
    pub fn venue(&self) -> Option<&str> {
        ["api_journal", "api_venue", "venue", "journal"]
            .iter()
            .filter_map(|key| self.raw.get(*key))
            .find_map(|value| match value {
                Value::String(s) => Some(s.as_str()),
                Value::Object(obj) => obj.get("name").and_then(Value::as_str),
                _ => None,
            })
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Field-of-study entries from the first recognized attribute that holds any.
    pub fn field_entries(&self) -> Vec<FieldEntry> {
        for key in FIELD_ATTRIBUTES {
            let entries = match self.raw.get(*key) {
                Some(Value::String(s)) => vec![FieldEntry::Label(s.clone())],
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|item| serde_json::from_value::<FieldEntry>(item.clone()).ok())
                    .collect(),
                Some(value @ Value::Object(_)) => serde_json::from_value::<FieldEntry>(value.clone())
                    .ok()
                    .into_iter()
                    .collect(),
                _ => Vec::new(),
            };
            if !entries.is_empty() {
                return entries;
            }
        }
        Vec::new()
    }

    fn annotation_strings(&self, key: &str) -> Option<Vec<String>> {
        self.raw
            .get("content")
            .and_then(|content| content.get("annotations"))
            .and_then(|annotations| annotations.get(key))
            .and_then(string_array)
    }
}

impl From<Value> for PaperRecord {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Read an array of strings, keeping positions: non-string entries become "".
fn string_array(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| {
        items
            .iter()
            .map(|item| item.as_str().unwrap_or_default().to_string())
            .collect()
    })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builder for constructing paper records in the common dataset layout
#[derive(Debug, Clone, Default)]
pub struct PaperRecordBuilder {
    raw: Map<String, Value>,
}

impl PaperRecordBuilder {
    /// Create a new builder with an identifier
    pub fn new(id: impl Into<String>) -> Self {
        let mut raw = Map::new();
        raw.insert("corpusid".to_string(), Value::String(id.into()));
        Self { raw }
    }

    /// Set title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.raw.insert("title".to_string(), Value::String(title.into()));
        self
    }

    /// Set structured authors (`api_authors`) as `{name}` objects
    pub fn authors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = names
            .into_iter()
            .map(|name| serde_json::json!({ "name": name.into() }))
            .collect();
        self.raw.insert("api_authors".to_string(), Value::Array(list));
        self
    }

    /// Set per-author affiliation strings
    pub fn affiliations<I, S>(self, affiliations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotation("authoraffiliation", affiliations)
    }

    /// Set free-text author blocks
    pub fn author_blocks<I, S>(self, blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotation("author", blocks)
    }

    /// Set matched strings
    pub fn matched_strings<I, S>(mut self, strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw
            .insert("matched_strings".to_string(), strings_value(strings));
        self
    }

    /// Set journal name
    pub fn journal(mut self, name: impl Into<String>) -> Self {
        self.raw.insert(
            "api_journal".to_string(),
            serde_json::json!({ "name": name.into() }),
        );
        self
    }

    /// Set fields of study (`api_fieldsOfStudy`)
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw
            .insert("api_fieldsOfStudy".to_string(), strings_value(fields));
        self
    }

    /// Add an arbitrary attribute
    pub fn attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.raw.insert(key.into(), value);
        self
    }

    /// Build the record
    pub fn build(self) -> PaperRecord {
        PaperRecord { raw: self.raw }
    }

    fn annotation<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let content = self
            .raw
            .entry("content".to_string())
            .or_insert_with(|| serde_json::json!({ "annotations": {} }));
        if let Some(annotations) = content
            .as_object_mut()
            .map(|c| c.entry("annotations".to_string()).or_insert_with(|| Value::Object(Map::new())))
            .and_then(Value::as_object_mut)
        {
            annotations.insert(key.to_string(), strings_value(values));
        }
        self
    }
}

fn strings_value<I, S>(values: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(values.into_iter().map(|s| Value::String(s.into())).collect())
}
