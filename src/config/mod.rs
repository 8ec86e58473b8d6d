//! Configuration management.
//!
//! Settings come from an optional TOML file layered with environment
//! variables prefixed `RESEARCH_RANK` (nested keys use `__`, e.g.
//! `RESEARCH_RANK_EXTRACTION__VENUE_FALLBACK=false`).

mod file_config;

pub use file_config::{write_default_config, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Institution/field extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Chart and table layout
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Shortest accepted institution name, in characters, after trimming
    #[serde(default = "default_min_institution_length")]
    pub min_institution_length: usize,

    /// Fall back to the venue/journal name when nothing else is found
    #[serde(default = "default_true")]
    pub venue_fallback: bool,

    /// Trailing country tokens stripped from institution names
    #[serde(default = "default_strip_countries")]
    pub strip_countries: Vec<String>,

    /// Name credited when a paper has affiliations but no resolvable authors
    #[serde(default = "default_placeholder_author")]
    pub placeholder_author: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_institution_length: default_min_institution_length(),
            venue_fallback: true,
            strip_countries: default_strip_countries(),
            placeholder_author: default_placeholder_author(),
        }
    }
}

fn default_min_institution_length() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_strip_countries() -> Vec<String> {
    vec!["Vietnam".to_string()]
}

fn default_placeholder_author() -> String {
    "(unknown author)".to_string()
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Rows per ranking table page
    #[serde(default = "default_table_page_size")]
    pub table_page_size: usize,

    /// Bars per chart page
    #[serde(default = "default_chart_page_size")]
    pub chart_page_size: usize,

    /// Numbered page links shown around the current page
    #[serde(default = "default_page_links")]
    pub page_links: usize,

    /// Fields listed in the institution detail summary
    #[serde(default = "default_top_fields")]
    pub top_fields: usize,

    /// Width of the longest chart bar, in cells
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            table_page_size: default_table_page_size(),
            chart_page_size: default_chart_page_size(),
            page_links: default_page_links(),
            top_fields: default_top_fields(),
            bar_width: default_bar_width(),
        }
    }
}

fn default_table_page_size() -> usize {
    100
}

fn default_chart_page_size() -> usize {
    10
}

fn default_page_links() -> usize {
    5
}

fn default_top_fields() -> usize {
    6
}

fn default_bar_width() -> usize {
    40
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"json"` for structured output; anything else uses the plain formatter
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_source())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from environment variables and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(env_source())
        .build()?
        .try_deserialize()
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("RESEARCH_RANK")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("extraction.strip_countries")
        .try_parsing(true)
}

/// Per-user configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("research-rank").join("config.toml"))
}

/// Find a configuration file in the default locations
pub fn find_config_file() -> Option<PathBuf> {
    default_config_path()
        .into_iter()
        .chain(std::iter::once(PathBuf::from("research-rank.toml")))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.extraction.venue_fallback);
        assert_eq!(config.extraction.min_institution_length, 3);
        assert_eq!(config.display.table_page_size, 100);
        assert_eq!(config.display.chart_page_size, 10);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[extraction]
venue_fallback = false
strip_countries = ["Vietnam", "Japan"]

[display]
chart_page_size = 20

[logging]
format = "json"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(!config.extraction.venue_fallback);
        assert_eq!(config.extraction.strip_countries, vec!["Vietnam", "Japan"]);
        assert_eq!(config.extraction.min_institution_length, 3);
        assert_eq!(config.display.chart_page_size, 20);
        assert_eq!(config.display.table_page_size, 100);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_config(Path::new("/nonexistent/research-rank.toml")).is_err());
    }
}
