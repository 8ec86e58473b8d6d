//! Writing configuration files.
//!
//! # Configuration File Format
//!
//! ```toml
//! [extraction]
//! min_institution_length = 3
//! venue_fallback = true
//! strip_countries = ["Vietnam"]
//! placeholder_author = "(unknown author)"
//!
//! [display]
//! table_page_size = 100
//! chart_page_size = 10
//! page_links = 5
//! top_fields = 6
//! bar_width = 40
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::path::Path;

use super::Config;

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Refusing to overwrite existing file: {0}")]
    Exists(String),
}

impl Config {
    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigFileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

/// Write the default configuration to `path` unless a file already exists there
pub fn write_default_config(path: &Path, force: bool) -> Result<(), ConfigFileError> {
    if path.exists() && !force {
        return Err(ConfigFileError::Exists(path.display().to_string()));
    }
    Config::default().save(path)?;
    tracing::info!("Wrote default configuration to {}", path.display());
    Ok(())
}
