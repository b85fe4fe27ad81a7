//! # Configuration
//!
//! Optional TOML file with reader limits and output defaults.
//!
//! ```toml
//! [limits]
//! max_document_bytes = 1048576
//! max_included_resources = 5000
//!
//! [output]
//! json = true
//! ```
//!
//! Lookup order: `--config <path>` (must exist), then `jsonapi-inspect.toml`
//! in the working directory, then built-in defaults.

use crate::error::InspectError;
use jsonapi_reader::ParseOptions;
use serde::Deserialize;
use std::path::Path;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "jsonapi-inspect.toml";

/// Output defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print JSON instead of text.
    pub json: bool,
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: ParseOptions,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from an explicit path or the default location.
    pub fn load(explicit: Option<&Path>) -> Result<Self, InspectError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            return Self::from_file(default_path);
        }

        tracing::debug!("no configuration file, using defaults");
        Ok(Self::default())
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, InspectError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            InspectError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)
            .map_err(|e| InspectError::Config(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, InspectError> {
        toml::from_str(text).map_err(|e| InspectError::Config(e.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml_str("").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.limits, ParseOptions::default());
    }

    #[test]
    fn partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [limits]
            max_included_resources = 10

            [output]
            json = true
            "#,
        )
        .expect("parse");

        assert_eq!(config.limits.max_included_resources, 10);
        assert_eq!(
            config.limits.max_document_bytes,
            ParseOptions::default().max_document_bytes
        );
        assert!(config.output.json);
    }

    #[test]
    fn invalid_toml_rejected() {
        let result = Config::from_toml_str("[limits\nmax = ");
        assert!(matches!(result, Err(InspectError::Config(_))));
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = Config::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(InspectError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[output]\njson = true\n").expect("write");

        let config = Config::load(Some(&path)).expect("load");
        assert!(config.output.json);
    }
}
