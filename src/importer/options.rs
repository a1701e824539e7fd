//! Import options and their TOML configuration file

use super::error::ImportError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for HTML list import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Context used to resolve relative references (None = the input path)
    #[serde(default)]
    pub file_context: Option<String>,

    /// Pretty-print the produced JSON
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Convert item content in inline mode
    #[serde(default = "default_true")]
    pub inline: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            file_context: None,
            pretty: true,
            inline: true,
        }
    }
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file context
    pub fn with_file_context(mut self, file_context: &str) -> Self {
        self.file_context = Some(file_context.to_string());
        self
    }

    /// Set JSON pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Read options from the `[import]` table of a TOML document.
    ///
    /// A document without that table yields the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ImportError> {
        let full_config: toml::Value = toml::from_str(content)?;
        match full_config.get("import") {
            Some(section) => Ok(section.clone().try_into()?),
            None => Ok(Self::default()),
        }
    }

    /// Load options from a configuration file
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ImportOptions::default();
        assert_eq!(opts.file_context, None);
        assert!(opts.pretty);
        assert!(opts.inline);
    }

    #[test]
    fn test_options_builder() {
        let opts = ImportOptions::new()
            .with_file_context("https://wiki.example.com/")
            .with_pretty(false);
        assert_eq!(
            opts.file_context.as_deref(),
            Some("https://wiki.example.com/")
        );
        assert!(!opts.pretty);
    }

    #[test]
    fn test_from_toml_partial_section() {
        let opts = ImportOptions::from_toml_str("[import]\npretty = false\n").unwrap();
        assert!(!opts.pretty);
        assert!(opts.inline);
        assert_eq!(opts.file_context, None);
    }

    #[test]
    fn test_from_toml_without_section() {
        let opts = ImportOptions::from_toml_str("[other]\nkey = 1\n").unwrap();
        assert_eq!(opts, ImportOptions::default());
    }

    #[test]
    fn test_from_toml_rejects_wrong_types() {
        let err = ImportOptions::from_toml_str("[import]\npretty = \"yes\"\n").unwrap_err();
        assert!(matches!(err, ImportError::Config(_)));
    }
}
