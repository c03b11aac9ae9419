//! Optional TOML defaults for the `cat` command.
//!
//! ```toml
//! [cat]
//! use_first = true
//! sort_output = true
//! less_than = 2
//! location = false
//! to_code = "ISO-8859-1"
//! output_syntax = "json"
//! directory = ["po", "vendor/po"]
//! ```
//!
//! Every key is optional; command-line flags win over file values.

use std::path::{Path, PathBuf};

use pocat::{CatOptions, OutputSyntax};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub cat: CatConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatConfig {
    pub more_than: Option<usize>,
    pub less_than: Option<usize>,
    pub unique: Option<bool>,
    pub use_first: Option<bool>,
    pub sort_output: Option<bool>,
    pub sort_by_file: Option<bool>,
    pub location: Option<bool>,
    pub to_code: Option<String>,
    pub output_syntax: Option<OutputSyntax>,
    #[serde(default)]
    pub directory: Vec<PathBuf>,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("Invalid configuration: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        Self::from_toml_str(&text)
    }
}

impl CatConfig {
    /// Applies the configured values on top of `options`.
    pub fn apply(&self, mut options: CatOptions) -> CatOptions {
        if let Some(more_than) = self.more_than {
            options = options.with_more_than(more_than);
        }
        if let Some(less_than) = self.less_than {
            options = options.with_less_than(less_than);
        }
        if self.unique == Some(true) {
            options = options.with_unique();
        }
        if let Some(use_first) = self.use_first {
            options = options.with_use_first(use_first);
        }
        if let Some(sort_output) = self.sort_output {
            options = options.with_sort_by_msgid(sort_output);
        }
        if let Some(sort_by_file) = self.sort_by_file {
            options = options.with_sort_by_file(sort_by_file);
        }
        if let Some(location) = self.location {
            options = options.with_location(location);
        }
        if self.to_code.is_some() {
            options = options.with_to_code(self.to_code.clone());
        }
        if let Some(syntax) = self.output_syntax {
            options = options.with_output_syntax(syntax);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(indoc! {r#"
            [cat]
            use_first = true
            sort_output = true
            less_than = 2
            location = false
            to_code = "ISO-8859-1"
            output_syntax = "json"
            directory = ["po"]
        "#})
        .unwrap();

        let options = config.cat.apply(CatOptions::new());
        assert!(options.use_first);
        assert!(options.sort_by_msgid);
        assert!(!options.location);
        assert_eq!(options.less_than, 2);
        assert_eq!(options.to_code.as_deref(), Some("ISO-8859-1"));
        assert_eq!(config.cat.directory, vec![PathBuf::from("po")]);
    }

    #[test]
    fn test_empty_config_changes_nothing() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.cat.apply(CatOptions::new()), CatOptions::new());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Config::from_toml_str("[cat]\nsort_by_name = true\n").unwrap_err();
        assert!(err.contains("Invalid configuration"));
    }
}
