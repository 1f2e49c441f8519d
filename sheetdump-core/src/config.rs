//! Configuration for an extraction run

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExtractError, ExtractResult};

/// Workbook loaded when no path is configured
pub const DEFAULT_WORKBOOK: &str = "FASE DE GRUPOS.xlsx";

/// Name of the configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sheetdump.toml";

/// What to do when a single sheet cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetErrorPolicy {
    /// Stop at the first failing sheet
    #[default]
    Abort,
    /// Log the failure and continue with the next sheet
    Skip,
}

/// Main extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Which workbook file to load
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Optional JSON file receiving the aggregate
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Sheets to process (empty means all)
    #[serde(default)]
    pub sheets: Vec<String>,
    #[serde(default)]
    pub on_sheet_error: SheetErrorPolicy,
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_WORKBOOK)
}

impl ExtractConfig {
    /// Configuration for a given workbook, other settings at their defaults
    pub fn for_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ExtractResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ExtractError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> ExtractResult<Self> {
        toml::from_str(content).map_err(|e| ExtractError::Config(e.to_string()))
    }

    /// Check if a sheet is selected for processing
    pub fn is_sheet_selected(&self, sheet_name: &str) -> bool {
        self.sheets.is_empty() || self.sheets.iter().any(|s| s == sheet_name)
    }

    /// Selected sheet names that do not exist in the workbook
    pub fn unknown_sheets<'a>(&'a self, available: &[String]) -> Vec<&'a str> {
        let available: HashSet<&str> = available.iter().map(String::as_str).collect();
        self.sheets
            .iter()
            .map(String::as_str)
            .filter(|s| !available.contains(s))
            .collect()
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            output: None,
            sheets: Vec::new(),
            on_sheet_error: SheetErrorPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.path, PathBuf::from("FASE DE GRUPOS.xlsx"));
        assert_eq!(config.output, None);
        assert_eq!(config.on_sheet_error, SheetErrorPolicy::Abort);
        assert!(config.is_sheet_selected("anything"));
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = ExtractConfig::from_toml("").unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = ExtractConfig::from_toml(
            r#"
            path = "groups.xlsx"
            output = "groups.json"
            sheets = ["Group A"]
            on_sheet_error = "skip"
            "#,
        )
        .unwrap();

        assert_eq!(config.path, PathBuf::from("groups.xlsx"));
        assert_eq!(config.output, Some(PathBuf::from("groups.json")));
        assert_eq!(config.on_sheet_error, SheetErrorPolicy::Skip);
        assert!(config.is_sheet_selected("Group A"));
        assert!(!config.is_sheet_selected("Group B"));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let err = ExtractConfig::from_toml(r#"on_sheet_error = "retry""#).unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }

    #[test]
    fn test_unknown_sheets() {
        let mut config = ExtractConfig::for_path("book.xlsx");
        config.sheets = vec!["Group A".to_string(), "Group Z".to_string()];
        let available = vec!["Group A".to_string(), "Group B".to_string()];
        assert_eq!(config.unknown_sheets(&available), vec!["Group Z"]);
    }

    #[test]
    fn test_from_missing_file() {
        let err = ExtractConfig::from_file("/nonexistent/sheetdump.toml").unwrap_err();
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
