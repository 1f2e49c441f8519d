//! Workbook-wide collection of sheet records

use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{ExtractError, ExtractResult};
use crate::reader::Row;

/// Mapping from sheet name to its rows, in the order sheets were added
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Aggregate {
    sheets: IndexMap<String, Vec<Row>>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sheet's rows. Adding an existing name replaces its rows but
    /// keeps its original position.
    pub fn add(&mut self, sheet_name: impl Into<String>, rows: Vec<Row>) {
        let sheet_name = sheet_name.into();
        if self.sheets.insert(sheet_name.clone(), rows).is_some() {
            log::debug!("Replaced rows of sheet '{}' in aggregate", sheet_name);
        }
    }

    pub fn get(&self, sheet_name: &str) -> Option<&[Row]> {
        self.sheets.get(sheet_name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Sheet names in insertion order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Row])> {
        self.sheets.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total number of rows across all sheets
    pub fn total_rows(&self) -> usize {
        self.sheets.values().map(Vec::len).sum()
    }

    /// Serialize the aggregate as pretty-printed JSON
    pub fn to_json(&self) -> ExtractResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the aggregate to a JSON file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> ExtractResult<()> {
        let path = path.as_ref();
        let mut json = self.to_json()?;
        json.push('\n');
        fs::write(path, json).map_err(|source| ExtractError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Wrote {} sheet(s) to {}",
            self.sheets.len(),
            path.display()
        );
        Ok(())
    }
}
