//! Excel/ODS file reader using calamine

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::iter;
use std::path::{Path, PathBuf};

use crate::error::{ExtractError, ExtractResult};

pub mod workbook;

pub use workbook::{CellValue, Row, Sheet};

/// Whole floats up to this magnitude are stored as integers (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// An open workbook handle
///
/// The file stays open for the lifetime of the handle; sheets are
/// materialized one at a time through [`Workbook::read_sheet`].
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl Workbook {
    /// Open a workbook, detecting the format from the file extension
    pub fn open<P: AsRef<Path>>(path: P) -> ExtractResult<Self> {
        let path = path.as_ref();
        let sheets: Sheets<_> =
            open_workbook_auto(path).map_err(|source| ExtractError::WorkbookOpen {
                path: path.to_path_buf(),
                source,
            })?;
        let sheet_names = sheets.sheet_names();
        log::debug!(
            "Opened workbook {} with {} sheet(s)",
            path.display(),
            sheet_names.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
            sheet_names,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get all sheet names in workbook order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Read a sheet into header columns and data rows
    pub fn read_sheet(&mut self, name: &str) -> ExtractResult<Sheet> {
        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|source| ExtractError::SheetRead {
                sheet: name.to_string(),
                source,
            })?;
        let sheet = parse_sheet(name, &range);
        log::debug!(
            "Read sheet '{}': {} column(s), {} row(s)",
            name,
            sheet.columns.len(),
            sheet.rows.len()
        );
        Ok(sheet)
    }
}

/// Convert a cell range into a sheet, using the first row as header
///
/// The used range may start right of column A; the skipped leading columns
/// are kept as blank columns so the column set matches the sheet layout.
pub fn parse_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let mut rows = range.rows();

    let Some(header) = rows.next() else {
        return sheet;
    };
    let lead = range.start().map_or(0, |(_, col)| col as usize);
    let padded: Vec<Data> = iter::repeat(Data::Empty)
        .take(lead)
        .chain(header.iter().cloned())
        .collect();
    sheet.columns = header_names(&padded);

    for raw in rows {
        let row: Row = sheet
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let value = idx
                    .checked_sub(lead)
                    .and_then(|rel| raw.get(rel))
                    .map(parse_cell_value)
                    .unwrap_or_default();
                (column.clone(), value)
            })
            .collect();
        sheet.rows.push(row);
    }

    sheet
}

/// Build unique column names from the header row
///
/// Blank headers become `Unnamed: <index>` and repeated names get a `.N`
/// suffix in order of appearance.
fn header_names(cells: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(cells.len());

    for (idx, cell) in cells.iter().enumerate() {
        let text = header_text(cell);
        let base = if text.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            text
        };

        let mut name = base.clone();
        let mut suffix = 0;
        while seen.contains(&name) {
            suffix += 1;
            name = format!("{}.{}", base, suffix);
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => parse_cell_value(other).to_string(),
    }
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => number_value(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => {
            if dt.is_duration() {
                CellValue::Duration(format_duration(dt.as_f64()))
            } else {
                match dt.as_datetime() {
                    Some(ndt) => CellValue::DateTime(ndt.to_string()),
                    None => number_value(dt.as_f64()),
                }
            }
        }
        Data::DateTimeIso(s) => CellValue::DateTime(s.replacen('T', " ", 1)),
        Data::DurationIso(s) => CellValue::Duration(s.clone()),
    }
}

fn number_value(f: f64) -> CellValue {
    if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER {
        CellValue::Integer(f as i64)
    } else {
        CellValue::Number(f)
    }
}

/// Format a duration expressed in days as `D days HH:MM:SS`
fn format_duration(days: f64) -> String {
    let sign = if days < 0.0 { "-" } else { "" };
    // Float to int casts saturate, so huge values clamp to u64::MAX
    let total = (days.abs() * 86_400.0).round() as u64;
    format!(
        "{}{} days {:02}:{:02}:{:02}",
        sign,
        total / 86_400,
        (total % 86_400) / 3_600,
        (total % 3_600) / 60,
        total % 60
    )
}
