//! Sheet data structures

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// One record of a sheet: column name to cell value, in header order
pub type Row = IndexMap<String, CellValue>;

/// Represents a worksheet after header detection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    /// Column names in header order, already made unique
    pub columns: Vec<String>,
    /// Data rows in source order; every row carries all of `columns`
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a single cell by data row index and column name
    pub fn get_cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

/// Cell value types
///
/// Serialized without a tag, so records come out as plain JSON objects and
/// `Empty` becomes `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Integer(i64),
    Number(f64),
    Text(String),
    Boolean(bool),
    /// Date or datetime rendered as `YYYY-MM-DD HH:MM:SS`
    DateTime(String),
    Duration(String),
    /// Spreadsheet error literal such as `#DIV/0!`
    Error(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, "NaN"),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            CellValue::DateTime(s) | CellValue::Duration(s) | CellValue::Error(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

/// Format a float the way the table printer expects
///
/// Six significant decimals, trailing zeros dropped. Magnitudes above 1e6
/// or below 1e-6 switch to scientific notation with a signed two-digit
/// exponent (`1.000000e+20`).
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = n.abs();
    if abs > 1e6 || (abs > 0.0 && abs < 1e-6) {
        let sci = format!("{:.6e}", n);
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            None => sci,
        };
    }

    let fixed = format!("{:.6}", n);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
