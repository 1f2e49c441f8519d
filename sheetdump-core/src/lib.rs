//! sheetdump-core: read every sheet of a workbook into records
//!
//! A run opens one workbook, reads its sheets in workbook order, prints each
//! one as an aligned table and collects the rows into an [`Aggregate`] that
//! can be written out as JSON.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod reader;
pub mod report;

use std::io::{self, Write};

pub use aggregate::Aggregate;
pub use config::{ExtractConfig, SheetErrorPolicy};
pub use error::{ExtractError, ExtractResult};
pub use reader::{CellValue, Row, Sheet, Workbook};

/// Prefix of the single line printed when a run fails
pub const FAILURE_PREFIX: &str = "Error reading Excel:";

/// Main extraction interface
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Create an extractor with default configuration
    pub fn new() -> Self {
        Self::with_config(ExtractConfig::default())
    }

    /// Create an extractor with custom configuration
    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Run the whole pipeline, printing each sheet to `out`
    ///
    /// Sheets are processed strictly in workbook order. Output already
    /// written for earlier sheets stays written when a later one fails.
    pub fn run<W: Write>(&self, out: &mut W) -> ExtractResult<Aggregate> {
        let mut workbook = Workbook::open(&self.config.path)?;
        let names = workbook.sheet_names().to_vec();

        for unknown in self.config.unknown_sheets(&names) {
            log::warn!(
                "Sheet '{}' not found in {}",
                unknown,
                workbook.path().display()
            );
        }

        let mut aggregate = Aggregate::new();
        let mut skipped = 0usize;

        for name in names.iter().filter(|n| self.config.is_sheet_selected(n)) {
            let sheet = match workbook.read_sheet(name) {
                Ok(sheet) => sheet,
                Err(e)
                    if e.is_sheet_local()
                        && self.config.on_sheet_error == SheetErrorPolicy::Skip =>
                {
                    log::warn!("Skipping sheet '{}': {}", e.sheet().unwrap_or(name.as_str()), e);
                    skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            report::report(out, &sheet)?;
            aggregate.add(sheet.name, sheet.rows);
        }

        log::info!(
            "Processed {} sheet(s), {} row(s), {} skipped",
            aggregate.len(),
            aggregate.total_rows(),
            skipped
        );

        if let Some(output) = &self.config.output {
            aggregate.write_json(output)?;
        }

        Ok(aggregate)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Print the one-line failure message for a run
pub fn report_failure<W: Write>(out: &mut W, err: &ExtractError) -> io::Result<()> {
    writeln!(out, "{} {}", FAILURE_PREFIX, err)?;
    out.flush()
}
