//! Console rendering of sheets

use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use crate::reader::Sheet;

/// Header line written before each sheet's table
pub fn sheet_header(name: &str) -> String {
    format!("--- SHEET: {} ---", name)
}

/// Print a sheet: header line, table, blank separator line
pub fn report<W: Write>(out: &mut W, sheet: &Sheet) -> io::Result<()> {
    writeln!(out, "{}", sheet_header(&sheet.name))?;
    writeln!(out, "{}", render_table(sheet))?;
    writeln!(out)?;
    out.flush()
}

/// Render all rows of a sheet as an aligned text table
///
/// The first column is the 0-based row index (left aligned), value columns
/// are right aligned and separated by two spaces. No row is ever elided.
pub fn render_table(sheet: &Sheet) -> String {
    if sheet.is_empty() {
        return format!(
            "Empty DataFrame\nColumns: [{}]\nIndex: []",
            sheet.columns.join(", ")
        );
    }

    let index: Vec<String> = (0..sheet.rows.len()).map(|i| i.to_string()).collect();
    let index_width = index.iter().map(|s| s.width()).max().unwrap_or(0);

    let cells: Vec<Vec<String>> = sheet
        .rows
        .iter()
        .map(|row| {
            sheet
                .columns
                .iter()
                .map(|column| row.get(column).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = sheet
        .columns
        .iter()
        .enumerate()
        .map(|(col, name)| {
            cells
                .iter()
                .map(|row| row[col].width())
                .chain(std::iter::once(name.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 1);

    let mut header = " ".repeat(index_width);
    for (name, width) in sheet.columns.iter().zip(&widths) {
        header.push_str("  ");
        header.push_str(&pad_left(name, *width));
    }
    lines.push(header.trim_end().to_string());

    for (label, row) in index.iter().zip(&cells) {
        let mut line = pad_right(label, index_width);
        for (value, width) in row.iter().zip(&widths) {
            line.push_str("  ");
            line.push_str(&pad_left(value, *width));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(fill), s)
}

fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{CellValue, Row};

    fn sheet(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Sheet {
        let mut sheet = Sheet::new("Test");
        sheet.columns = columns.iter().map(|c| c.to_string()).collect();
        for values in rows {
            let row: Row = sheet.columns.iter().cloned().zip(values).collect();
            sheet.rows.push(row);
        }
        sheet
    }

    #[test]
    fn test_render_aligned_table() {
        let sheet = sheet(
            &["Team", "Pts"],
            vec![
                vec![CellValue::Text("X".to_string()), CellValue::Integer(3)],
                vec![CellValue::Text("Longer".to_string()), CellValue::Integer(12)],
            ],
        );

        let expected = "     Team  Pts\n\
                        0       X    3\n\
                        1  Longer   12";
        assert_eq!(render_table(&sheet), expected);
    }

    #[test]
    fn test_render_empty_sheet() {
        let sheet = sheet(&["Team", "Pts"], vec![]);
        assert_eq!(
            render_table(&sheet),
            "Empty DataFrame\nColumns: [Team, Pts]\nIndex: []"
        );

        let sheet = Sheet::new("Blank");
        assert_eq!(render_table(&sheet), "Empty DataFrame\nColumns: []\nIndex: []");
    }

    #[test]
    fn test_render_missing_values_as_nan() {
        let sheet = sheet(&["A"], vec![vec![CellValue::Empty]]);
        assert_eq!(render_table(&sheet), "     A\n0  NaN");
    }

    #[test]
    fn test_index_width_grows() {
        let rows = (0..11).map(|i| vec![CellValue::Integer(i)]).collect();
        let table = render_table(&sheet(&["N"], rows));
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "     N");
        assert_eq!(lines[1], "0    0");
        assert_eq!(lines[11], "10  10");
    }

    #[test]
    fn test_wide_characters_align() {
        let sheet = sheet(&["Équipo"], vec![vec![CellValue::Text("日本".to_string())]]);
        assert_eq!(render_table(&sheet), "   Équipo\n0    日本");
    }

    #[test]
    fn test_report_layout() {
        let sheet = sheet(&["Team"], vec![vec![CellValue::Text("X".to_string())]]);
        let mut out = Vec::new();
        report(&mut out, &sheet).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "--- SHEET: Test ---\n   Team\n0     X\n\n");
    }
}
