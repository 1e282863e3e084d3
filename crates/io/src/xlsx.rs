// Excel roster import (xlsx, xlsm, xls, xlsb, ods)
//
// Import is one-way: a worksheet becomes a Table whose first non-empty row
// is the header row. Styling, formulas and merged regions are not read;
// formula cells contribute their cached values.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use rollcall_recon::table::format_number;
use rollcall_recon::{CellValue, Table};

use crate::error::IoError;
use crate::unique_headers;

fn open(path: &Path) -> Result<Sheets<std::io::BufReader<std::fs::File>>, IoError> {
    open_workbook_auto(path).map_err(|e| IoError::Format {
        path: path.to_path_buf(),
        message: format!("Failed to open Excel file: {e}"),
    })
}

/// Sheet names in workbook order.
pub fn list_sheets(path: &Path) -> Result<Vec<String>, IoError> {
    let workbook = open(path)?;
    Ok(workbook.sheet_names().to_vec())
}

/// Read one worksheet as a table. `None` selects the first sheet.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<Table, IoError> {
    let mut workbook = open(path)?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();

    let sheet_name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|s| s.as_str() == wanted)
            .cloned()
            .ok_or_else(|| IoError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: wanted.to_string(),
                available: sheet_names.clone(),
            })?,
        None => sheet_names.first().cloned().ok_or_else(|| IoError::Format {
            path: path.to_path_buf(),
            message: "Excel file contains no sheets".into(),
        })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IoError::Format {
            path: path.to_path_buf(),
            message: format!("Failed to read sheet '{sheet_name}': {e}"),
        })?;

    let table = table_from_range(&range);
    log::debug!(
        "read {} rows x {} columns from '{}' in {}",
        table.len(),
        table.width(),
        sheet_name,
        path.display()
    );
    Ok(table)
}

/// Convert a calamine range: first non-empty row is the header. Fully
/// empty rows are skipped wherever they occur, as in the CSV reader.
pub fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows().filter(|row| !row.iter().all(is_blank));

    let Some(header_row) = rows.next() else {
        return Table::default();
    };

    let headers = unique_headers(
        header_row
            .iter()
            .map(|d| cell_from_data(d).to_string())
            .collect(),
    );
    let data = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Table::new(headers, data)
}

fn is_blank(data: &Data) -> bool {
    match data {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Map a calamine cell onto the tagged cell model.
pub fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        // Store as TRUE/FALSE text, the way Excel displays it
        Data::Bool(b) => CellValue::text(if *b { "TRUE" } else { "FALSE" }),
        // Excel's own spelling: #DIV/0!, #N/A, #REF!
        Data::Error(e) => CellValue::text(e.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if value.time() == chrono::NaiveTime::MIN => {
                CellValue::text(value.format("%Y-%m-%d").to_string())
            }
            Some(value) => CellValue::text(value.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::text(format_number(dt.as_f64())),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}
