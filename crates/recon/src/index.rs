use crate::config::OrdinalConfig;
use crate::table::{CellValue, Table};

/// Re-number a result table.
///
/// Any existing ordinal column (alias, configured header, or a `.1` copy of
/// either) is dropped and a fresh ordinal column
/// (`ordinal.header`) is inserted first, reading `1..=N` in row order.
/// The input is left untouched.
pub fn reindex(table: &Table, ordinal: &OrdinalConfig) -> Table {
    let keep: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !ordinal.is_ordinal_column(h))
        .map(|(i, _)| i)
        .collect();

    let mut headers = Vec::with_capacity(keep.len() + 1);
    headers.push(ordinal.header.clone());
    headers.extend(keep.iter().map(|&i| table.headers[i].clone()));

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(n, row)| {
            let mut out = Vec::with_capacity(keep.len() + 1);
            out.push(CellValue::Number((n + 1) as f64));
            out.extend(keep.iter().map(|&i| row.get(i).cloned().unwrap_or(CellValue::Empty)));
            out
        })
        .collect();

    Table { headers, rows }
}
