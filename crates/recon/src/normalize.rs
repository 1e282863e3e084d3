use crate::table::{CellValue, Table};

/// Canonical identity key for a raw name cell.
///
/// Stringify, trim, collapse whitespace runs to one space, uppercase.
/// Empty cells give an empty key, which never counts as an identity.
pub fn normalize_key(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => normalize_str(s),
        CellValue::Number(_) => normalize_str(&value.to_string()),
    }
}

/// String form of [`normalize_key`].
pub fn normalize_str(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().map(simple_uppercase));
    }
    out
}

/// One-to-one uppercase mapping. Characters whose uppercase form expands to
/// several characters (e.g. `ß`) are left unchanged.
fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Normalized keys for one column, in row order.
pub fn normalize_column(table: &Table, col: usize) -> Vec<String> {
    table.column(col).map(normalize_key).collect()
}
