// Roster file I/O: CSV and Excel readers, styled XLSX export

pub mod csv;
pub mod error;
pub mod export;
pub mod theme;
pub mod xlsx;

use std::path::Path;

use rollcall_recon::Table;

pub use error::IoError;
pub use export::{export, to_xlsx_bytes, StyledDocument};
pub use theme::ExportTheme;

/// Read a roster, picking the reader from the file extension.
///
/// `sheet` selects a worksheet in Excel/ODS files (first sheet when `None`)
/// and is ignored for CSV.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<Table, IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" | "tsv" | "txt" => {
            if let Some(sheet) = sheet {
                log::warn!("ignoring sheet '{sheet}' for delimited file {}", path.display());
            }
            csv::read_table(path)
        }
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => xlsx::read_table(path, sheet),
        _ => Err(IoError::Format {
            path: path.to_path_buf(),
            message: format!(
                "unsupported file type '{ext}' (expected xlsx, xls, xlsb, ods or csv)"
            ),
        }),
    }
}

/// Turn a raw header row into unique column names.
///
/// Blank headers become `Unnamed: <i>`; repeated headers get `.1`, `.2`
/// suffixes so every column can still be addressed by name.
pub(crate) fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(raw.len());

    for (i, header) in raw.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            header
        };

        let mut name = base.clone();
        let mut n = 1;
        while !seen.insert(name.clone()) {
            name = format!("{base}.{n}");
            n += 1;
        }
        out.push(name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_blank_and_duplicate() {
        let headers = unique_headers(vec![
            "S/N".into(),
            "".into(),
            "Name".into(),
            "Name".into(),
            "Name".into(),
        ]);
        assert_eq!(headers, vec!["S/N", "Unnamed: 1", "Name", "Name.1", "Name.2"]);
    }

    #[test]
    fn unknown_extension_is_format_error() {
        let err = read_table(Path::new("roster.pdf"), None).unwrap_err();
        assert!(matches!(err, IoError::Format { .. }));
        assert!(err.to_string().contains("unsupported file type 'pdf'"));
    }
}
