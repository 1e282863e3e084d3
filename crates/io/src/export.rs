// Styled XLSX export of reconciliation results
//
// Every sheet gets the same house style: thin borders and centered text on
// every cell, a filled bold header row that stays frozen, one font for the
// whole workbook, fixed row heights, and fixed or measured column widths.

use std::collections::HashSet;
use std::path::Path;

use rollcall_recon::{CellValue, Table};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use unicode_width::UnicodeWidthStr;

use crate::error::IoError;
use crate::theme::{ExportTheme, WidthMode};

/// Longest sheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Per-sheet export statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    /// Name as written, after sanitizing and de-duplication.
    pub name: String,
    pub data_rows: usize,
    pub columns: usize,
}

/// A serialized workbook plus what went into it.
#[derive(Debug)]
pub struct StyledDocument {
    pub bytes: Vec<u8>,
    pub sheets: Vec<SheetReport>,
    /// Cells written, header cells included
    pub cells_exported: usize,
}

impl StyledDocument {
    /// Returns a summary message suitable for display
    pub fn summary(&self) -> String {
        let sheets = self.sheets.len();
        format!(
            "{} sheet{}, {} cells",
            sheets,
            if sheets == 1 { "" } else { "s" },
            self.cells_exported
        )
    }
}

// ---------------------------------------------------------------------------
// Sheet names
// ---------------------------------------------------------------------------

/// Make the requested names valid and unique Excel sheet names.
///
/// Invalid characters become `_`, surrounding apostrophes are dropped, blank
/// names become `Sheet<N>`, and names are cut to 31 characters. Collisions
/// (Excel compares names case-insensitively) get a `_2`, `_3`, … suffix that
/// still fits within the limit.
pub fn unique_sheet_names<'a, I>(requested: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    // "History" is reserved by Excel
    let mut used: HashSet<String> = HashSet::from(["history".to_string()]);
    let mut names = Vec::new();

    for (i, raw) in requested.into_iter().enumerate() {
        let mut base = sanitize_sheet_name(raw);
        if base.is_empty() {
            base = format!("Sheet{}", i + 1);
        }

        let mut name = truncate_sheet_name(&base, MAX_SHEET_NAME_LEN);
        let mut n = 2;
        while used.contains(&name.to_lowercase()) {
            let suffix = format!("_{n}");
            let room = MAX_SHEET_NAME_LEN - suffix.chars().count();
            name = format!("{}{}", truncate_sheet_name(&base, room), suffix);
            n += 1;
        }

        if name != raw {
            log::debug!("sheet name '{raw}' written as '{name}'");
        }
        used.insert(name.to_lowercase());
        names.push(name);
    }
    names
}

fn sanitize_sheet_name(raw: &str) -> String {
    let replaced: String = raw
        .trim()
        .chars()
        .map(|c| if INVALID_SHEET_CHARS.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    replaced.trim_matches('\'').to_string()
}

fn truncate_sheet_name(name: &str, max_chars: usize) -> String {
    let cut: String = name.chars().take(max_chars).collect();
    cut.trim_end_matches('\'').to_string()
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Render the named tables into one styled XLSX workbook held in memory.
///
/// Sheets are written in the given order. A failure anywhere aborts the
/// whole export; no partial document is returned.
pub fn to_xlsx_bytes(sheets: &[(&str, &Table)], theme: &ExportTheme) -> Result<StyledDocument, IoError> {
    if sheets.is_empty() {
        return Err(IoError::Export("no sheets to export".into()));
    }
    theme.validate()?;

    let styles = SheetStyles::new(theme)?;
    let names = unique_sheet_names(sheets.iter().map(|(name, _)| *name));

    let mut workbook = Workbook::new();
    let mut reports = Vec::with_capacity(sheets.len());
    let mut cells_exported = 0;

    for ((_, table), name) in sheets.iter().zip(names) {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&name)
            .map_err(|e| IoError::Export(format!("Failed to create sheet '{name}': {e}")))?;

        cells_exported += write_table(worksheet, table, &styles)
            .map_err(|e| IoError::Export(format!("Failed to write sheet '{name}': {e}")))?;
        apply_layout(worksheet, table, theme)
            .map_err(|e| IoError::Export(format!("Failed to lay out sheet '{name}': {e}")))?;

        log::debug!("sheet '{name}': {} data rows, {} columns", table.len(), table.width());
        reports.push(SheetReport {
            name,
            data_rows: table.len(),
            columns: table.width(),
        });
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|e| IoError::Export(format!("Failed to serialize XLSX: {e}")))?;

    Ok(StyledDocument {
        bytes,
        sheets: reports,
        cells_exported,
    })
}

/// Render and write the workbook to `path`.
///
/// The document is fully serialized before anything touches the disk, and
/// is written through a sibling temp file so a failed write never leaves a
/// truncated workbook at `path`.
pub fn export(sheets: &[(&str, &Table)], theme: &ExportTheme, path: &Path) -> Result<StyledDocument, IoError> {
    let document = to_xlsx_bytes(sheets, theme)?;

    let write_err = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".partial");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, &document.bytes).map_err(write_err)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(e));
    }

    log::info!("wrote {} ({})", path.display(), document.summary());
    Ok(document)
}

/// Cell formats shared by every sheet of one export.
struct SheetStyles {
    header: Format,
    body: Format,
}

impl SheetStyles {
    fn new(theme: &ExportTheme) -> Result<Self, IoError> {
        let base = Format::new()
            .set_font_name(theme.font_name.as_str())
            .set_font_size(theme.font_size)
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let header = base
            .clone()
            .set_bold()
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(theme.header_fill_rgb()?));

        Ok(Self { header, body: base })
    }
}

/// Write the header row and all data rows. Returns the number of cells written.
fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    styles: &SheetStyles,
) -> Result<usize, rust_xlsxwriter::XlsxError> {
    let mut cells = 0;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &styles.header)?;
        cells += 1;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row32 = (row_idx + 1) as u32;
        for col in 0..table.width() {
            let col16 = col as u16;
            match row.get(col).unwrap_or(&CellValue::Empty) {
                CellValue::Text(s) => {
                    worksheet.write_string_with_format(row32, col16, s, &styles.body)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number_with_format(row32, col16, *n, &styles.body)?;
                }
                // Blank cells still carry the border
                CellValue::Empty => {
                    worksheet.write_blank(row32, col16, &styles.body)?;
                }
            }
            cells += 1;
        }
    }

    Ok(cells)
}

fn apply_layout(
    worksheet: &mut Worksheet,
    table: &Table,
    theme: &ExportTheme,
) -> Result<(), IoError> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| IoError::Export(e.to_string());

    match theme.widths.mode {
        WidthMode::Fixed => {
            for (col, width) in theme.widths.fixed_columns()? {
                worksheet.set_column_width(col, width).map_err(xlsx_err)?;
            }
        }
        WidthMode::Auto => {
            for (col, chars) in measure_columns(table).into_iter().enumerate() {
                worksheet
                    .set_column_width(col as u16, theme.widths.auto_width(chars))
                    .map_err(xlsx_err)?;
            }
        }
    }

    for row in 0..=table.len() {
        worksheet.set_row_height(row as u32, theme.row_height).map_err(xlsx_err)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(xlsx_err)?;
    Ok(())
}

/// Display width of the widest rendered value (header included) per column.
pub fn measure_columns(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.width()).collect();
    for row in &table.rows {
        for (col, cell) in row.iter().enumerate().take(widths.len()) {
            let w = cell.to_string().width();
            if w > widths[col] {
                widths[col] = w;
            }
        }
    }
    widths
}
