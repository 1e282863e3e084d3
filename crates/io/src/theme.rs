// Visual theme for exported result workbooks

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::IoError;

/// Column widths of the house layout, keyed by column letter. Column B is
/// deliberately left at the Excel default.
const HOUSE_WIDTHS: &[(&str, f64)] = &[
    ("A", 3.38),
    ("C", 23.06),
    ("D", 25.0),
    ("E", 17.63),
    ("F", 26.25),
    ("G", 13.94),
    ("H", 24.06),
    ("I", 18.38),
    ("J", 20.31),
    ("K", 4.0),
    ("L", 5.81),
    ("M", 11.5),
];

/// Excel's widest allowed column, in character units.
const MAX_EXCEL_WIDTH: f64 = 255.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportTheme {
    /// Header fill as `RRGGBB` hex (a leading `#` is accepted).
    pub header_fill: String,
    pub font_name: String,
    pub font_size: f64,
    /// Height applied to every written row, in points.
    pub row_height: f64,
    pub widths: ColumnWidths,
}

impl Default for ExportTheme {
    fn default() -> Self {
        Self {
            header_fill: "94B455".into(),
            font_name: "Calibri".into(),
            font_size: 9.0,
            row_height: 20.0,
            widths: ColumnWidths::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthMode {
    /// Position-indexed table, applied regardless of header names.
    #[default]
    Fixed,
    /// Longest rendered value per column plus padding.
    Auto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnWidths {
    pub mode: WidthMode,
    /// Column letter → width, used in `fixed` mode.
    pub fixed: BTreeMap<String, f64>,
    /// Extra characters added to the measured width in `auto` mode.
    pub padding: f64,
    /// Upper bound for `auto` widths. `None` means uncapped.
    pub max: Option<f64>,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            mode: WidthMode::Fixed,
            fixed: HOUSE_WIDTHS.iter().map(|(c, w)| (c.to_string(), *w)).collect(),
            padding: 2.0,
            max: Some(60.0),
        }
    }
}

impl ExportTheme {
    pub fn validate(&self) -> Result<(), IoError> {
        self.header_fill_rgb()?;

        if self.font_name.trim().is_empty() {
            return Err(IoError::Theme("font_name must not be empty".into()));
        }
        if !(self.font_size > 0.0 && self.font_size <= 409.0) {
            return Err(IoError::Theme(format!(
                "font_size must be in (0, 409], got {}",
                self.font_size
            )));
        }
        if !(self.row_height > 0.0 && self.row_height <= 409.0) {
            return Err(IoError::Theme(format!(
                "row_height must be in (0, 409], got {}",
                self.row_height
            )));
        }

        self.widths.fixed_columns()?;

        if self.widths.padding < 0.0 {
            return Err(IoError::Theme("widths.padding must not be negative".into()));
        }
        if let Some(max) = self.widths.max {
            if !(max > 0.0 && max <= MAX_EXCEL_WIDTH) {
                return Err(IoError::Theme(format!(
                    "widths.max must be in (0, {MAX_EXCEL_WIDTH}], got {max}"
                )));
            }
        }
        Ok(())
    }

    /// Header fill as a `0xRRGGBB` value.
    pub fn header_fill_rgb(&self) -> Result<u32, IoError> {
        let hex = self.header_fill.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IoError::Theme(format!(
                "header_fill must be a 6-digit hex colour, got '{}'",
                self.header_fill
            )));
        }
        u32::from_str_radix(hex, 16)
            .map_err(|e| IoError::Theme(format!("header_fill '{}': {e}", self.header_fill)))
    }
}

impl ColumnWidths {
    /// Fixed widths as `(column index, width)`, sorted by column.
    pub fn fixed_columns(&self) -> Result<Vec<(u16, f64)>, IoError> {
        self.fixed
            .iter()
            .map(|(letter, width)| {
                let col = letter_to_col(letter).ok_or_else(|| {
                    IoError::Theme(format!("widths.fixed: '{letter}' is not a column letter"))
                })?;
                if !(*width >= 0.0 && *width <= MAX_EXCEL_WIDTH) {
                    return Err(IoError::Theme(format!(
                        "widths.fixed.{letter}: width must be in [0, {MAX_EXCEL_WIDTH}], got {width}"
                    )));
                }
                Ok((col, *width))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|mut cols| {
                cols.sort_by_key(|(c, _)| *c);
                cols
            })
    }

    /// Auto width for a column whose widest rendered value is `chars` wide.
    pub fn auto_width(&self, chars: usize) -> f64 {
        let width = chars as f64 + self.padding;
        match self.max {
            Some(max) => width.min(max),
            None => width.min(MAX_EXCEL_WIDTH),
        }
    }
}

/// Convert a column letter to a zero-based index (A = 0, Z = 25, AA = 26).
/// Returns `None` past XFD, Excel's last column.
pub fn letter_to_col(letter: &str) -> Option<u16> {
    let letter = letter.trim();
    if letter.is_empty() || letter.len() > 3 {
        return None;
    }
    let mut n: u32 = 0;
    for c in letter.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        n = n * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    let col = n - 1;
    (col < 16_384).then_some(col as u16)
}
