use serde::Deserialize;

use crate::error::ReconError;

pub const DEFAULT_IDENTITY_COLUMN: &str = "Full Name As Per NRIC";
pub const DEFAULT_ORDINAL_HEADER: &str = "S/N";

/// Header spellings recognised as a serial-number column.
pub const DEFAULT_ORDINAL_ALIASES: &[&str] = &[
    "S/N", "SN", "SNO", "S. NO", "S. NO.", "S NO", "S NO.", "NO", "NO.", "INDEX", "SERIAL",
    "SERIAL NO",
];

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    /// Exact header of the column holding the person's name.
    #[serde(default = "default_identity_column")]
    pub identity_column: String,
    #[serde(default)]
    pub ordinal: OrdinalConfig,
    #[serde(default)]
    pub labels: SourceLabels,
    #[serde(default)]
    pub sheets: SheetNames,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            identity_column: default_identity_column(),
            ordinal: OrdinalConfig::default(),
            labels: SourceLabels::default(),
            sheets: SheetNames::default(),
        }
    }
}

fn default_identity_column() -> String {
    DEFAULT_IDENTITY_COLUMN.into()
}

// ---------------------------------------------------------------------------
// Ordinal column
// ---------------------------------------------------------------------------

/// Serial-number column handling, shared by the row filter and the indexer.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdinalConfig {
    /// Header of the ordinal column written into result tables.
    #[serde(default = "default_ordinal_header")]
    pub header: String,
    /// Headers (case-insensitive) treated as an existing ordinal column.
    #[serde(default = "default_ordinal_aliases")]
    pub aliases: Vec<String>,
}

impl Default for OrdinalConfig {
    fn default() -> Self {
        Self {
            header: default_ordinal_header(),
            aliases: default_ordinal_aliases(),
        }
    }
}

impl OrdinalConfig {
    /// True if `header` names an ordinal column. Case and surrounding
    /// whitespace are ignored.
    pub fn is_alias(&self, header: &str) -> bool {
        let header = header.trim();
        self.aliases
            .iter()
            .any(|alias| alias.trim().eq_ignore_ascii_case(header))
    }

    /// True if `header` is an ordinal column: an alias or the configured
    /// header, also in the `.1`, `.2` copies given to repeated headers.
    pub fn is_ordinal_column(&self, header: &str) -> bool {
        let base = strip_copy_suffix(header.trim());
        self.is_alias(base) || base == self.header.trim()
    }
}

/// `S/N.1` → `S/N`. Only a trailing `.<digits>` is removed.
fn strip_copy_suffix(header: &str) -> &str {
    match header.rsplit_once('.') {
        Some((base, n)) if !base.is_empty() && !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => {
            base
        }
        _ => header,
    }
}

fn default_ordinal_header() -> String {
    DEFAULT_ORDINAL_HEADER.into()
}

fn default_ordinal_aliases() -> Vec<String> {
    DEFAULT_ORDINAL_ALIASES.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Labels + sheet names
// ---------------------------------------------------------------------------

/// Human labels for the two inputs, used in messages and default sheet names.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceLabels {
    #[serde(default = "default_baseline_label")]
    pub baseline: String,
    #[serde(default = "default_current_label")]
    pub current: String,
}

impl Default for SourceLabels {
    fn default() -> Self {
        Self {
            baseline: default_baseline_label(),
            current: default_current_label(),
        }
    }
}

fn default_baseline_label() -> String {
    "Excel_A".into()
}

fn default_current_label() -> String {
    "Excel_B".into()
}

/// Optional overrides for the output sheet names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetNames {
    #[serde(default)]
    pub added: Option<String>,
    #[serde(default)]
    pub removed: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.identity_column.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "identity_column must not be empty".into(),
            ));
        }

        if self.ordinal.header.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "ordinal.header must not be empty".into(),
            ));
        }

        if self.ordinal.aliases.iter().all(|a| a.trim().is_empty()) {
            return Err(ReconError::ConfigValidation(
                "ordinal.aliases must list at least one header".into(),
            ));
        }

        if self.identity_column == self.ordinal.header || self.ordinal.is_alias(&self.identity_column) {
            return Err(ReconError::ConfigValidation(format!(
                "identity_column '{}' collides with the ordinal column",
                self.identity_column
            )));
        }

        if self.labels.baseline.trim().is_empty() || self.labels.current.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "labels.baseline and labels.current must not be empty".into(),
            ));
        }

        for (field, name) in [("sheets.added", &self.sheets.added), ("sheets.removed", &self.sheets.removed)] {
            if matches!(name, Some(n) if n.trim().is_empty()) {
                return Err(ReconError::ConfigValidation(format!("{field} must not be empty")));
            }
        }

        Ok(())
    }

    /// Sheet name for added rows: override, or `New_in_<current label>`.
    pub fn added_sheet_name(&self) -> String {
        self.sheets
            .added
            .clone()
            .unwrap_or_else(|| format!("New_in_{}", self.labels.current))
    }

    /// Sheet name for removed rows: override, or `Removed_from_<baseline label>`.
    pub fn removed_sheet_name(&self) -> String {
        self.sheets
            .removed
            .clone()
            .unwrap_or_else(|| format!("Removed_from_{}", self.labels.baseline))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
