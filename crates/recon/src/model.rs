use serde::Serialize;

use crate::table::Table;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which of the two rosters a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The earlier snapshot ("Excel A").
    Baseline,
    /// The newer snapshot ("Excel B").
    Current,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Baseline => write!(f, "baseline"),
            Self::Current => write!(f, "current"),
        }
    }
}

/// The two pre-loaded rosters.
#[derive(Debug, Clone)]
pub struct ReconInput {
    pub baseline: Table,
    pub current: Table,
}

impl ReconInput {
    pub fn new(baseline: Table, current: Table) -> Self {
        Self { baseline, current }
    }

    pub fn table(&self, side: Side) -> &Table {
        match side {
            Side::Baseline => &self.baseline,
            Side::Current => &self.current,
        }
    }
}

// ---------------------------------------------------------------------------
// Diff
// ---------------------------------------------------------------------------

/// Rows selected by the set reconciler, before re-indexing.
#[derive(Debug, Clone)]
pub struct DiffResult {
    /// Rows of the current table whose identity is absent from the baseline.
    pub added: Table,
    /// Rows of the baseline table whose identity is absent from the current.
    pub removed: Table,
    pub counts: KeyCounts,
}

/// Distinct-identity counts from the set math.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyCounts {
    pub baseline_keys: usize,
    pub current_keys: usize,
    pub unchanged_keys: usize,
    pub added_keys: usize,
    pub removed_keys: usize,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconSummary {
    /// Rows read from the baseline before footer filtering.
    pub baseline_rows: usize,
    /// Baseline rows kept by the footer filter.
    pub baseline_data_rows: usize,
    pub current_rows: usize,
    pub current_data_rows: usize,
    pub added_rows: usize,
    pub removed_rows: usize,
    pub keys: KeyCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub identity_column: String,
    pub baseline_label: String,
    pub current_label: String,
    pub added_sheet: String,
    pub removed_sheet: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    /// Added rows, re-indexed from 1.
    pub added: Table,
    /// Removed rows, re-indexed from 1.
    pub removed: Table,
}

impl ReconResult {
    /// `(sheet name, table)` pairs in export order: added first, then removed.
    pub fn sheets(&self) -> Vec<(&str, &Table)> {
        vec![
            (self.meta.added_sheet.as_str(), &self.added),
            (self.meta.removed_sheet.as_str(), &self.removed),
        ]
    }

    pub fn has_differences(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}
