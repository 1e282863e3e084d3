use std::collections::HashSet;

use crate::config::ReconConfig;
use crate::error::{MissingSide, ReconError};
use crate::model::{DiffResult, KeyCounts, Side};
use crate::normalize::normalize_column;
use crate::table::Table;

/// Non-empty keys of a normalized column.
pub fn key_set(keys: &[String]) -> HashSet<&str> {
    keys.iter()
        .map(String::as_str)
        .filter(|k| !k.is_empty())
        .collect()
}

/// Fail unless both tables carry the identity column (exact header match).
/// Returns the column index in `(baseline, current)`.
pub fn identity_columns(
    baseline: &Table,
    current: &Table,
    config: &ReconConfig,
) -> Result<(usize, usize), ReconError> {
    let column = &config.identity_column;
    let baseline_idx = baseline.column_index(column);
    let current_idx = current.column_index(column);

    match (baseline_idx, current_idx) {
        (Some(b), Some(c)) => Ok((b, c)),
        _ => {
            let mut sides = Vec::new();
            if baseline_idx.is_none() {
                sides.push(MissingSide {
                    side: Side::Baseline,
                    label: config.labels.baseline.clone(),
                });
            }
            if current_idx.is_none() {
                sides.push(MissingSide {
                    side: Side::Current,
                    label: config.labels.current.clone(),
                });
            }
            Err(ReconError::MissingIdentityColumn {
                sides,
                column: column.clone(),
            })
        }
    }
}

/// Diff two (already filtered) rosters by normalized identity.
///
/// Set semantics: a key present on both sides, at any multiplicity, is
/// unchanged. Every row whose key is only on one side is selected,
/// duplicates included, in source order.
pub fn reconcile(
    baseline: &Table,
    current: &Table,
    config: &ReconConfig,
) -> Result<DiffResult, ReconError> {
    let (baseline_col, current_col) = identity_columns(baseline, current, config)?;

    let baseline_norm = normalize_column(baseline, baseline_col);
    let current_norm = normalize_column(current, current_col);

    let baseline_keys = key_set(&baseline_norm);
    let current_keys = key_set(&current_norm);

    let added_keys: HashSet<&str> = current_keys.difference(&baseline_keys).copied().collect();
    let removed_keys: HashSet<&str> = baseline_keys.difference(&current_keys).copied().collect();

    let added = current.select_rows(|i, _| added_keys.contains(current_norm[i].as_str()));
    let removed = baseline.select_rows(|i, _| removed_keys.contains(baseline_norm[i].as_str()));

    let counts = KeyCounts {
        baseline_keys: baseline_keys.len(),
        current_keys: current_keys.len(),
        unchanged_keys: baseline_keys.intersection(&current_keys).count(),
        added_keys: added_keys.len(),
        removed_keys: removed_keys.len(),
    };

    log::debug!(
        "key sets: {} baseline, {} current, {} unchanged, {} added, {} removed",
        counts.baseline_keys,
        counts.current_keys,
        counts.unchanged_keys,
        counts.added_keys,
        counts.removed_keys,
    );

    Ok(DiffResult {
        added,
        removed,
        counts,
    })
}
