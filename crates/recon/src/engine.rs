use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::filter::filter_data_rows;
use crate::index::reindex;
use crate::model::{ReconInput, ReconMeta, ReconResult, ReconSummary};
use crate::reconcile::{identity_columns, reconcile};

/// Run one reconciliation: filter footers, diff by normalized identity,
/// re-index both result tables.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    // Validate before doing any work so no partial result is ever built
    identity_columns(&input.baseline, &input.current, config)?;

    let baseline = filter_data_rows(&input.baseline, &config.ordinal);
    let current = filter_data_rows(&input.current, &config.ordinal);

    let diff = reconcile(&baseline, &current, config)?;

    let added = reindex(&diff.added, &config.ordinal);
    let removed = reindex(&diff.removed, &config.ordinal);

    let summary = ReconSummary {
        baseline_rows: input.baseline.len(),
        baseline_data_rows: baseline.len(),
        current_rows: input.current.len(),
        current_data_rows: current.len(),
        added_rows: added.len(),
        removed_rows: removed.len(),
        keys: diff.counts,
    };

    log::info!(
        "new in {}: {} | removed from {}: {}",
        config.labels.current,
        summary.added_rows,
        config.labels.baseline,
        summary.removed_rows,
    );

    Ok(ReconResult {
        meta: ReconMeta {
            identity_column: config.identity_column.clone(),
            baseline_label: config.labels.baseline.clone(),
            current_label: config.labels.current.clone(),
            added_sheet: config.added_sheet_name(),
            removed_sheet: config.removed_sheet_name(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        added,
        removed,
    })
}
