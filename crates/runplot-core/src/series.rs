//! Reshapes raw iteration records into per-action duration series.

use crate::models::{ActionSeries, IterationRecord};
use tracing::debug;

/// Name of the synthetic series built from whole-iteration durations.
pub const TOTAL_SERIES: &str = "total";

/// Extract one duration series per atomic action, plus the `"total"`
/// series, preserving record order throughout.
///
/// The action-name set comes from the first non-error record with a
/// non-empty action list; if no record qualifies, only `"total"` is
/// produced. Records lacking a given action are skipped in that action's
/// series, so series lengths may differ and do not index-align across
/// actions. The `"total"` series holds the whole-iteration duration of
/// every non-error record.
pub fn action_series(records: &[IterationRecord]) -> Vec<ActionSeries> {
    let names: Vec<&str> = records
        .iter()
        .find(|r| !r.error && !r.atomic_actions.is_empty())
        .map(|r| r.atomic_actions.iter().map(|a| a.name.as_str()).collect())
        .unwrap_or_default();

    let mut series = Vec::with_capacity(names.len() + 1);
    for name in names {
        series.push(ActionSeries {
            name: name.to_string(),
            durations: records
                .iter()
                .filter_map(|r| r.action_duration(name))
                .collect(),
        });
    }
    series.push(ActionSeries {
        name: TOTAL_SERIES.to_string(),
        durations: records
            .iter()
            .filter(|r| !r.error)
            .map(|r| r.duration)
            .collect(),
    });

    debug!(
        records = records.len(),
        actions = series.len() - 1,
        "extracted action series"
    );
    series
}
