//! Per-run summary rows built from extracted action series.
//!
//! This is the numeric half of the result tables the reporting frontends
//! render: one row per atomic action (plus `"total"`) with the usual
//! central-tendency columns, and run-level success accounting.

use crate::fmt::format_secs;
use crate::models::IterationRecord;
use crate::series::action_series;
use crate::stats;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Summary statistics for one action series (or the `"total"` series).
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ActionSummary {
    pub name: String,
    /// Number of iterations that recorded this action.
    pub count: usize,
    pub min: f64,
    pub median: f64,
    pub p90: f64,
    pub p95: f64,
    pub max: f64,
    pub mean: f64,
}

/// Whole-run summary: iteration accounting plus one row per action.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct RunReport {
    pub iterations: usize,
    pub failures: usize,
    pub actions: Vec<ActionSummary>,
}

/// Summarize a run.
///
/// Actions whose extracted series came out empty (every record skipped
/// them) are omitted rather than reported as rows of zeros.
pub fn build_report(records: &[IterationRecord]) -> RunReport {
    let failures = records.iter().filter(|r| r.error).count();
    let actions: Vec<ActionSummary> = action_series(records)
        .iter()
        .filter_map(|series| summarize(&series.name, &series.durations))
        .collect();
    debug!(
        iterations = records.len(),
        failures,
        actions = actions.len(),
        "run report built"
    );
    RunReport {
        iterations: records.len(),
        failures,
        actions,
    }
}

fn summarize(name: &str, durations: &[f64]) -> Option<ActionSummary> {
    // percentile alone drives the empty-series skip; after it succeeds
    // the mean/median error paths are unreachable.
    let p90 = stats::percentile(durations, 0.90)?;
    let p95 = stats::percentile(durations, 0.95)?;
    let mean = stats::mean(durations).ok()?;
    let median = stats::median(durations).ok()?;
    let min = durations.iter().copied().fold(f64::INFINITY, f64::min);
    let max = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(ActionSummary {
        name: name.to_string(),
        count: durations.len(),
        min,
        median,
        p90,
        p95,
        max,
        mean,
    })
}

impl fmt::Display for ActionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: count={} min={} median={} p90={} p95={} max={} mean={}",
            self.name,
            self.count,
            format_secs(self.min),
            format_secs(self.median),
            format_secs(self.p90),
            format_secs(self.p95),
            format_secs(self.max),
            format_secs(self.mean),
        )
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} iterations, {} failed", self.iterations, self.failures)?;
        for action in &self.actions {
            writeln!(f, "  {}", action)?;
        }
        Ok(())
    }
}
