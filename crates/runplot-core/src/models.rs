//! Data models shared across the processing pipeline.
//!
//! [`IterationRecord`] is the raw per-iteration measurement delivered by
//! the benchmark runner. Everything downstream ([`crate::series`],
//! [`crate::compress`], [`crate::zipper`], [`crate::report`]) consumes
//! either records or plain `f64` slices derived from them.

use serde::{Deserialize, Serialize};

/// Duration of one named sub-step within a benchmark iteration.
///
/// Order within [`IterationRecord::atomic_actions`] is first-seen order
/// and is preserved end to end.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AtomicAction {
    /// Action name, e.g. `"cluster.create"`.
    pub name: String,
    /// Wall-clock duration in seconds.
    pub duration: f64,
}

impl AtomicAction {
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// One raw benchmark iteration as reported by the runner.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct IterationRecord {
    /// Total wall-clock duration of the iteration in seconds.
    pub duration: f64,
    /// Whether the iteration failed. Failed iterations are excluded from
    /// the synthetic `"total"` series but still contribute whatever
    /// atomic action timings they recorded.
    pub error: bool,
    /// Per-action timings, in first-seen order. An action a given
    /// iteration never reached is simply absent.
    #[serde(default)]
    pub atomic_actions: Vec<AtomicAction>,
}

impl IterationRecord {
    /// Duration of the named atomic action, if this iteration recorded it.
    pub fn action_duration(&self, name: &str) -> Option<f64> {
        self.atomic_actions
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.duration)
    }
}

/// One point of a (possibly compressed) plot series.
///
/// `index` is the 1-based position in the source sequence. Consumers must
/// treat it as an x coordinate, not as a contiguous counter: compressed
/// output keeps indices strictly increasing but skips most of them.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Point {
    pub index: usize,
    pub value: f64,
}

impl Point {
    pub fn new(index: usize, value: f64) -> Self {
        Self { index, value }
    }
}

/// A named per-iteration duration sequence extracted from raw records.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ActionSeries {
    pub name: String,
    pub durations: Vec<f64>,
}
