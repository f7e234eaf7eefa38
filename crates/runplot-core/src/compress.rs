//! Batch downsampling of a fully materialized series.
//!
//! The streaming counterpart lives in [`crate::zipper`]; the two reducers
//! evolved separately and are not numerically equivalent on the same
//! input (this one folds runs with a pairwise running average, the zipper
//! computes a true weighted window average).

use crate::models::Point;

/// Value normalization applied before a sample is stored or merged.
pub type NormalizeFn = fn(f64) -> f64;

/// Folds the next raw sample into the running value of the current run.
pub type MergeFn = fn(f64, f64) -> f64;

/// Hooks for [`compress_with`], each independently overridable.
#[derive(Clone, Copy)]
pub struct CompressOptions {
    pub normalize: NormalizeFn,
    pub merge: MergeFn,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            normalize: normalize_value,
            merge: merge_values,
        }
    }
}

/// Default normalization: round to 2 decimal places; zero and non-finite
/// input map to `0.0`.
pub fn normalize_value(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return 0.0;
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Default merge: two-term running average of the normalized inputs.
pub fn merge_values(acc: f64, next: f64) -> f64 {
    normalize_value((acc + normalize_value(next)) / 2.0)
}

/// [`compress_with`] under [`CompressOptions::default`].
pub fn compress(data: &[f64], limit: usize) -> Vec<Point> {
    compress_with(data, limit, CompressOptions::default())
}

/// Reduce `data` to at most `limit` points, preserving order and 1-based
/// source positions.
///
/// When `data` already fits, every value is emitted at its own index.
/// Otherwise consecutive values are folded into runs via `merge` (the
/// first value of a run enters via `normalize`, never `merge`) and each
/// run is flushed at the index of its last contributing value; a trailing
/// partial run flushes at the final input index.
pub fn compress_with(data: &[f64], limit: usize, options: CompressOptions) -> Vec<Point> {
    let normalize = options.normalize;
    let merge = options.merge;

    if data.len() <= limit {
        return data
            .iter()
            .enumerate()
            .map(|(i, &v)| Point::new(i + 1, normalize(v)))
            .collect();
    }
    if limit == 0 {
        return Vec::new();
    }

    // `factor` decides which rows complete a run: with 100 rows reduced
    // to 75 it is 0.75 and every 4th row flushes.
    let factor = limit as f64 / data.len() as f64;
    let mut store = 0.0;
    let mut cur_value = 0.0;
    let mut first = true;
    let mut result = Vec::with_capacity(limit);

    for (i, &value) in data.iter().enumerate() {
        store += factor;
        if first {
            cur_value = normalize(value);
            first = false;
        } else {
            cur_value = merge(cur_value, value);
        }
        if store > 1.0 {
            store -= 1.0;
            first = true;
            result.push(Point::new(i + 1, cur_value));
        }
    }
    if !first {
        result.push(Point::new(data.len(), cur_value));
    }
    result
}
