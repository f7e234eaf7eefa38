//! runplot-core, the shared library for reducing raw benchmark results
//! into plot-ready series and summary statistics.
//!
//! Provides:
//! - `models` - raw iteration records and plot-point data models
//! - `series` - per-action duration series extraction
//! - `stats` - mean / median / percentile over sample slices
//! - `compress` - batch downsampling of a materialized series
//! - `zipper` - streaming downsampling with O(1) working memory
//! - `report` - per-run summary rows built from extracted series
//! - `fmt` - shared formatting helpers (durations)

pub mod compress;
pub mod fmt;
pub mod models;
pub mod report;
pub mod series;
pub mod stats;
pub mod zipper;
