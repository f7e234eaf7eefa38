//! Streaming downsampler: compresses a series one point at a time while
//! holding O(1) state beyond the zipped output itself.
//!
//! Used when the producer cannot or should not buffer the entire dataset;
//! the batch alternative over a materialized slice is
//! [`crate::compress`].

use crate::models::Point;
use std::error::Error;
use std::fmt;
use tracing::debug;

/// Default target length of a zipped graph.
pub const DEFAULT_ZIPPED_SIZE: usize = 1000;

/// Errors from feeding a [`GraphZipper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZipError {
    /// More points were added than the declared base size. The instance
    /// accepts no further input; build a new one with the right size.
    CapacityExceeded {
        /// The declared input size that was exceeded.
        base_size: usize,
    },
}

impl fmt::Display for ZipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZipError::CapacityExceeded { base_size } => {
                write!(f, "zipper is full: {} points already added", base_size)
            }
        }
    }
}

impl Error for ZipError {}

/// Online reducer of a plot series to approximately `zipped_size` points.
///
/// Incoming points deposit fractional weights into the current window;
/// when the window's weight reaches the compression ratio it is flushed
/// as one weighted-average output point, and the straddling value's
/// leftover weight seeds the next window. A value on a window boundary
/// therefore contributes to two adjacent output points, which is what
/// makes this a weighted moving reduction rather than plain bucketing.
///
/// A zipper is single-use: feed at most the declared number of points in
/// temporal order, then read the result.
#[derive(Debug, Clone)]
pub struct GraphZipper {
    base_size: usize,
    zipped_size: usize,
    compression_ratio: f64,
    point_order: usize,
    cached_ratios_sum: f64,
    ratio_value_points: Vec<(f64, f64)>,
    zipped_graph: Vec<Point>,
}

impl GraphZipper {
    /// Zipper targeting [`DEFAULT_ZIPPED_SIZE`] output points.
    pub fn new(base_size: usize) -> Self {
        Self::with_zipped_size(base_size, DEFAULT_ZIPPED_SIZE)
    }

    /// Zipper for a series of `base_size` points, reduced to about
    /// `zipped_size`. With `base_size < zipped_size` the compression
    /// ratio is 1 and every point passes through unchanged.
    pub fn with_zipped_size(base_size: usize, zipped_size: usize) -> Self {
        debug_assert!(zipped_size > 0, "zipped_size must be positive");
        let compression_ratio = if base_size >= zipped_size {
            base_size as f64 / zipped_size as f64
        } else {
            1.0
        };
        debug!(base_size, zipped_size, compression_ratio, "zipper created");
        Self {
            base_size,
            zipped_size,
            compression_ratio,
            point_order: 0,
            cached_ratios_sum: 0.0,
            ratio_value_points: Vec::new(),
            zipped_graph: Vec::new(),
        }
    }

    /// Declared input size.
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Target output size.
    pub fn zipped_size(&self) -> usize {
        self.zipped_size
    }

    /// Feed the next point of the series.
    ///
    /// Non-finite values are zeroed rather than rejected: a bad sample
    /// must not cost the whole graph, even though the zero skews the
    /// window average it lands in.
    pub fn add_point(&mut self, value: f64) -> Result<(), ZipError> {
        self.point_order += 1;
        if self.point_order > self.base_size {
            return Err(ZipError::CapacityExceeded {
                base_size: self.base_size,
            });
        }

        let value = if value.is_finite() {
            value
        } else {
            debug!(point_order = self.point_order, "non-finite sample zeroed");
            0.0
        };

        if self.compression_ratio <= 1.0 {
            self.zipped_graph.push(Point::new(self.point_order, value));
        } else if self.cached_ratios_sum + 1.0 < self.compression_ratio {
            self.cached_ratios_sum += 1.0;
            self.ratio_value_points.push((1.0, value));
        } else {
            // `value` straddles the window boundary: `rest` completes the
            // current window, the remainder seeds the next one.
            let rest = self.compression_ratio - self.cached_ratios_sum;
            self.ratio_value_points.push((rest, value));
            let point = self.zipped_point();
            self.zipped_graph.push(point);
            self.ratio_value_points.clear();
            self.ratio_value_points.push((1.0 - rest, value));
            self.cached_ratios_sum = 1.0 - rest;
        }
        Ok(())
    }

    /// The compressed graph accumulated so far.
    ///
    /// Only fully flushed windows are visible, so this is safe to call
    /// mid-stream for partial results.
    pub fn zipped_graph(&self) -> &[Point] {
        &self.zipped_graph
    }

    /// Consume the zipper and take the compressed graph.
    pub fn into_zipped_graph(self) -> Vec<Point> {
        self.zipped_graph
    }

    fn zipped_point(&self) -> Point {
        let index = if self.point_order as f64 - self.compression_ratio <= 1.0 {
            1
        } else if self.point_order == self.base_size {
            self.base_size
        } else {
            // Center the index within the window just consumed.
            self.point_order - (self.compression_ratio / 2.0) as usize
        };
        let value = self
            .ratio_value_points
            .iter()
            .map(|&(weight, value)| weight * value)
            .sum::<f64>()
            / self.compression_ratio;
        Point::new(index, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(zipper: &mut GraphZipper, values: impl IntoIterator<Item = f64>) {
        for v in values {
            zipper.add_point(v).unwrap();
        }
    }

    #[test]
    fn equal_sizes_pass_through() {
        let mut zipper = GraphZipper::with_zipped_size(5, 5);
        feed(&mut zipper, [3.0, 1.0, 4.0, 1.0, 5.0]);
        let got = zipper.into_zipped_graph();
        assert_eq!(got.len(), 5);
        for (i, point) in got.iter().enumerate() {
            assert_eq!(point.index, i + 1);
        }
        assert_eq!(got[2].value, 4.0);
    }

    #[test]
    fn smaller_base_passes_through() {
        let mut zipper = GraphZipper::with_zipped_size(3, 10);
        feed(&mut zipper, [1.0, 2.0, 3.0]);
        assert_eq!(
            zipper.zipped_graph(),
            &[
                Point::new(1, 1.0),
                Point::new(2, 2.0),
                Point::new(3, 3.0)
            ]
        );
    }

    #[test]
    fn integral_ratio_windows() {
        // ratio 2: whole windows, no weight straddling.
        let mut zipper = GraphZipper::with_zipped_size(4, 2);
        feed(&mut zipper, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            zipper.into_zipped_graph(),
            vec![Point::new(1, 1.5), Point::new(4, 3.5)]
        );
    }

    #[test]
    fn fractional_ratio_splits_boundary_value() {
        // ratio 2.5: point 3 contributes weight 0.5 to each side.
        let mut zipper = GraphZipper::with_zipped_size(5, 2);
        feed(&mut zipper, [1.0, 2.0, 3.0, 4.0, 5.0]);
        let got = zipper.into_zipped_graph();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].index, 1);
        assert!((got[0].value - 1.8).abs() < 1e-12);
        assert_eq!(got[1].index, 5);
        assert!((got[1].value - 4.2).abs() < 1e-12);
    }

    #[test]
    fn hundred_to_twentyfive() {
        let mut zipper = GraphZipper::with_zipped_size(100, 25);
        feed(&mut zipper, (1..=100).map(|i| i as f64));
        let got = zipper.zipped_graph();
        assert!((24..=26).contains(&got.len()), "got {}", got.len());
        assert_eq!(got[0].index, 1);
        assert_eq!(got.last().unwrap().index, 100);
        for pair in got.windows(2) {
            assert!(pair[0].index < pair[1].index);
        }
    }

    #[test]
    fn overfeeding_fails() {
        let mut zipper = GraphZipper::with_zipped_size(100, 25);
        feed(&mut zipper, (0..100).map(|_| 1.0));
        assert_eq!(
            zipper.add_point(1.0),
            Err(ZipError::CapacityExceeded { base_size: 100 })
        );
    }

    #[test]
    fn constant_series_stays_constant() {
        let mut zipper = GraphZipper::with_zipped_size(100, 25);
        feed(&mut zipper, (0..100).map(|_| 2.0));
        for point in zipper.zipped_graph() {
            assert!((point.value - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn partial_results_mid_stream() {
        let mut zipper = GraphZipper::with_zipped_size(4, 2);
        feed(&mut zipper, [1.0, 2.0, 3.0]);
        // Only the first window has flushed.
        assert_eq!(zipper.zipped_graph(), &[Point::new(1, 1.5)]);
    }

    #[test]
    fn non_finite_samples_are_zeroed() {
        let mut zipper = GraphZipper::with_zipped_size(2, 2);
        feed(&mut zipper, [f64::NAN, 3.0]);
        assert_eq!(
            zipper.zipped_graph(),
            &[Point::new(1, 0.0), Point::new(2, 3.0)]
        );
    }

    #[test]
    fn default_zipped_size_applies() {
        let zipper = GraphZipper::new(5000);
        assert_eq!(zipper.zipped_size(), DEFAULT_ZIPPED_SIZE);
        assert_eq!(zipper.base_size(), 5000);
    }
}
