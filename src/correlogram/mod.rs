//! Correlogram extraction modules
//!
//! A correlogram is a matrix of normalized correlation values between a
//! signal and time-shifted copies of itself, indexed by (delay, window
//! offset). Strong ridges at a given delay reveal periodic structure,
//! which makes the matrix a building block for rhythm-track and
//! pitch-track feature pipelines.
//!
//! - [`kernel`]: pairwise Pearson correlation over two signal windows
//! - [`shaping`]: the `r^4` nonlinearity that turns raw correlations into
//!   a peaked periodicity indicator
//! - [`builder`]: grid traversal strategies that fill a caller-owned
//!   matrix, sequentially or in parallel

pub mod builder;
pub mod kernel;
pub mod shaping;

pub use builder::{correlogram, correlogram_delay, correlogram_delay_par, correlogram_par};
pub use kernel::corrcoef;
pub use shaping::{shape, SHAPING_EXPONENT};

use serde::{Deserialize, Serialize};

/// Shape of a correlogram grid: delays by window offsets.
///
/// The two builder strategies interpret `n_delay` differently and keep
/// distinct row semantics:
///
/// - [`correlogram_delay`] takes an explicit delay set of `n_delay`
///   entries and produces `n_delay` rows; row `i` is `delays[i]`.
/// - [`correlogram`] covers consecutive delays `1..n_delay` and produces
///   `n_delay - 1` rows; row `d - 1` is delay `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    /// Number of delays covered by the grid
    pub n_delay: usize,

    /// Number of window offsets (columns) per delay row
    pub n_offsets: usize,
}

/// An owned, filled correlogram matrix
///
/// Row-major storage: row `r` holds the shaped correlations of one delay
/// across all window offsets. Produced by
/// [`compute_correlogram`](crate::compute_correlogram); the builder
/// functions in [`builder`] fill caller-provided buffers instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlogram {
    data: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
}

impl Correlogram {
    /// Wrap a filled row-major buffer.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != n_rows * n_cols`. Internal constructor;
    /// the shape is always derived from a validated grid.
    pub(crate) fn new(data: Vec<f64>, n_rows: usize, n_cols: usize) -> Self {
        assert_eq!(data.len(), n_rows * n_cols);
        Self {
            data,
            n_rows,
            n_cols,
        }
    }

    /// Number of delay rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of window offsets per row
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// One delay row, or `None` if `row` is out of range
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.n_rows {
            Some(&self.data[row * self.n_cols..(row + 1) * self.n_cols])
        } else {
            None
        }
    }

    /// Single cell, or `None` if out of range
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.n_rows && col < self.n_cols {
            Some(self.data[row * self.n_cols + col])
        } else {
            None
        }
    }

    /// Whole matrix as a flat row-major slice
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Grand mean over all cells: a single periodicity-strength summary
    /// of the whole matrix. Zero for an empty matrix.
    pub fn total(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlogram_accessors() {
        let cgram = Correlogram::new(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6], 2, 3);

        assert_eq!(cgram.n_rows(), 2);
        assert_eq!(cgram.n_cols(), 3);
        assert_eq!(cgram.row(0), Some(&[0.1, 0.2, 0.3][..]));
        assert_eq!(cgram.row(1), Some(&[0.4, 0.5, 0.6][..]));
        assert_eq!(cgram.row(2), None);
        assert_eq!(cgram.get(1, 2), Some(0.6));
        assert_eq!(cgram.get(1, 3), None);
        assert_eq!(cgram.get(2, 0), None);
        assert_eq!(cgram.as_slice().len(), 6);
    }

    #[test]
    fn test_correlogram_total() {
        let cgram = Correlogram::new(vec![0.0, 0.5, 1.0, 0.5], 2, 2);
        assert!((cgram.total() - 0.5).abs() < 1e-15);

        let empty = Correlogram::new(vec![], 0, 0);
        assert_eq!(empty.total(), 0.0);
    }

    #[test]
    fn test_correlogram_serde_round_trip() {
        let cgram = Correlogram::new(vec![0.25, 0.75], 1, 2);
        let json = serde_json::to_string(&cgram).unwrap();
        let back: Correlogram = serde_json::from_str(&json).unwrap();
        assert_eq!(cgram, back);
    }
}
