//! Configuration parameters for correlogram extraction

use serde::{Deserialize, Serialize};

/// Correlogram extraction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelogramConfig {
    /// Length of the correlation window in samples (default: 1024)
    pub wlen: usize,

    /// Number of delays to cover (default: 256)
    /// The output matrix has `n_delay - 1` rows for lags 1 through
    /// `n_delay - 1`; the trivial zero-lag row is skipped
    pub n_delay: usize,

    /// Parallelize the grid traversal across delay rows (default: false)
    /// Output is identical to the sequential traversal
    pub parallel: bool,
}

impl Default for CorrelogramConfig {
    fn default() -> Self {
        Self {
            wlen: 1024,
            n_delay: 256,
            parallel: false,
        }
    }
}
