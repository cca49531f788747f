//! # Cadence DSP
//!
//! Windowed correlogram extraction for rhythm-track and pitch-track
//! feature pipelines.
//!
//! A correlogram is a matrix of Pearson correlations between a signal and
//! time-shifted copies of itself, evaluated over a grid of (delay, window
//! offset) pairs. Positive correlations are raised to the fourth power and
//! negative ones clamped to zero, turning the raw correlation surface into
//! a peaked periodicity indicator suitable for downstream statistical
//! models.
//!
//! ## Quick Start
//!
//! ```
//! use cadence_dsp::{compute_correlogram, CorrelogramConfig};
//!
//! // A quarter second of a 100 Hz sine at 8 kHz
//! let signal: Vec<f64> = (0..2000)
//!     .map(|i| (i as f64 * 2.0 * std::f64::consts::PI * 100.0 / 8000.0).sin())
//!     .collect();
//!
//! let config = CorrelogramConfig {
//!     wlen: 128,
//!     n_delay: 64,
//!     ..CorrelogramConfig::default()
//! };
//! let cgram = compute_correlogram(&signal, &config)?;
//!
//! // One row per delay 1..n_delay, one column per window offset
//! assert_eq!(cgram.n_rows(), 63);
//! # Ok::<(), cadence_dsp::CorrelogramError>(())
//! ```
//!
//! For full control over delays and output storage, use the builder
//! functions in [`correlogram`] directly; they fill caller-owned buffers
//! without allocating.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod correlogram;
pub mod error;

// Re-export main types
pub use config::CorrelogramConfig;
pub use correlogram::{Correlogram, GridDims};
pub use error::CorrelogramError;

/// Compute the windowed correlogram of a signal.
///
/// Covers consecutive delays `1..config.n_delay` over every window offset
/// the signal can support: the number of offsets is derived as
/// `signal.len() - wlen - n_delay`, which guarantees every window the grid
/// touches stays in bounds. The output has `n_delay - 1` rows (the
/// zero-lag row is skipped) and one column per offset.
///
/// # Arguments
///
/// * `signal` - Real-valued samples, fully materialized in memory
/// * `config` - Window length, delay count, and traversal mode
///
/// # Returns
///
/// An owned [`Correlogram`] matrix of shaped correlation values
///
/// # Errors
///
/// Returns `CorrelogramError` if:
/// - `wlen` is zero or `n_delay < 2`
/// - The signal is shorter than `wlen + n_delay + 1` samples
/// - Any window pair has zero variance (`DegenerateWindow`)
///
/// # Example
///
/// ```
/// use cadence_dsp::{compute_correlogram, CorrelogramConfig};
///
/// let signal: Vec<f64> = (0..512).map(|i| (i as f64 * 0.7).sin()).collect();
/// let config = CorrelogramConfig { wlen: 64, n_delay: 32, parallel: false };
///
/// let cgram = compute_correlogram(&signal, &config)?;
/// assert_eq!(cgram.n_rows(), 31);
/// assert_eq!(cgram.n_cols(), 512 - 64 - 32);
/// # Ok::<(), cadence_dsp::CorrelogramError>(())
/// ```
pub fn compute_correlogram(
    signal: &[f64],
    config: &CorrelogramConfig,
) -> Result<Correlogram, CorrelogramError> {
    log::debug!(
        "Computing windowed correlogram: {} samples, wlen={}, n_delay={}, parallel={}",
        signal.len(),
        config.wlen,
        config.n_delay,
        config.parallel
    );

    if config.wlen == 0 {
        return Err(CorrelogramError::InvalidInput(
            "Window length must be > 0".to_string(),
        ));
    }

    if config.n_delay < 2 {
        return Err(CorrelogramError::InvalidInput(format!(
            "Need n_delay >= 2 for a non-empty correlogram, got {}",
            config.n_delay
        )));
    }

    let min_len = config.wlen + config.n_delay;
    if signal.len() <= min_len {
        return Err(CorrelogramError::InvalidInput(format!(
            "Signal too short: {} samples, need more than wlen + n_delay = {}",
            signal.len(),
            min_len
        )));
    }

    let n_offsets = signal.len() - config.wlen - config.n_delay;
    let dims = GridDims {
        n_delay: config.n_delay,
        n_offsets,
    };
    let n_rows = config.n_delay - 1;
    let mut data = vec![0.0; n_rows * n_offsets];

    if config.parallel {
        correlogram::correlogram_par(signal, config.wlen, dims, &mut data)?;
    } else {
        correlogram::correlogram(signal, config.wlen, dims, &mut data)?;
    }

    Ok(Correlogram::new(data, n_rows, n_offsets))
}
