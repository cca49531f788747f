//! Pearson correlation kernel
//!
//! Computes the correlation coefficient between two equal-length windows of
//! a shared signal buffer, identified by their start offsets. Uses the
//! single-pass sum-of-products formulation:
//!
//! ```text
//! cov     = Σxy − (Σx·Σy)/n
//! pop_std = sqrt(Σx² − (Σx)²/n) · sqrt(Σy² − (Σy)²/n)
//! r       = cov / pop_std
//! ```
//!
//! One linear scan instead of the two a mean-centered formulation needs,
//! at the cost of some numerical stability for signals with large DC
//! offset. A zero `pop_std` (either window is constant) makes Pearson's r
//! undefined and is reported as [`CorrelogramError::DegenerateWindow`].

use crate::error::CorrelogramError;

/// Pearson correlation coefficient between `data[off_x..off_x+n]` and
/// `data[off_y..off_y+n]`.
///
/// The two windows may overlap; overlapping windows are numerically valid.
///
/// # Arguments
///
/// * `data` - Shared signal buffer
/// * `off_x` - Start offset of the first window
/// * `off_y` - Start offset of the second window
/// * `n` - Window length in samples
///
/// # Returns
///
/// Correlation coefficient in [-1.0, 1.0]
///
/// # Errors
///
/// Returns `CorrelogramError` if:
/// - `n` is zero or either window extends past the end of `data`
/// - Either window has zero variance (`DegenerateWindow`)
///
/// # Example
///
/// ```
/// use cadence_dsp::correlogram::kernel::corrcoef;
///
/// let sig: Vec<f64> = (1..=10).map(|i| i as f64).collect();
/// let r = corrcoef(&sig, 0, 1, 4)?;
/// assert!((r - 1.0).abs() < 1e-12);
/// # Ok::<(), cadence_dsp::CorrelogramError>(())
/// ```
pub fn corrcoef(
    data: &[f64],
    off_x: usize,
    off_y: usize,
    n: usize,
) -> Result<f64, CorrelogramError> {
    if n == 0 {
        return Err(CorrelogramError::InvalidInput(
            "Window length must be > 0".to_string(),
        ));
    }

    let end_x = off_x
        .checked_add(n)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            CorrelogramError::WindowOutOfBounds(format!(
                "window [{}, {}+{}) exceeds signal length {}",
                off_x,
                off_x,
                n,
                data.len()
            ))
        })?;
    let end_y = off_y
        .checked_add(n)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            CorrelogramError::WindowOutOfBounds(format!(
                "window [{}, {}+{}) exceeds signal length {}",
                off_y,
                off_y,
                n,
                data.len()
            ))
        })?;

    let mut s_x = 0.0;
    let mut s_y = 0.0;
    let mut s_xy = 0.0;
    let mut s_sq_x = 0.0;
    let mut s_sq_y = 0.0;

    for (&xi, &yi) in data[off_x..end_x].iter().zip(&data[off_y..end_y]) {
        s_x += xi;
        s_y += yi;
        s_xy += xi * yi;
        s_sq_x += xi * xi;
        s_sq_y += yi * yi;
    }

    let n = n as f64;
    let cov = s_xy - s_x * s_y / n;
    let ms_x = s_x * s_x / n;
    let ms_y = s_y * s_y / n;
    let pop_std = (s_sq_x - ms_x).sqrt() * (s_sq_y - ms_y).sqrt();

    if pop_std == 0.0 {
        log::warn!(
            "Zero variance in correlation window pair at offsets ({}, {})",
            off_x,
            off_y
        );
        return Err(CorrelogramError::DegenerateWindow { off_x, off_y });
    }

    Ok(cov / pop_std)
}
