//! Correlogram grid builders
//!
//! Drive the correlation kernel over a (delay, offset) grid and write shaped
//! values into a caller-owned row-major matrix. Two indexing strategies:
//!
//! - [`correlogram_delay`]: an explicit delay set, one output row per entry
//! - [`correlogram`]: implicit consecutive delays starting at 1, skipping
//!   the trivial zero-lag row
//!
//! The `_par` variants parallelize the traversal across delay rows with
//! rayon; each row owns a disjoint slice of the output buffer, so no
//! locking is needed. On success their output is identical to the
//! sequential builders.
//!
//! All grid and buffer bounds are validated before any loop executes. Any
//! degenerate (zero-variance) window pair aborts the whole traversal;
//! cells written before the failure are not valid output and the caller
//! must discard the buffer.

use rayon::prelude::*;

use crate::correlogram::kernel::corrcoef;
use crate::correlogram::shaping::shape;
use crate::correlogram::GridDims;
use crate::error::CorrelogramError;

/// Fill a correlogram grid from an explicit delay set.
///
/// Row `i` of the output holds shaped correlations at lag `delays[i]`;
/// column `t` corresponds to window offset `t`. Cell `(i, t)` is
/// `shape(corrcoef(sig, t, t + delays[i], wlen))`, stored at
/// `cgram[i * dims.n_offsets + t]`.
///
/// # Arguments
///
/// * `sig` - Signal buffer
/// * `delays` - Lag values in samples, one per output row; must have
///   `dims.n_delay` entries
/// * `wlen` - Correlation window length in samples
/// * `dims` - Grid shape: `n_delay` rows by `n_offsets` columns
/// * `cgram` - Caller-owned output buffer of `n_delay * n_offsets` cells,
///   row-major
///
/// # Errors
///
/// Returns `CorrelogramError` if:
/// - `wlen` is zero, `dims` is empty, `delays` does not match `dims.n_delay`,
///   or the buffer size does not match the grid
/// - The largest (offset, delay) pair would read past the end of `sig`
/// - Any window pair has zero variance (`DegenerateWindow`); the traversal
///   aborts and the buffer contents are invalid
pub fn correlogram_delay(
    sig: &[f64],
    delays: &[usize],
    wlen: usize,
    dims: GridDims,
    cgram: &mut [f64],
) -> Result<(), CorrelogramError> {
    validate_delay_grid(sig, delays, wlen, dims, cgram.len())?;

    log::debug!(
        "Computing delay-set correlogram: {} samples, {} delays x {} offsets, wlen={}",
        sig.len(),
        dims.n_delay,
        dims.n_offsets,
        wlen
    );

    for (row, &delay) in cgram.chunks_exact_mut(dims.n_offsets).zip(delays) {
        fill_row(sig, wlen, delay, row).map_err(|err| {
            log::error!("Correlation kernel failed, aborting correlogram: {}", err);
            err
        })?;
    }
    Ok(())
}

/// Parallel variant of [`correlogram_delay`].
///
/// Rows are distributed over the rayon thread pool. Rows already in flight
/// when a cell fails run to completion (they only read the signal and write
/// their own output slice); the aggregate result is still the failure and
/// the buffer must be discarded.
pub fn correlogram_delay_par(
    sig: &[f64],
    delays: &[usize],
    wlen: usize,
    dims: GridDims,
    cgram: &mut [f64],
) -> Result<(), CorrelogramError> {
    validate_delay_grid(sig, delays, wlen, dims, cgram.len())?;

    log::debug!(
        "Computing delay-set correlogram (parallel): {} samples, {} delays x {} offsets, wlen={}",
        sig.len(),
        dims.n_delay,
        dims.n_offsets,
        wlen
    );

    cgram
        .par_chunks_exact_mut(dims.n_offsets)
        .zip(delays.par_iter())
        .map(|(row, &delay)| fill_row(sig, wlen, delay, row))
        .reduce(|| Ok(()), |acc, row| acc.and(row))
        .map_err(|err| {
            log::error!("Correlation kernel failed, aborting correlogram: {}", err);
            err
        })
}

/// Fill a correlogram grid over consecutive delays `1..dims.n_delay`.
///
/// The zero-delay row is skipped entirely (zero-lag autocorrelation is
/// trivially 1), so the output has `dims.n_delay - 1` rows: row `d - 1`
/// holds shaped correlations at lag `d`. Cell `(d - 1, off)` is
/// `shape(corrcoef(sig, off, off + d, wlen))`, stored at
/// `cgram[(d - 1) * dims.n_offsets + off]`.
///
/// Equivalent to [`correlogram_delay`] with `delays = [1, 2, ..,
/// dims.n_delay - 1]`.
///
/// # Errors
///
/// Returns `CorrelogramError` if:
/// - `wlen` is zero, `dims` is empty, or the buffer size is not
///   `(dims.n_delay - 1) * dims.n_offsets`
/// - The largest (offset, delay) pair would read past the end of `sig`
/// - Any window pair has zero variance (`DegenerateWindow`); the traversal
///   aborts and the buffer contents are invalid
pub fn correlogram(
    sig: &[f64],
    wlen: usize,
    dims: GridDims,
    cgram: &mut [f64],
) -> Result<(), CorrelogramError> {
    validate_consecutive_grid(sig, wlen, dims, cgram.len())?;

    log::debug!(
        "Computing correlogram: {} samples, delays 1..{} x {} offsets, wlen={}",
        sig.len(),
        dims.n_delay,
        dims.n_offsets,
        wlen
    );

    for (row, delay) in cgram.chunks_exact_mut(dims.n_offsets).zip(1..dims.n_delay) {
        fill_row(sig, wlen, delay, row).map_err(|err| {
            log::error!("Correlation kernel failed, aborting correlogram: {}", err);
            err
        })?;
    }
    Ok(())
}

/// Parallel variant of [`correlogram`].
///
/// Same failure policy as [`correlogram_delay_par`]: in-flight rows finish,
/// the aggregate result reports the failure, the buffer is invalid.
pub fn correlogram_par(
    sig: &[f64],
    wlen: usize,
    dims: GridDims,
    cgram: &mut [f64],
) -> Result<(), CorrelogramError> {
    validate_consecutive_grid(sig, wlen, dims, cgram.len())?;

    log::debug!(
        "Computing correlogram (parallel): {} samples, delays 1..{} x {} offsets, wlen={}",
        sig.len(),
        dims.n_delay,
        dims.n_offsets,
        wlen
    );

    cgram
        .par_chunks_exact_mut(dims.n_offsets)
        .enumerate()
        .map(|(i, row)| fill_row(sig, wlen, i + 1, row))
        .reduce(|| Ok(()), |acc, row| acc.and(row))
        .map_err(|err| {
            log::error!("Correlation kernel failed, aborting correlogram: {}", err);
            err
        })
}

/// Fill one output row: shaped correlations at a fixed lag across all
/// window offsets.
fn fill_row(
    sig: &[f64],
    wlen: usize,
    delay: usize,
    row: &mut [f64],
) -> Result<(), CorrelogramError> {
    for (off, cell) in row.iter_mut().enumerate() {
        let r = corrcoef(sig, off, off + delay, wlen)?;
        *cell = shape(r);
    }
    Ok(())
}

fn validate_delay_grid(
    sig: &[f64],
    delays: &[usize],
    wlen: usize,
    dims: GridDims,
    buf_len: usize,
) -> Result<(), CorrelogramError> {
    validate_common(wlen, dims)?;

    if delays.len() != dims.n_delay {
        return Err(CorrelogramError::InvalidInput(format!(
            "Delay set has {} entries, grid expects {}",
            delays.len(),
            dims.n_delay
        )));
    }

    let expected = dims.n_delay.checked_mul(dims.n_offsets).ok_or_else(|| {
        CorrelogramError::InvalidInput(format!(
            "Grid size overflow: {} x {}",
            dims.n_delay, dims.n_offsets
        ))
    })?;
    if buf_len != expected {
        return Err(CorrelogramError::InvalidInput(format!(
            "Output buffer has {} cells, grid needs {}",
            buf_len, expected
        )));
    }

    let max_delay = delays.iter().copied().max().unwrap_or(0);
    validate_reach(sig, wlen, dims.n_offsets, max_delay)
}

fn validate_consecutive_grid(
    sig: &[f64],
    wlen: usize,
    dims: GridDims,
    buf_len: usize,
) -> Result<(), CorrelogramError> {
    validate_common(wlen, dims)?;

    let n_rows = dims.n_delay - 1;
    let expected = n_rows.checked_mul(dims.n_offsets).ok_or_else(|| {
        CorrelogramError::InvalidInput(format!(
            "Grid size overflow: {} x {}",
            n_rows, dims.n_offsets
        ))
    })?;
    if buf_len != expected {
        return Err(CorrelogramError::InvalidInput(format!(
            "Output buffer has {} cells, grid needs {} ({} delay rows x {} offsets)",
            buf_len, expected, n_rows, dims.n_offsets
        )));
    }

    validate_reach(sig, wlen, dims.n_offsets, dims.n_delay - 1)
}

fn validate_common(wlen: usize, dims: GridDims) -> Result<(), CorrelogramError> {
    if wlen == 0 {
        return Err(CorrelogramError::InvalidInput(
            "Window length must be > 0".to_string(),
        ));
    }
    if dims.n_delay == 0 {
        return Err(CorrelogramError::InvalidInput(
            "Grid must cover at least one delay".to_string(),
        ));
    }
    if dims.n_offsets == 0 {
        return Err(CorrelogramError::InvalidInput(
            "Grid must cover at least one offset".to_string(),
        ));
    }
    Ok(())
}

/// Check that the farthest-reaching window of the grid stays in bounds,
/// before any cell is computed.
fn validate_reach(
    sig: &[f64],
    wlen: usize,
    n_offsets: usize,
    max_delay: usize,
) -> Result<(), CorrelogramError> {
    let reach = (n_offsets - 1)
        .checked_add(max_delay)
        .and_then(|r| r.checked_add(wlen));
    match reach {
        Some(reach) if reach <= sig.len() => Ok(()),
        _ => Err(CorrelogramError::WindowOutOfBounds(format!(
            "Grid needs {} samples (max offset {} + max delay {} + wlen {}), signal has {}",
            reach.map_or_else(|| "overflowing".to_string(), |r| r.to_string()),
            n_offsets - 1,
            max_delay,
            wlen,
            sig.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_signal(len: usize, period: f64) -> Vec<f64> {
        (0..len)
            .map(|i| (i as f64 * 2.0 * std::f64::consts::PI / period).sin())
            .collect()
    }

    #[test]
    fn test_correlogram_ramp_delay_one() {
        // Equal-step windows at lag 1 correlate perfectly
        let sig: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let dims = GridDims {
            n_delay: 2,
            n_offsets: 3,
        };
        let mut cgram = vec![0.0; 3];

        correlogram(&sig, 4, dims, &mut cgram).unwrap();

        for (off, &cell) in cgram.iter().enumerate() {
            assert!(
                (cell - 1.0).abs() < 1e-12,
                "Cell at offset {} should be 1.0, got {}",
                off,
                cell
            );
        }
    }

    #[test]
    fn test_correlogram_dims_3x2() {
        // dims = [3, 2] produces a 2x2 matrix: row 0 is delay 1, row 1 delay 2
        let sig = sine_signal(32, 8.0);
        let dims = GridDims {
            n_delay: 3,
            n_offsets: 2,
        };
        let mut cgram = vec![0.0; 4];

        correlogram(&sig, 8, dims, &mut cgram).unwrap();

        for (delay, row) in (1..3).zip(cgram.chunks_exact(2)) {
            for (off, &cell) in row.iter().enumerate() {
                let expected = shape(corrcoef(&sig, off, off + delay, 8).unwrap());
                assert_eq!(cell, expected, "Mismatch at delay {}, offset {}", delay, off);
            }
        }
    }

    #[test]
    fn test_correlogram_period_peak() {
        // Lag equal to the period should score near 1, half-period near 0
        let period = 16;
        let sig = sine_signal(128, period as f64);
        let dims = GridDims {
            n_delay: 24,
            n_offsets: 16,
        };
        let mut cgram = vec![0.0; 23 * 16];

        correlogram(&sig, 32, dims, &mut cgram).unwrap();

        let at_period = cgram[(period - 1) * 16];
        let at_half = cgram[(period / 2 - 1) * 16];
        assert!(
            at_period > 0.99,
            "Full-period lag should shape to ~1.0, got {}",
            at_period
        );
        assert!(
            at_half < 1e-9,
            "Half-period lag is anti-correlated, should clamp to 0, got {}",
            at_half
        );
    }

    #[test]
    fn test_strategy_equivalence() {
        // Consecutive delays 1..n_delay must match the explicit delay set
        let sig = sine_signal(96, 12.0);
        let n_delay = 10;
        let n_offsets = 20;
        let wlen = 24;

        let mut implicit = vec![0.0; (n_delay - 1) * n_offsets];
        correlogram(
            &sig,
            wlen,
            GridDims {
                n_delay,
                n_offsets,
            },
            &mut implicit,
        )
        .unwrap();

        let delays: Vec<usize> = (1..n_delay).collect();
        let mut explicit = vec![0.0; delays.len() * n_offsets];
        correlogram_delay(
            &sig,
            &delays,
            wlen,
            GridDims {
                n_delay: delays.len(),
                n_offsets,
            },
            &mut explicit,
        )
        .unwrap();

        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sig = sine_signal(200, 14.0);
        let dims = GridDims {
            n_delay: 16,
            n_offsets: 40,
        };
        let wlen = 48;

        let mut seq = vec![0.0; 15 * 40];
        correlogram(&sig, wlen, dims, &mut seq).unwrap();

        let mut par = vec![0.0; 15 * 40];
        correlogram_par(&sig, wlen, dims, &mut par).unwrap();

        assert_eq!(seq, par);

        let delays: Vec<usize> = (1..16).collect();
        let delay_dims = GridDims {
            n_delay: 15,
            n_offsets: 40,
        };
        let mut seq_d = vec![0.0; 15 * 40];
        correlogram_delay(&sig, &delays, wlen, delay_dims, &mut seq_d).unwrap();

        let mut par_d = vec![0.0; 15 * 40];
        correlogram_delay_par(&sig, &delays, wlen, delay_dims, &mut par_d).unwrap();

        assert_eq!(seq_d, par_d);
    }

    #[test]
    fn test_correlogram_delay_row_semantics() {
        // Row i corresponds to delays[i], in delay-set order
        let sig = sine_signal(64, 10.0);
        let delays = vec![7, 2, 5];
        let dims = GridDims {
            n_delay: 3,
            n_offsets: 4,
        };
        let mut cgram = vec![0.0; 12];

        correlogram_delay(&sig, &delays, 16, dims, &mut cgram).unwrap();

        for (i, &delay) in delays.iter().enumerate() {
            for off in 0..4 {
                let expected = shape(corrcoef(&sig, off, off + delay, 16).unwrap());
                assert_eq!(cgram[i * 4 + off], expected);
            }
        }
    }

    #[test]
    fn test_constant_signal_aborts() {
        let sig = vec![5.0; 64];
        let dims = GridDims {
            n_delay: 4,
            n_offsets: 8,
        };
        let mut cgram = vec![0.0; 3 * 8];

        let result = correlogram(&sig, 16, dims, &mut cgram);
        assert!(matches!(
            result,
            Err(CorrelogramError::DegenerateWindow { .. })
        ));
    }

    #[test]
    fn test_embedded_degenerate_window_aborts() {
        // A single constant plateau among well-behaved windows must fail
        // the whole grid, not produce a partially-valid matrix
        let mut sig = sine_signal(64, 6.0);
        for cell in sig.iter_mut().skip(20).take(12) {
            *cell = 3.0;
        }
        let dims = GridDims {
            n_delay: 4,
            n_offsets: 32,
        };
        let mut cgram = vec![0.0; 3 * 32];

        let result = correlogram(&sig, 8, dims, &mut cgram);
        assert!(matches!(
            result,
            Err(CorrelogramError::DegenerateWindow { .. })
        ));

        let mut par_cgram = vec![0.0; 3 * 32];
        let result = correlogram_par(&sig, 8, dims, &mut par_cgram);
        assert!(matches!(
            result,
            Err(CorrelogramError::DegenerateWindow { .. })
        ));
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let sig = sine_signal(64, 8.0);
        let dims = GridDims {
            n_delay: 4,
            n_offsets: 8,
        };

        // Strategy B needs (n_delay - 1) * n_offsets cells
        let mut too_big = vec![0.0; 4 * 8];
        let result = correlogram(&sig, 8, dims, &mut too_big);
        assert!(matches!(result, Err(CorrelogramError::InvalidInput(_))));

        let mut too_small = vec![0.0; 2 * 8];
        let result = correlogram(&sig, 8, dims, &mut too_small);
        assert!(matches!(result, Err(CorrelogramError::InvalidInput(_))));
    }

    #[test]
    fn test_delay_set_length_mismatch() {
        let sig = sine_signal(64, 8.0);
        let delays = vec![1, 2];
        let dims = GridDims {
            n_delay: 3,
            n_offsets: 8,
        };
        let mut cgram = vec![0.0; 3 * 8];

        let result = correlogram_delay(&sig, &delays, 8, dims, &mut cgram);
        assert!(matches!(result, Err(CorrelogramError::InvalidInput(_))));
    }

    #[test]
    fn test_grid_reach_validated_before_loop() {
        let sig = sine_signal(32, 8.0);
        let dims = GridDims {
            n_delay: 8,
            n_offsets: 16,
        };
        // max offset 15 + max delay 7 + wlen 16 = 38 > 32
        let mut cgram = vec![0.0; 7 * 16];

        let result = correlogram(&sig, 16, dims, &mut cgram);
        assert!(matches!(
            result,
            Err(CorrelogramError::WindowOutOfBounds(_))
        ));
        // Nothing was written
        assert!(cgram.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_zero_dims_rejected() {
        let sig = sine_signal(64, 8.0);
        let mut cgram = vec![0.0; 0];

        let result = correlogram(
            &sig,
            8,
            GridDims {
                n_delay: 0,
                n_offsets: 8,
            },
            &mut cgram,
        );
        assert!(matches!(result, Err(CorrelogramError::InvalidInput(_))));

        let result = correlogram(
            &sig,
            8,
            GridDims {
                n_delay: 4,
                n_offsets: 0,
            },
            &mut cgram,
        );
        assert!(matches!(result, Err(CorrelogramError::InvalidInput(_))));
    }
}
