//! Error types for the correlogram engine

use std::fmt;

/// Errors that can occur during correlogram computation
#[derive(Debug, Clone, PartialEq)]
pub enum CorrelogramError {
    /// Invalid input parameters (empty signal, zero window length,
    /// mismatched buffer size, etc.)
    InvalidInput(String),

    /// A correlation window extends past the end of the signal
    WindowOutOfBounds(String),

    /// Zero-variance window pair: Pearson's r is undefined because the
    /// denominator of the correlation coefficient is zero
    DegenerateWindow {
        /// Start offset of the first window
        off_x: usize,
        /// Start offset of the second window
        off_y: usize,
    },
}

impl fmt::Display for CorrelogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelogramError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CorrelogramError::WindowOutOfBounds(msg) => {
                write!(f, "Window out of bounds: {}", msg)
            }
            CorrelogramError::DegenerateWindow { off_x, off_y } => write!(
                f,
                "Degenerate window pair at offsets ({}, {}): zero variance",
                off_x, off_y
            ),
        }
    }
}

impl std::error::Error for CorrelogramError {}
