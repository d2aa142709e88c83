//! Error types shared by the grid, engine and board loader

use std::path::PathBuf;
use thiserror::Error;

/// Failures produced by the simulation core.
///
/// Every variant is recoverable: callers report it and let the user
/// reconfigure or pick another board.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("invalid grid dimensions {width}x{height} (each side must be in 1..={max})")]
    InvalidDimensions {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("population is {}x{} but the grid is {}x{}", found.0, found.1, expected.0, expected.1)]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("failed to allocate storage for {cells} cells")]
    AllocationFailure { cells: usize },

    #[error("board file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("unsupported board format: {} (only .txt files are accepted)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read board file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LifeError {
    /// True when the user should be sent back to change dimensions.
    pub fn needs_reconfiguration(&self) -> bool {
        matches!(
            self,
            LifeError::InvalidDimensions { .. } | LifeError::AllocationFailure { .. }
        )
    }
}

pub type LifeResult<T> = Result<T, LifeError>;
