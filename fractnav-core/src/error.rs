use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the core engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid escape threshold: {0} (must be > 0.0)")]
    InvalidThreshold(f64),

    #[error("failed to write zoom history to {path}: {source}")]
    HistoryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
