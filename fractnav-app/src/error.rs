use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the application layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write preferences to {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode preferences: {0}")]
    ConfigEncode(#[from] serde_json::Error),

    #[error("invalid screen size {width}×{height} (both must be > 0)")]
    InvalidScreen { width: i32, height: i32 },

    #[error("unknown key name {0:?}")]
    InvalidKey(String),

    #[error("terminal display failed: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("failed to write image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Render(#[from] fractnav_render::RenderError),

    #[error(transparent)]
    Core(#[from] fractnav_core::CoreError),
}
