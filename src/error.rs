//! Error types
//!
//! Everything that can fail happens at load time. Per-frame logic is total.

use std::path::PathBuf;

use thiserror::Error;

/// Level construction failures
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Expecting scene to have exactly one camera, but it has {0}")]
    CameraCount(usize),

    #[error("Scene has no transform named {0:?}")]
    MissingNode(&'static str),

    #[error("Camera {camera} refers to transform {transform}, but the scene only has {count}")]
    DanglingCamera {
        camera: usize,
        transform: usize,
        count: usize,
    },

    #[error("Failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed level description: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tuning file failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read tuning {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// Audio asset failures
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Sample not found: {0}")]
    SampleNotFound(String),
}
