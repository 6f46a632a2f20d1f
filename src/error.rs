//! Configuration errors
//!
//! Generation itself is total; only loading or validating a constant set
//! can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::LevelConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("invalid range for {field}: min {min} > max {max}")]
    InvalidSpan {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("probability {field} out of [0, 1]: {value}")]
    Probability { field: &'static str, value: f64 },

    #[error("{field} rise {rise} is not below the jump apex {max_height}")]
    RiseOutOfReach {
        field: &'static str,
        rise: f64,
        max_height: f64,
    },

    #[error("{field} spans {distance}px but a jump at rise {rise} covers only {reach}px")]
    SpreadOutOfReach {
        field: &'static str,
        distance: f64,
        rise: f64,
        reach: f64,
    },

    #[error("{field} ({width}) does not fit in chunk width {chunk_width}")]
    TooWide {
        field: &'static str,
        width: f64,
        chunk_width: f64,
    },
}
