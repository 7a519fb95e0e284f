//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

use crate::core::color::ColorError;

/// The data resource could not be turned into records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("`{path}` is not a JSON array of flat records: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Precise figure-specification faults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("figure specification missing field `{0}`")]
    MissingField(&'static str),
    #[error("y domain low {low} must be finite and < high {high}")]
    InvalidRange { low: f64, high: f64 },
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("cannot encode records: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal too small: need ≥{want_w}×{want_h}, got {got_w}×{got_h}")]
    GraphTooSmall {
        want_w: usize,
        want_h: usize,
        got_w: usize,
        got_h: usize,
    },
    #[error("no plottable records (need `{facet}`, `{x}` and numeric `{y}`)")]
    EmptyData { facet: String, x: String, y: String },
}
