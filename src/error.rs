use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or decoding the quote dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("loader thread stopped before reporting a result")]
    Interrupted,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum LikeStoreError {
    #[error("failed to access like store {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode like store: {0}")]
    Json(#[from] serde_json::Error),
}
