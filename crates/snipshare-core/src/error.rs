use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the ephemeral key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key-value store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("key-value store returned status {status} for key {key}")]
    Status { status: u16, key: String },

    #[error("invalid key-value store endpoint: {0}")]
    Endpoint(String),
}

/// Outcomes of the ephemeral create/fetch operations that are not a snippet.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("missing id")]
    MissingId,

    #[error("snippet not found: {0}")]
    NotFound(String),

    #[error("stored snippet {id} is corrupt: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode snippet: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure reading from the durable record store.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("failed to fetch code data: {0}")]
    Fetch(String),
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("missing id")]
    MissingId,

    #[error(transparent)]
    Record(#[from] RecordError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SnipshareError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Share(#[from] ShareError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SnipshareError>;
