use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    #[error("Invalid number of values: {got} (expected {expected})")]
    InvalidParamCount { expected: usize, got: usize },

    #[error("Invalid optional values: {0:?}")]
    InvalidOptionalParams(Vec<String>),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Invalid player team ID: {0}")]
    UnknownTeamId(u64),

    /// Data pulled is insufficient to build the requested value.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid match data: {0}")]
    InvalidData(String),

    #[error("Invalid header for provider {provider}: {name}")]
    InvalidHeader { provider: String, name: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status} from {url}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
