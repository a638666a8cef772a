use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("jira {name} is required ({hint})")]
    MissingSetting {
        name: &'static str,
        hint: &'static str,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("empty filter identifier")]
    EmptyIdentifier,

    #[error("filter {0:?} not found")]
    FilterNotFound(String),

    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {endpoint} was cancelled")]
    Cancelled { endpoint: String },

    #[error("jira api error ({endpoint}): status {status}: {message}")]
    ApiError {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("fetch filter {id}: {source}")]
    FilterFetch {
        id: i64,
        #[source]
        source: Box<ReportError>,
    },

    #[error("fetch issue {id}: {source}")]
    IssueFetch {
        id: String,
        #[source]
        source: Box<ReportError>,
    },

    #[error("filter {name:?} is missing a valid id")]
    InvalidFilter { name: String },

    #[error("filter {name:?} is missing searchUrl")]
    MissingSearchUrl { name: String },
}

impl ReportError {
    /// True when the server answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReportError::ApiError { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
