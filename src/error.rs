use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PennsieveError {
    #[error("agent session is not connected")]
    AgentUnavailable,

    #[error("unknown profile: {0}")]
    ProfileNotFound(String),

    #[error("discover request failed: {0}")]
    DiscoverHttp(String),

    #[error("discover returned status {status} for {url}: {message}")]
    DiscoverStatus {
        status: u16,
        url: String,
        message: String,
    },

    #[error("unexpected discover response: {0}")]
    DiscoverResponse(String),

    #[error("zipit request failed: {0}")]
    ZipitHttp(String),

    #[error("zipit returned status {status}: {message}")]
    ZipitStatus { status: u16, message: String },

    #[error("download batch must reference a single dataset and version, found {found}")]
    MixedDatasetBatch { found: usize },

    #[error("malformed file uri: {0}")]
    MalformedUri(String),

    #[error("failed to write download to {path}: {message}")]
    DownloadWrite { path: PathBuf, message: String },

    #[error("invalid order field: {0}")]
    InvalidOrderBy(String),

    #[error("invalid order direction: {0}")]
    InvalidOrderDirection(String),

    #[error("missing config file pennsieve.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
