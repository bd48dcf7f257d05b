use std::path::PathBuf;

use thiserror::Error;

use crate::api::GithubError;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("missing required input '{0}'")]
    MissingInput(&'static str),
    #[error("missing required environment variable '{0}'")]
    MissingContext(&'static str),
    #[error("invalid repository '{0}' - expected 'owner/name'")]
    InvalidRepository(String),
    #[error("invalid API url: {0}")]
    InvalidApiUrl(String),
    #[error("invalid asset '{entry}' - {reason}")]
    InvalidAsset { entry: String, reason: String },
    #[error("failed to read asset '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{operation} failed after {attempts} attempt(s), aborting")]
    RetryExhausted {
        operation: String,
        attempts: u32,
        #[source]
        source: Option<Box<ReleaseError>>,
    },
    #[error("failed to upload {} of {total} asset(s): {}", failed.len(), failed.join(", "))]
    UploadsFailed { failed: Vec<String>, total: usize },
    #[error("GitHub error: {0}")]
    Github(#[from] GithubError),
}

pub type ReleaseResult<T> = Result<T, ReleaseError>;
