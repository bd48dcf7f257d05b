use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub API returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("invalid API url '{0}'")]
    InvalidUrl(String),
    #[error("release {0} has no usable upload url")]
    MissingUploadUrl(u64),
    #[error("failed to build client - invalid header value: {0}")]
    ReqwestHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("request error: {0}")]
    ReqwestMiddleware(#[from] reqwest_middleware::Error),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl GithubError {
    /**
        Returns the HTTP status this error was caused by, if any.
    */
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Reqwest(e) => e.status(),
            Self::ReqwestMiddleware(e) => e.status(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type GithubResult<T> = Result<T, GithubError>;
