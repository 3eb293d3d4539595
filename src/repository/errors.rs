use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl RepositoryError {
    /// Whether retrying the same call later may succeed.
    ///
    /// A confirmed "not found" and client-side (4xx) rejections are definitive.
    pub fn is_transient(&self) -> bool {
        match self {
            RepositoryError::NotFound => false,
            RepositoryError::ApiError { status, .. } => *status >= 500,
            RepositoryError::ConnectionError(_)
            | RepositoryError::DecodeError(_)
            | RepositoryError::Unexpected(_) => true,
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return RepositoryError::DecodeError(err.to_string());
        }

        if let Some(status) = err.status() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return RepositoryError::NotFound;
            }
            return RepositoryError::ApiError {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }

        if err.is_timeout() || err.is_connect() || err.is_request() {
            return RepositoryError::ConnectionError(err.to_string());
        }

        RepositoryError::Unexpected(format!("Unexpected HTTP client error: {err}"))
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::DecodeError(err.to_string())
    }
}
