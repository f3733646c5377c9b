use thiserror::Error;

/// Terminal outcome of a failed call. The client never retries.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection or timeout failure, or a non-success status with no body.
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// A body arrived but did not match the expected shape. Error statuses
    /// that carry a body end up here too.
    #[error("decode failure: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("empty response body")]
    EmptyResponse,

    /// The request could not be built; no I/O was attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The caller's cancellation token fired before completion.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Raw body of a response that failed to decode.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            ApiError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Network(e) if e.is_timeout())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
