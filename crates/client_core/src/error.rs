use shared::domain::UserId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpSetup(#[source] reqwest::Error),
    #[error("server rejected the user data: {message}")]
    Validation { message: String },
    #[error("user {id} not found")]
    NotFound { id: UserId },
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err)
        } else {
            Self::Network(err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpSetup(_))
    }
}
