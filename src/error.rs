use reqwest::StatusCode;
use thiserror::Error;

/// Anything that can go wrong while pulling data from the remote APIs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to deserialize {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Invalid token value")]
    InvalidToken,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;
