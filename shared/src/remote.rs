use thiserror::Error;

use crate::model::RawMovie;
use crate::status::FailureReason;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("remote call timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("remote error: {0}")]
    Other(String),
}

impl RemoteError {
    /// Collapse into one of the two reasons a consumer can tell apart.
    pub fn failure_reason(&self) -> FailureReason {
        match self {
            Self::Timeout => FailureReason::Timeout,
            Self::Network(_) | Self::Decode(_) | Self::Other(_) => FailureReason::NetworkError,
        }
    }
}

/// Source of the popular movie list. The HTTP client lives on the platform side.
#[async_trait::async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_list(&self) -> Result<Vec<RawMovie>, RemoteError>;
}
