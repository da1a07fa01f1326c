//! Fetch error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Unknown HTTP status {0}")]
    InvalidStatus(u16),

    #[error("No parsed document")]
    NoParsedDocument,

    #[error("Network failure: {0}")]
    Network(String),

    #[error("Request aborted: {0}")]
    Aborted(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}
