//! Viewer error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error("No document has been shown yet")]
    NoBaseUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Container error: {0}")]
    Container(String),

    #[error("Attach failed: {0}")]
    Attach(String),

    #[error("Mount abandoned before the rendering host attached it")]
    Abandoned,
}
