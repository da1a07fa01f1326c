//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Navigation error: {0}")]
    Navigation(#[from] docshell_navigation::NavigationError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] docshell_fetch::FetchError),

    #[error("Viewer error: {0}")]
    Viewer(#[from] docshell_viewer::ViewerError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service worker error: {0}")]
    ServiceWorker(String),

    #[error("Navigation task failed: {0}")]
    Task(String),
}
