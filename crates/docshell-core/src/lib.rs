//! docshell Core
//!
//! The shell controller: turns link activations and history pops into
//! fetch-and-mount cycles, keeping the address bar in step with its location.

mod config;
mod error;
mod host;
pub mod media;
mod service_worker;
mod shell;

pub use config::ShellConfig;
pub use error::CoreError;
pub use host::{MemoryNavigationHost, NavigationHost};
pub use service_worker::{
    MemoryServiceWorkerRegistry, ServiceWorkerRegistration, ServiceWorkerRegistry,
};
pub use shell::{LinkHandling, Navigated, PendingNavigation, Shell, ShellHosts};

// Re-export the collaborating crates
pub use docshell_fetch::{Document, DocumentFetcher, FetchError, HttpFetcher};
pub use docshell_navigation::{
    history_mode, ActivationOutcome, ElementId, ElementTree, HistoryMode, IgnoreReason,
    IntentSource, LinkActivation, Modifiers, NavigationError, NavigationIntent, NodeTree,
    PathScope,
};
pub use docshell_viewer::{
    AttachedDocument, ContentViewer, HostElement, MemoryPage, MountHandle, MountedDocument,
    Page, RenderReadiness, RenderingHost, StaticRenderer, ViewerConfig, ViewerError,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
