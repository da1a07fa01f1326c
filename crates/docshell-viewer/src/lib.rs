//! docshell Content Viewer
//!
//! Owns the mounted-document lifecycle inside the page's display container.
//! The rendering host becomes available once per page lifetime; every
//! `show()` queues behind that moment and attaches its own document.

mod error;
mod page;
mod readiness;
mod viewer;

pub use error::ViewerError;
pub use page::{HostElement, MemoryPage, Page, ScriptTag};
pub use readiness::{
    AttachedDocument, InstanceHandle, RenderReadiness, RenderingHost, StaticRenderer,
};
pub use viewer::{ContentViewer, MountHandle, MountedDocument, ViewerConfig};

pub type Result<T> = std::result::Result<T, ViewerError>;
