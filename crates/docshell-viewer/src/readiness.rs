//! Rendering host readiness gate
//!
//! The rendering runtime announces itself once per page lifetime. Until then,
//! callers register callbacks that run in registration order when it does;
//! afterwards they run immediately.

use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;
use url::Url;

use docshell_fetch::Document;

use crate::page::HostElement;
use crate::Result;

/// Live instance of an attached document, opaque to the shell
pub type InstanceHandle = Arc<dyn Any + Send + Sync>;

/// Result of attaching a document to a host element
#[derive(Debug, Clone)]
pub struct AttachedDocument {
    pub title: Option<String>,
    pub instance: InstanceHandle,
}

/// The runtime that renders a document inside a host element
pub trait RenderingHost: Send + Sync {
    fn attach(
        &self,
        host: &HostElement,
        document: &Document,
        base_url: &Url,
    ) -> Result<AttachedDocument>;
}

type ReadyCallback = Box<dyn FnOnce(Arc<dyn RenderingHost>) + Send>;

enum ReadyState {
    Pending(Vec<ReadyCallback>),
    Ready(Arc<dyn RenderingHost>),
}

/// Single-assignment gate shared by every viewer on the page
#[derive(Clone)]
pub struct RenderReadiness {
    state: Arc<Mutex<ReadyState>>,
}

impl RenderReadiness {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ReadyState::Pending(Vec::new()))),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.lock(), ReadyState::Ready(_))
    }

    /// Run `callback` with the rendering host once it is available
    pub fn when_ready<F>(&self, callback: F)
    where
        F: FnOnce(Arc<dyn RenderingHost>) + Send + 'static,
    {
        let host = {
            let mut state = self.state.lock();
            match &mut *state {
                ReadyState::Pending(queue) => {
                    queue.push(Box::new(callback));
                    return;
                }
                ReadyState::Ready(host) => Arc::clone(host),
            }
        };
        callback(host);
    }

    /// Publish the rendering host and drain queued callbacks in order.
    ///
    /// Returns false if the host was already published; the second host is dropped.
    pub fn signal_ready(&self, host: Arc<dyn RenderingHost>) -> bool {
        let queued = {
            let mut state = self.state.lock();
            match &mut *state {
                ReadyState::Ready(_) => {
                    tracing::warn!("Rendering host signalled ready more than once");
                    return false;
                }
                ReadyState::Pending(queue) => {
                    let queued = std::mem::take(queue);
                    *state = ReadyState::Ready(Arc::clone(&host));
                    queued
                }
            }
        };

        tracing::info!(pending = queued.len(), "Rendering host ready");

        for callback in queued {
            callback(Arc::clone(&host));
        }
        true
    }
}

impl Default for RenderReadiness {
    fn default() -> Self {
        Self::new()
    }
}

/// Rendering host that attaches without drawing anything.
///
/// Reports the document's own title and hands back the document URL as the
/// instance handle. Used for headless runs.
#[derive(Debug, Default)]
pub struct StaticRenderer;

impl RenderingHost for StaticRenderer {
    fn attach(
        &self,
        host: &HostElement,
        document: &Document,
        base_url: &Url,
    ) -> Result<AttachedDocument> {
        tracing::debug!(host_id = %host.id, url = %base_url, "Static attach");
        Ok(AttachedDocument {
            title: document.title().map(str::to_string),
            instance: Arc::new(base_url.clone()),
        })
    }
}
