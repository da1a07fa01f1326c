//! Content viewer

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::oneshot;
use url::Url;

use docshell_fetch::Document;

use crate::error::ViewerError;
use crate::page::{HostElement, Page, ScriptTag};
use crate::readiness::{InstanceHandle, RenderReadiness};
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Class given to every host element
    pub host_class: String,
    /// Id of the page template used to seed host elements
    pub host_template_id: String,
    /// Script that installs the rendering runtime
    pub runtime_script: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            host_class: "amp-doc-host".to_string(),
            host_template_id: "amp-slot-template".to_string(),
            runtime_script: "/dist/amp-shadow.js".to_string(),
        }
    }
}

/// The document currently attached to the page
#[derive(Debug, Clone)]
pub struct MountedDocument {
    pub host_id: String,
    pub url: Url,
    pub title: Option<String>,
    pub instance: InstanceHandle,
    pub mounted_at: DateTime<Utc>,
}

/// Completion of one asynchronous attachment started by [`ContentViewer::show`].
///
/// Dropping the handle does not cancel the attachment.
#[derive(Debug)]
pub struct MountHandle {
    rx: oneshot::Receiver<Result<MountedDocument>>,
}

impl MountHandle {
    pub async fn wait(self) -> Result<MountedDocument> {
        self.rx.await.unwrap_or(Err(ViewerError::Abandoned))
    }
}

#[derive(Default)]
struct ViewerState {
    /// Base URL of the last shown document
    base_url: Option<Url>,
    mounted: Option<MountedDocument>,
}

pub struct ContentViewer {
    page: Arc<dyn Page>,
    readiness: RenderReadiness,
    config: ViewerConfig,
    state: Arc<RwLock<ViewerState>>,
}

impl ContentViewer {
    /// Create a viewer and install the rendering runtime into the page
    pub fn new(page: Arc<dyn Page>, readiness: RenderReadiness, config: ViewerConfig) -> Self {
        let viewer = Self {
            page,
            readiness,
            config,
            state: Arc::new(RwLock::new(ViewerState::default())),
        };
        viewer.install_script(ScriptTag::new(viewer.config.runtime_script.clone()));
        viewer
    }

    fn install_script(&self, script: ScriptTag) {
        self.page.install_script(&script);
        tracing::debug!(src = %script.src, "Script added");
    }

    pub fn readiness(&self) -> &RenderReadiness {
        &self.readiness
    }

    /// Empty the display container
    pub fn clear(&self) {
        self.page.clear_container();
    }

    /// Mount `document` in a fresh host element.
    ///
    /// The container is replaced synchronously; attachment happens once the
    /// rendering host is ready. Errors returned here come from the synchronous
    /// part only; attachment errors arrive through the [`MountHandle`].
    pub fn show(&self, document: Document, url: Url) -> Result<MountHandle> {
        tracing::info!(url = %url, title = ?document.title(), "Show document");

        self.page.clear_container();
        self.state.write().base_url = Some(url.clone());

        let mut host = HostElement::new(&self.config.host_class);
        host.content = self.page.template(&self.config.host_template_id);

        self.page.append_host(&host)?;

        let (tx, rx) = oneshot::channel();
        let page = Arc::clone(&self.page);
        let state = Arc::clone(&self.state);

        self.readiness.when_ready(move |renderer| {
            let result = renderer
                .attach(&host, &document, &url)
                .map(|attached| {
                    page.set_title(attached.title.as_deref().unwrap_or(""));
                    let mounted = MountedDocument {
                        host_id: host.id.clone(),
                        url: url.clone(),
                        title: attached.title,
                        instance: attached.instance,
                        mounted_at: Utc::now(),
                    };
                    state.write().mounted = Some(mounted.clone());
                    mounted
                });

            match &result {
                Ok(_) => tracing::debug!(host_id = %host.id, url = %url, "Document attached"),
                Err(e) => {
                    tracing::error!(host_id = %host.id, url = %url, error = %e, "Attach failed")
                }
            }

            let _ = tx.send(result);
        });

        Ok(MountHandle { rx })
    }

    /// The last document the rendering host attached
    pub fn mounted(&self) -> Option<MountedDocument> {
        self.state.read().mounted.clone()
    }

    /// Resolve `relative` against the last shown document's URL
    pub fn resolve_url(&self, relative: &str) -> Result<Url> {
        let base = self
            .state
            .read()
            .base_url
            .clone()
            .ok_or(ViewerError::NoBaseUrl)?;
        base.join(relative)
            .map_err(|e| ViewerError::InvalidUrl(format!("{}: {}", relative, e)))
    }

    pub fn origin_of(&self, relative: &str) -> Result<String> {
        Ok(self.resolve_url(relative)?.origin().ascii_serialization())
    }

    /// Messages from mounted documents are logged and otherwise dropped.
    pub fn on_message(&self, kind: &str, payload: &serde_json::Value) {
        tracing::debug!(kind = %kind, payload = %payload, "Received message");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use crate::readiness::{AttachedDocument, RenderingHost, StaticRenderer};

    fn doc(path: &str, title: &str) -> (Document, Url) {
        let url = Url::parse(&format!("https://example.com{}", path)).unwrap();
        let markup = format!("<html><head><title>{}</title></head></html>", title);
        (Document::parse(url.clone(), markup), url)
    }

    fn viewer(page: &Arc<MemoryPage>) -> ContentViewer {
        let page: Arc<dyn Page> = page.clone();
        ContentViewer::new(page, RenderReadiness::new(), ViewerConfig::default())
    }

    struct FailingRenderer;

    impl RenderingHost for FailingRenderer {
        fn attach(&self, _: &HostElement, _: &Document, _: &Url) -> Result<AttachedDocument> {
            Err(ViewerError::Attach("renderer crashed".to_string()))
        }
    }

    #[test]
    fn test_installs_runtime_script() {
        let page = MemoryPage::new();
        let _viewer = viewer(&page);

        let scripts = page.scripts();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].src, "/dist/amp-shadow.js");
    }

    #[tokio::test]
    async fn test_show_mounts_after_readiness() {
        let page = MemoryPage::new().with_template("amp-slot-template", "<slot></slot>");
        let viewer = viewer(&page);
        let (document, url) = doc("/pwa/a.amp.max.html", "A");

        let handle = viewer.show(document, url.clone()).unwrap();

        // Host is in place before the renderer exists
        let container = page.container();
        assert_eq!(container.len(), 1);
        assert_eq!(container[0].class, "amp-doc-host");
        assert_eq!(container[0].content.as_deref(), Some("<slot></slot>"));
        assert!(viewer.mounted().is_none());

        viewer.readiness().signal_ready(Arc::new(StaticRenderer));

        let mounted = handle.wait().await.unwrap();
        assert_eq!(mounted.url, url);
        assert_eq!(mounted.host_id, container[0].id);
        assert_eq!(page.title(), "A");
        assert_eq!(viewer.mounted().unwrap().title.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_queued_shows_attach_in_order() {
        let page = MemoryPage::new();
        let viewer = viewer(&page);

        let (a, a_url) = doc("/pwa/a.amp.max.html", "A");
        let (b, b_url) = doc("/pwa/b.amp.max.html", "B");
        let first = viewer.show(a, a_url).unwrap();
        let second = viewer.show(b, b_url.clone()).unwrap();

        // Only the latest host stays in the container
        assert_eq!(page.container().len(), 1);

        viewer.readiness().signal_ready(Arc::new(StaticRenderer));

        let first = first.wait().await.unwrap();
        let second = second.wait().await.unwrap();
        assert!(first.mounted_at <= second.mounted_at);
        assert_eq!(viewer.mounted().unwrap().url, b_url);
        assert_eq!(page.title(), "B");
    }

    #[tokio::test]
    async fn test_attach_failure_reported_on_handle() {
        let page = MemoryPage::new();
        let viewer = viewer(&page);
        viewer.readiness().signal_ready(Arc::new(FailingRenderer));

        let (document, url) = doc("/pwa/a.amp.max.html", "A");
        let err = viewer.show(document, url).unwrap().wait().await.unwrap_err();

        assert_eq!(err, ViewerError::Attach("renderer crashed".to_string()));
        assert!(viewer.mounted().is_none());
    }

    #[test]
    fn test_show_fails_on_detached_container() {
        let page = MemoryPage::new();
        let viewer = viewer(&page);
        page.detach_container();

        let (document, url) = doc("/pwa/a.amp.max.html", "A");
        assert!(matches!(
            viewer.show(document, url),
            Err(ViewerError::Container(_))
        ));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let page = MemoryPage::new();
        let viewer = viewer(&page);
        let (document, url) = doc("/pwa/a.amp.max.html", "A");
        viewer.show(document, url).unwrap();

        viewer.clear();
        viewer.clear();
        assert!(page.container().is_empty());
    }

    #[test]
    fn test_messages_leave_viewer_untouched() {
        let page = MemoryPage::new();
        let viewer = viewer(&page);
        viewer.readiness().signal_ready(Arc::new(StaticRenderer));
        let (document, url) = doc("/pwa/a.amp.max.html", "A");
        viewer.show(document, url.clone()).unwrap();

        viewer.on_message("documentHeight", &serde_json::json!({ "height": 1200 }));
        viewer.on_message("unknown", &serde_json::Value::Null);

        assert_eq!(page.container().len(), 1);
        assert_eq!(page.title(), "A");
        assert_eq!(viewer.mounted().unwrap().url, url);
    }

    #[test]
    fn test_resolve_against_last_document() {
        let page = MemoryPage::new();
        let viewer = viewer(&page);

        assert_eq!(viewer.resolve_url("img.png"), Err(ViewerError::NoBaseUrl));

        let (document, url) = doc("/pwa/articles/a.amp.max.html", "A");
        viewer.show(document, url).unwrap();

        assert_eq!(
            viewer.resolve_url("img.png").unwrap().as_str(),
            "https://example.com/pwa/articles/img.png"
        );
        assert_eq!(
            viewer.origin_of("https://cdn.example.org/x.js").unwrap(),
            "https://cdn.example.org"
        );
        assert_eq!(viewer.origin_of("/x").unwrap(), "https://example.com");
    }
}
