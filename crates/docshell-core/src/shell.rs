//! Shell navigation state machine
//!
//! ```text
//! link activation ─┐
//!                  ├─▶ navigate_to(path) ─▶ history write ─▶ home? clear
//! history pop ─────┘                                      └▶ fetch ─▶ show
//! ```
//!
//! `navigate_to` updates the location and address bar and starts the fetch
//! before it returns; the returned future only reports how the fetch and the
//! hand-off to the viewer ended. Dropping it cancels nothing, and overlapping
//! navigations are not cancelled either: the last fetch to finish mounts.

use futures_util::future::{self, BoxFuture, FutureExt};
use parking_lot::RwLock;
use std::sync::Arc;
use url::Url;

use docshell_fetch::DocumentFetcher;
use docshell_navigation::{
    evaluate_activation, history_mode, ActivationOutcome, HistoryMode, IntentSource,
    LinkActivation, NavigationError, NavigationIntent, NodeTree, PathScope,
};
use docshell_viewer::{ContentViewer, MountHandle, Page, RenderReadiness};

use crate::config::ShellConfig;
use crate::error::CoreError;
use crate::host::NavigationHost;
use crate::service_worker::ServiceWorkerRegistry;
use crate::Result;

/// Completion of a navigation's fetch and hand-off to the viewer
pub type PendingNavigation = BoxFuture<'static, Result<Navigated>>;

/// How a completed navigation ended
#[derive(Debug)]
pub enum Navigated {
    /// Shell home: the viewer was cleared, nothing fetched
    Cleared,
    /// Document fetched and handed to the viewer; attachment may still be pending
    Shown(MountHandle),
}

/// Response to a link activation
pub struct LinkHandling {
    /// Whether the event's default action must be suppressed
    pub prevent_default: bool,
    pub outcome: ActivationOutcome,
    pub navigation: Option<PendingNavigation>,
}

/// Capabilities the shell runs against
pub struct ShellHosts {
    pub navigation: Arc<dyn NavigationHost>,
    pub fetcher: Arc<dyn DocumentFetcher>,
    pub page: Arc<dyn Page>,
    pub readiness: RenderReadiness,
    /// `None` where the platform has no service workers
    pub service_workers: Option<Arc<dyn ServiceWorkerRegistry>>,
}

struct ShellInner {
    scope: PathScope,
    navigation: Arc<dyn NavigationHost>,
    fetcher: Arc<dyn DocumentFetcher>,
    viewer: ContentViewer,
    service_workers: Option<Arc<dyn ServiceWorkerRegistry>>,
    service_worker_script: String,
    current: RwLock<String>,
}

#[derive(Clone)]
pub struct Shell {
    inner: Arc<ShellInner>,
}

impl Shell {
    /// Create the shell at the page's current address and navigate there.
    ///
    /// Also starts service worker registration in the background when a
    /// registry is available.
    pub fn launch(
        config: &ShellConfig,
        hosts: ShellHosts,
    ) -> Result<(Self, Option<PendingNavigation>)> {
        let scope = config.scope()?;
        let current = hosts.navigation.location().path().to_string();
        let viewer = ContentViewer::new(hosts.page, hosts.readiness, config.viewer.clone());

        let shell = Self {
            inner: Arc::new(ShellInner {
                scope,
                navigation: hosts.navigation,
                fetcher: hosts.fetcher,
                viewer,
                service_workers: hosts.service_workers,
                service_worker_script: config.service_worker_script.clone(),
                current: RwLock::new(current.clone()),
            }),
        };

        tracing::info!(location = %current, "Shell created");

        let initial = if current.is_empty() {
            None
        } else {
            Some(shell.navigate(NavigationIntent::new(current, IntentSource::Launch)))
        };

        shell.register_service_worker();

        Ok((shell, initial))
    }

    pub fn current_location(&self) -> String {
        self.inner.current.read().clone()
    }

    pub fn viewer(&self) -> &ContentViewer {
        &self.inner.viewer
    }

    pub fn scope(&self) -> &PathScope {
        &self.inner.scope
    }

    /// Resolve `path` against the page address
    pub fn resolve_url(&self, path: &str) -> Result<Url> {
        self.inner
            .navigation
            .location()
            .join(path)
            .map_err(|e| NavigationError::InvalidUrl(format!("{}: {}", path, e)).into())
    }

    /// Handle a click that bubbled up to the document root
    pub fn handle_link_activation<T: NodeTree>(
        &self,
        tree: &T,
        event: &LinkActivation<T::NodeId>,
    ) -> LinkHandling {
        let page = self.inner.navigation.location();
        let current = self.current_location();
        let outcome = evaluate_activation(&self.inner.scope, &page, tree, event, &current);

        let navigation = match &outcome {
            ActivationOutcome::Navigate(intent) => {
                tracing::info!(path = %intent.path, "Internal link");
                Some(self.navigate(intent.clone()))
            }
            ActivationOutcome::Unchanged(path) => {
                tracing::debug!(path = %path, "Link to current location");
                None
            }
            ActivationOutcome::Ignored(reason) => {
                tracing::trace!(reason = ?reason, "Link activation ignored");
                None
            }
        };

        LinkHandling {
            prevent_default: outcome.prevents_default(),
            outcome,
            navigation,
        }
    }

    /// React to the browser popping a history entry
    pub fn handle_pop_state(&self) -> Option<PendingNavigation> {
        let path = self.inner.navigation.location().path().to_string();
        let current = self.current_location();
        tracing::info!(path = %path, current = %current, "Pop state");

        // The address bar holds the encoded form of whatever was navigated to
        let shown = self.resolve_url(&current).ok().map(|url| url.path().to_string());
        if path == current || shown.as_deref() == Some(path.as_str()) {
            return None;
        }
        Some(self.navigate(NavigationIntent::new(path, IntentSource::PopState)))
    }

    /// Move the shell to `path`
    pub fn navigate_to(&self, path: &str) -> PendingNavigation {
        self.navigate(NavigationIntent::new(path, IntentSource::Direct))
    }

    fn navigate(&self, intent: NavigationIntent) -> PendingNavigation {
        let inner = &self.inner;
        let path = intent.path;
        tracing::info!(path = %path, source = ?intent.source, "Navigate");

        let target = match self.resolve_url(&path) {
            Ok(url) => url,
            Err(e) => return future::ready(Err(e)).boxed(),
        };

        let old = std::mem::replace(&mut *inner.current.write(), path.clone());

        let mode = history_mode(&inner.scope, &old, &path);
        if inner.navigation.location().path() != target.path() {
            tracing::debug!(from = %old, to = %path, mode = %mode, "History write");
            match mode {
                HistoryMode::Push => inner.navigation.push_state(&target),
                HistoryMode::Replace => inner.navigation.replace_state(&target),
            }
        }

        if inner.scope.is_shell_home(&path) {
            tracing::info!("Back to shell");
            inner.viewer.clear();
            return future::ready(Ok(Navigated::Cleared)).boxed();
        }

        let inner = Arc::clone(&self.inner);
        let work = async move {
            tracing::info!(path = %path, url = %target, "Fetch and render document");

            let document = inner.fetcher.fetch(&target).await.map_err(|e| {
                tracing::warn!(path = %path, error = %e, "Document fetch failed");
                e
            })?;

            tracing::debug!(path = %path, "Fetch complete");
            let handle = inner.viewer.show(document, target)?;
            Ok::<_, CoreError>(Navigated::Shown(handle))
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime; fetch starts when the navigation is awaited");
            return work.boxed();
        };

        let task = runtime.spawn(work);
        async move {
            match task.await {
                Ok(result) => result,
                Err(e) => Err(CoreError::Task(e.to_string())),
            }
        }
        .boxed()
    }

    fn register_service_worker(&self) {
        let Some(registry) = self.inner.service_workers.clone() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime; skipping service worker registration");
            return;
        };

        let script = self.inner.service_worker_script.clone();
        tracing::info!(script = %script, "Register service worker");

        runtime.spawn(async move {
            match registry.register(&script).await {
                Ok(reg) => tracing::info!(scope = %reg.scope, "Service worker registered"),
                Err(e) => tracing::warn!(error = %e, "Service worker registration failed"),
            }
        });
    }

    /// Remove the service worker registered at launch. Returns whether one was removed.
    pub async fn unregister_service_worker(&self) -> bool {
        let Some(registry) = self.inner.service_workers.clone() else {
            return false;
        };
        let script = &self.inner.service_worker_script;

        let Some(reg) = registry.registration(script).await else {
            return false;
        };
        tracing::info!(scope = %reg.scope, "Service worker found");

        let removed = registry.unregister(&reg).await;
        if removed {
            tracing::info!("Service worker unregistered");
        }
        removed
    }
}
