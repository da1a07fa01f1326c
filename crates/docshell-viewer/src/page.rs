//! Page surface touched by the viewer

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ViewerError;
use crate::Result;

/// Element a document is mounted into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostElement {
    pub id: String,
    pub class: String,
    /// Markup cloned from the page's host template, if any
    pub content: Option<String>,
}

impl HostElement {
    pub fn new(class: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            class: class.to_string(),
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTag {
    pub src: String,
    pub custom_element: Option<String>,
    pub custom_template: Option<String>,
}

impl ScriptTag {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            custom_element: None,
            custom_template: None,
        }
    }
}

/// The shell page: its display container, templates, title and head
pub trait Page: Send + Sync {
    /// Remove everything from the display container
    fn clear_container(&self);

    fn append_host(&self, host: &HostElement) -> Result<()>;

    /// Content of the template element with the given id
    fn template(&self, id: &str) -> Option<String>;

    fn set_title(&self, title: &str);

    fn install_script(&self, script: &ScriptTag);
}

#[derive(Debug, Default)]
struct PageState {
    container: Vec<HostElement>,
    templates: HashMap<String, String>,
    title: String,
    scripts: Vec<ScriptTag>,
    detached: bool,
}

/// In-memory [`Page`] for headless runs and tests
#[derive(Debug, Default)]
pub struct MemoryPage {
    state: RwLock<PageState>,
}

impl MemoryPage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_template(self: Arc<Self>, id: &str, content: &str) -> Arc<Self> {
        self.state
            .write()
            .templates
            .insert(id.to_string(), content.to_string());
        self
    }

    /// Make further `append_host` calls fail, as with a container removed from the page
    pub fn detach_container(&self) {
        self.state.write().detached = true;
    }

    pub fn container(&self) -> Vec<HostElement> {
        self.state.read().container.clone()
    }

    pub fn title(&self) -> String {
        self.state.read().title.clone()
    }

    pub fn scripts(&self) -> Vec<ScriptTag> {
        self.state.read().scripts.clone()
    }
}

impl Page for MemoryPage {
    fn clear_container(&self) {
        self.state.write().container.clear();
    }

    fn append_host(&self, host: &HostElement) -> Result<()> {
        let mut state = self.state.write();
        if state.detached {
            return Err(ViewerError::Container(
                "display container is not attached to the page".to_string(),
            ));
        }
        state.container.push(host.clone());
        Ok(())
    }

    fn template(&self, id: &str) -> Option<String> {
        self.state.read().templates.get(id).cloned()
    }

    fn set_title(&self, title: &str) {
        self.state.write().title = title.to_string();
    }

    fn install_script(&self, script: &ScriptTag) {
        self.state.write().scripts.push(script.clone());
    }
}
