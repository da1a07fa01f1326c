//! Shell configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use docshell_navigation::PathScope;
use docshell_viewer::ViewerConfig;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Path prefix the shell owns
    pub managed_prefix: String,
    /// Pattern that marks a path as a content document
    pub content_pattern: String,
    /// Exact paths of the shell home
    pub home_paths: Vec<String>,
    /// Service worker script registered at launch
    pub service_worker_script: String,
    /// User agent for document requests
    pub user_agent: String,
    pub viewer: ViewerConfig,
}

impl ShellConfig {
    /// Load a config from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&raw)?;
        config.scope()?;
        Ok(config)
    }

    /// The validated path scope
    pub fn scope(&self) -> Result<PathScope> {
        Ok(PathScope::new(
            self.managed_prefix.clone(),
            self.content_pattern.clone(),
            self.home_paths.clone(),
        )?)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        let scope = PathScope::default();
        Self {
            managed_prefix: scope.managed_prefix().to_string(),
            content_pattern: scope.content_pattern().to_string(),
            home_paths: scope.home_paths().to_vec(),
            service_worker_script: "/pwa/pwa-sw.js".to_string(),
            user_agent: "Mozilla/5.0 (docshell)".to_string(),
            viewer: ViewerConfig::default(),
        }
    }
}
