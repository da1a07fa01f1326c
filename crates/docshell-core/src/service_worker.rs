//! Service worker registry

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWorkerRegistration {
    pub script: String,
    pub scope: String,
}

#[async_trait]
pub trait ServiceWorkerRegistry: Send + Sync {
    async fn register(&self, script: &str) -> Result<ServiceWorkerRegistration>;

    /// Existing registration for `script`, if any
    async fn registration(&self, script: &str) -> Option<ServiceWorkerRegistration>;

    async fn unregister(&self, registration: &ServiceWorkerRegistration) -> bool;
}

/// In-memory registry; scope is the script's directory
#[derive(Default)]
pub struct MemoryServiceWorkerRegistry {
    registrations: RwLock<HashMap<String, ServiceWorkerRegistration>>,
    unavailable: bool,
}

impl MemoryServiceWorkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that rejects every registration
    pub fn unavailable() -> Self {
        Self {
            registrations: RwLock::new(HashMap::new()),
            unavailable: true,
        }
    }

    pub fn registered(&self) -> Vec<String> {
        self.registrations.read().keys().cloned().collect()
    }
}

#[async_trait]
impl ServiceWorkerRegistry for MemoryServiceWorkerRegistry {
    async fn register(&self, script: &str) -> Result<ServiceWorkerRegistration> {
        if self.unavailable {
            return Err(CoreError::ServiceWorker(format!(
                "registration rejected for {}",
                script
            )));
        }

        let scope = match script.rfind('/') {
            Some(idx) => script[..=idx].to_string(),
            None => "/".to_string(),
        };
        let registration = ServiceWorkerRegistration {
            script: script.to_string(),
            scope,
        };
        self.registrations
            .write()
            .insert(script.to_string(), registration.clone());
        Ok(registration)
    }

    async fn registration(&self, script: &str) -> Option<ServiceWorkerRegistration> {
        self.registrations.read().get(script).cloned()
    }

    async fn unregister(&self, registration: &ServiceWorkerRegistration) -> bool {
        self.registrations
            .write()
            .remove(&registration.script)
            .is_some()
    }
}
