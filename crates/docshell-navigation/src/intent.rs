//! Navigation intents

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentSource {
    /// The shell navigating to its own address at launch
    Launch,
    /// An in-app link activation
    Link,
    /// The browser popped a history entry
    PopState,
    /// A direct call from the embedding application
    Direct,
}

/// A single request to move the shell to a path. Consumed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub path: String,
    pub source: IntentSource,
}

impl NavigationIntent {
    pub fn new(path: impl Into<String>, source: IntentSource) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}
