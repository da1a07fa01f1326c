//! History write mode
//!
//! ```text
//! shell home ──enter content──▶ content   (push: one back-stop)
//! content    ──────────────▶ content   (replace)
//! content    ──────────────▶ shell home (replace)
//! shell home ──────────────▶ shell home (replace)
//! ```

use serde::{Deserialize, Serialize};

use crate::scope::PathScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Add a new history entry
    Push,
    /// Overwrite the current history entry
    Replace,
}

impl HistoryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryMode::Push => "push",
            HistoryMode::Replace => "replace",
        }
    }
}

impl std::fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pick the history write mode for a transition from `old` to `new`.
///
/// Only leaving the shell home for a non-home path pushes, so "back" returns
/// to the home exactly once and the back stack never grows past that.
pub fn history_mode(scope: &PathScope, old: &str, new: &str) -> HistoryMode {
    if !scope.is_shell_home(new) && scope.is_shell_home(old) {
        HistoryMode::Push
    } else {
        HistoryMode::Replace
    }
}
