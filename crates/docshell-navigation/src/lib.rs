//! docshell Navigation
//!
//! Decides what the shell does with a browser navigation signal:
//! - Link activation inside the managed scope → in-app navigation
//! - Link activation anywhere else → left to the browser
//! - Entering content from the shell home → new history entry, otherwise replace

mod error;
mod history;
mod intent;
mod link;
mod scope;

pub use error::NavigationError;
pub use history::{history_mode, HistoryMode};
pub use intent::{IntentSource, NavigationIntent};
pub use link::{
    evaluate_activation, nearest_link_ancestor, ActivationOutcome, ElementId, ElementTree,
    IgnoreReason, LinkActivation, LinkTarget, Modifiers, NodeTree,
};
pub use scope::{LinkClass, PathScope};

pub type Result<T> = std::result::Result<T, NavigationError>;
