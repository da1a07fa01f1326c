//! Browser navigation host

use parking_lot::RwLock;
use url::Url;

/// Address bar and session history of the page
pub trait NavigationHost: Send + Sync {
    /// Current address bar URL
    fn location(&self) -> Url;

    fn push_state(&self, url: &Url);

    fn replace_state(&self, url: &Url);
}

struct HistoryStack {
    entries: Vec<Url>,
    index: usize,
}

/// In-memory session history with browser push/replace/back semantics
pub struct MemoryNavigationHost {
    history: RwLock<HistoryStack>,
}

impl MemoryNavigationHost {
    pub fn new(location: Url) -> Self {
        Self {
            history: RwLock::new(HistoryStack {
                entries: vec![location],
                index: 0,
            }),
        }
    }

    /// Step back one entry. Returns false at the start of history.
    ///
    /// Like the browser, this only moves the address bar; the shell learns
    /// about it through `Shell::handle_pop_state`.
    pub fn back(&self) -> bool {
        let mut history = self.history.write();
        if history.index == 0 {
            return false;
        }
        history.index -= 1;
        true
    }

    pub fn forward(&self) -> bool {
        let mut history = self.history.write();
        if history.index + 1 >= history.entries.len() {
            return false;
        }
        history.index += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.history.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> Vec<Url> {
        self.history.read().entries.clone()
    }
}

impl NavigationHost for MemoryNavigationHost {
    fn location(&self) -> Url {
        let history = self.history.read();
        history.entries[history.index].clone()
    }

    fn push_state(&self, url: &Url) {
        let mut history = self.history.write();
        let keep = history.index + 1;
        history.entries.truncate(keep);
        history.entries.push(url.clone());
        history.index = keep;
    }

    fn replace_state(&self, url: &Url) {
        let mut history = self.history.write();
        let index = history.index;
        history.entries[index] = url.clone();
    }
}
