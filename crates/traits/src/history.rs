//! HistoryPort trait for the browser address bar and session history.

use lexi_types::HistoryState;

pub trait HistoryPort {
    /// The full current URL, including query string and fragment.
    fn current_url(&self) -> String;

    /// Add a new entry on top of the current one.
    fn push(&mut self, state: HistoryState, url: &str);

    /// Rewrite the current entry in place.
    fn replace(&mut self, state: HistoryState, url: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub state: Option<HistoryState>,
    pub url: String,
}

/// An in-memory session history.
///
/// Behaves like the browser's: pushing drops any forward entries, and
/// `back`/`forward` return the state a `popstate` event would carry.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    pushes: usize,
}

impl MemoryHistory {
    /// A history with a single landing entry without state.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            entries: vec![HistoryEntry {
                state: None,
                url: url.into(),
            }],
            cursor: 0,
            pushes: 0,
        }
    }

    /// Step back one entry. Returns the restored entry's state, or `None`
    /// when already at the first entry.
    pub fn back(&mut self) -> Option<Option<HistoryState>> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].state)
    }

    /// Step forward one entry, if any.
    pub fn forward(&mut self) -> Option<Option<HistoryState>> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].state)
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many times `push` was called.
    pub fn push_count(&self) -> usize {
        self.pushes
    }
}

impl HistoryPort for MemoryHistory {
    fn current_url(&self) -> String {
        self.current().url.clone()
    }

    fn push(&mut self, state: HistoryState, url: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry {
            state: Some(state),
            url: url.to_string(),
        });
        self.cursor = self.entries.len() - 1;
        self.pushes += 1;
    }

    fn replace(&mut self, state: HistoryState, url: &str) {
        self.entries[self.cursor] = HistoryEntry {
            state: Some(state),
            url: url.to_string(),
        };
    }
}
