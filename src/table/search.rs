//! Commit-on-submit search box.
//!
//! The box keeps a local edit buffer apart from the committed search text in
//! the URL. Only [`SearchBox::submit`] and [`SearchBox::clear`] produce a
//! [`QueryPatch`]; reacting to an external URL change ([`SearchBox::observe`])
//! cannot write anything back.

use serde::{Deserialize, Serialize};

use crate::table::query::QueryPatch;

/// Where filtering by the committed search text happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Rows held in memory are matched against the search text.
    #[default]
    Client,
    /// The data source applied the search before returning rows.
    Server,
}

/// Lifecycle of the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchState {
    /// Buffer equals the committed text.
    Idle,
    /// Buffer edited locally, nothing written yet.
    Typing,
    /// A write was proposed and the URL has not reflected it yet.
    Committing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBox {
    mode: SearchMode,
    buffer: String,
    committed: String,
    pending: Option<String>,
    active_filter: String,
}

impl SearchBox {
    /// Mounts the box over the search text currently in the URL.
    pub fn new(mode: SearchMode, committed: impl Into<String>) -> Self {
        let committed = committed.into();
        let active_filter = match mode {
            SearchMode::Client => committed.clone(),
            SearchMode::Server => String::new(),
        };
        Self {
            mode,
            buffer: committed.clone(),
            committed,
            pending: None,
            active_filter,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Text currently in the input.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Search text last observed in the URL.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn state(&self) -> SearchState {
        if self.pending.is_some() {
            SearchState::Committing
        } else if self.buffer != self.committed {
            SearchState::Typing
        } else {
            SearchState::Idle
        }
    }

    /// Row filter applied in client mode; `None` in server mode or when empty.
    pub fn active_filter(&self) -> Option<&str> {
        match self.mode {
            SearchMode::Client if !self.active_filter.is_empty() => Some(&self.active_filter),
            _ => None,
        }
    }

    /// Clear is offered only while a search is committed.
    pub fn can_clear(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Local keystroke. Never writes to the URL.
    pub fn input(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Commits the trimmed buffer and resets to the first page.
    pub fn submit(&mut self) -> QueryPatch {
        let next = self.buffer.trim().to_string();
        self.pending = Some(next.clone());
        QueryPatch::new().search(next).page(1)
    }

    /// Empties the buffer and the committed search, even if already empty.
    pub fn clear(&mut self) -> QueryPatch {
        self.buffer.clear();
        self.pending = Some(String::new());
        QueryPatch::new().search(String::new()).page(1)
    }

    /// Read path: reconciles the box with the search text found in the URL.
    ///
    /// A changed value overwrites the buffer and, in client mode, the live row
    /// filter. An unchanged value leaves in-progress typing alone.
    pub fn observe(&mut self, url_search: &str) {
        if self.pending.as_deref() == Some(url_search) {
            self.pending = None;
        }
        if self.committed == url_search {
            return;
        }

        self.committed = url_search.to_string();
        self.buffer = url_search.to_string();
        self.pending = None;
        if self.mode == SearchMode::Client {
            self.active_filter = url_search.to_string();
        }
    }
}
