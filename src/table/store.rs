//! Query-state stores: the owners of the URL-encoded table state.
//!
//! The table never holds the canonical copy of its state. It reads from a
//! [`QueryStore`] and proposes patches to it; the store decides what the new
//! location is.

use crate::table::query::{PageQuery, PageSizeOptions, QueryKeys, QueryPatch, encode_pairs};

/// Result of an accepted proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Path and query string to navigate to.
    pub location: String,
    pub query: PageQuery,
}

pub trait QueryStore {
    /// Current state, derived fresh on every call.
    fn read(&self) -> PageQuery;

    /// Merges `patch` onto the most recently intended state. Returns `None`
    /// when the store rejects the update or it changes nothing.
    fn propose(&mut self, patch: QueryPatch) -> Option<Navigation>;
}

fn location(path: &str, query: &PageQuery, keys: &QueryKeys) -> String {
    format!("{path}?{}", query.to_query_string(keys))
}

/// The address of the current request.
///
/// Links are computed with [`UrlState::href_for`] without touching the state.
/// [`QueryStore::propose`] advances the intended state so that consecutive
/// proposals build on one another, and the returned location is the redirect
/// target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlState {
    path: String,
    keys: QueryKeys,
    options: PageSizeOptions,
    query: PageQuery,
    sort: Option<String>,
}

impl UrlState {
    pub fn parse(
        path: impl Into<String>,
        raw_query: &str,
        keys: QueryKeys,
        options: PageSizeOptions,
    ) -> Self {
        let raw = raw_query.strip_prefix('?').unwrap_or(raw_query);
        let pairs = serde_html_form::from_str::<Vec<(String, String)>>(raw).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed query string {raw:?}: {err}");
            Vec::new()
        });
        let sort = pairs
            .iter()
            .find(|(key, _)| *key == keys.sort)
            .map(|(_, value)| value.clone())
            .filter(|value| !value.is_empty());
        let query = PageQuery::from_pairs(pairs, &keys, &options);

        Self {
            path: path.into(),
            keys,
            options,
            query,
            sort,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn keys(&self) -> &QueryKeys {
        &self.keys
    }

    pub fn options(&self) -> &PageSizeOptions {
        &self.options
    }

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    /// Raw engine-local sort parameter, if any.
    pub fn sort_param(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// Canonical location of the current state, without the sort key.
    pub fn location(&self) -> String {
        location(&self.path, &self.query, &self.keys)
    }

    /// Query string of the current state, without the sort key.
    pub fn query_string(&self) -> String {
        self.query.to_query_string(&self.keys)
    }

    /// Where the patch would navigate to. The sort key is dropped.
    pub fn href_for(&self, patch: &QueryPatch) -> String {
        location(&self.path, &patch.apply(&self.query), &self.keys)
    }

    /// Current location with a different engine-local sort.
    pub fn href_with_sort(&self, sort: Option<&str>) -> String {
        let mut pairs = self.query.to_pairs(&self.keys);
        if let Some(sort) = sort {
            pairs.push((self.keys.sort.clone(), sort.to_string()));
        }
        format!("{}?{}", self.path, encode_pairs(&pairs))
    }
}

impl QueryStore for UrlState {
    fn read(&self) -> PageQuery {
        self.query.clone()
    }

    fn propose(&mut self, patch: QueryPatch) -> Option<Navigation> {
        self.query = patch.apply(&self.query);
        self.sort = None;
        Some(Navigation {
            location: self.location(),
            query: self.query.clone(),
        })
    }
}

/// In-memory model of browser history with push, back and forward.
///
/// The server relies on the real browser history. This store backs
/// [`TableSession`](crate::table::TableSession) outside a browser and gives
/// back and forward navigation a deterministic model.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: String,
    keys: QueryKeys,
    entries: Vec<PageQuery>,
    cursor: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<String>, initial: PageQuery, keys: QueryKeys) -> Self {
        Self {
            path: path.into(),
            keys,
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Number of entries in the history stack.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn location(&self) -> String {
        location(&self.path, &self.entries[self.cursor], &self.keys)
    }

    /// Browser back button. Returns `false` at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Browser forward button. Returns `false` at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Navigation that did not originate from the table, e.g. a pasted link.
    pub fn visit(&mut self, query: PageQuery) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(query);
        self.cursor = self.entries.len() - 1;
    }
}

impl QueryStore for HistoryStore {
    fn read(&self) -> PageQuery {
        self.entries[self.cursor].clone()
    }

    fn propose(&mut self, patch: QueryPatch) -> Option<Navigation> {
        let current = &self.entries[self.cursor];
        let next = patch.apply(current);
        if &next == current {
            return None;
        }
        self.visit(next.clone());
        Some(Navigation {
            location: self.location(),
            query: next,
        })
    }
}
