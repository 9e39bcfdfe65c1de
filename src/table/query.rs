//! URL-serializable table state and the partial updates proposed against it.
//!
//! The query string is the single source of truth for page, page size, search
//! text and any caller-defined filters. Reading it never fails: malformed or
//! missing values fall back to defaults.

use std::num::NonZeroUsize;

/// Page sizes offered when the caller does not supply its own.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Names of the query-string keys owned by the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKeys {
    pub page: String,
    pub page_size: String,
    pub search: String,
    /// Key carrying the engine-local sort. Never part of [`PageQuery`].
    pub sort: String,
}

impl Default for QueryKeys {
    fn default() -> Self {
        Self {
            page: "pageNumber".to_string(),
            page_size: "pageSize".to_string(),
            search: "q".to_string(),
            sort: "sort".to_string(),
        }
    }
}

impl QueryKeys {
    /// Returns `true` when `key` is one of the table's own keys.
    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.page || key == self.page_size || key == self.search || key == self.sort
    }
}

/// Non-empty, ordered set of selectable page sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizeOptions(Vec<NonZeroUsize>);

impl PageSizeOptions {
    /// Builds the option set, dropping zeros and duplicates. An empty result
    /// falls back to [`DEFAULT_PAGE_SIZE_OPTIONS`].
    pub fn new(sizes: impl IntoIterator<Item = usize>) -> Self {
        let mut options: Vec<NonZeroUsize> = Vec::new();
        for size in sizes.into_iter().filter_map(NonZeroUsize::new) {
            if !options.contains(&size) {
                options.push(size);
            }
        }
        if options.is_empty() {
            return Self::default();
        }
        Self(options)
    }

    /// The first option, used whenever the URL carries no valid page size.
    pub fn default_size(&self) -> usize {
        self.0.first().map_or(DEFAULT_PAGE_SIZE_OPTIONS[0], |size| size.get())
    }

    pub fn contains(&self, size: usize) -> bool {
        self.0.iter().any(|option| option.get() == size)
    }

    pub fn iter(&self) -> impl Iterator<Item = NonZeroUsize> + '_ {
        self.0.iter().copied()
    }
}

impl Default for PageSizeOptions {
    fn default() -> Self {
        Self(
            DEFAULT_PAGE_SIZE_OPTIONS
                .iter()
                .filter_map(|size| NonZeroUsize::new(*size))
                .collect(),
        )
    }
}

/// Typed view of the table's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number, never zero.
    pub page: usize,
    /// Rows per page, never zero.
    pub page_size: usize,
    /// Committed search text.
    pub search: String,
    /// Caller-defined keys, kept in URL order. Opaque to the table.
    pub filters: Vec<(String, String)>,
}

impl PageQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            filters: Vec::new(),
        }
    }

    /// Parses a raw query string (with or without the leading `?`).
    pub fn parse(raw: &str, keys: &QueryKeys, options: &PageSizeOptions) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = serde_html_form::from_str::<Vec<(String, String)>>(raw).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed query string {raw:?}: {err}");
            Vec::new()
        });
        Self::from_pairs(pairs, keys, options)
    }

    /// Builds the query from decoded key/value pairs. The first occurrence of
    /// a reserved key wins; the sort key is dropped.
    pub fn from_pairs(
        pairs: Vec<(String, String)>,
        keys: &QueryKeys,
        options: &PageSizeOptions,
    ) -> Self {
        let mut page = None;
        let mut page_size = None;
        let mut search = None;
        let mut filters = Vec::new();

        for (key, value) in pairs {
            if key == keys.page {
                page.get_or_insert(value);
            } else if key == keys.page_size {
                page_size.get_or_insert(value);
            } else if key == keys.search {
                search.get_or_insert(value);
            } else if key != keys.sort {
                filters.push((key, value));
            }
        }

        let page = page
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        let page_size = page_size
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|size| options.contains(*size))
            .unwrap_or_else(|| options.default_size());

        Self {
            page,
            page_size,
            search: search.unwrap_or_default(),
            filters,
        }
    }

    /// First value of a caller-defined filter.
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// All values of a possibly repeated filter key.
    pub fn filter_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.filters
            .iter()
            .filter(move |(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Key/value pairs in canonical order: page, page size, search (omitted
    /// when empty), then filters.
    pub fn to_pairs(&self, keys: &QueryKeys) -> Vec<(String, String)> {
        let mut pairs = vec![
            (keys.page.clone(), self.page.to_string()),
            (keys.page_size.clone(), self.page_size.to_string()),
        ];
        if !self.search.is_empty() {
            pairs.push((keys.search.clone(), self.search.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }

    pub fn to_query_string(&self, keys: &QueryKeys) -> String {
        encode_pairs(&self.to_pairs(keys))
    }
}

/// Form-encodes key/value pairs.
pub(crate) fn encode_pairs(pairs: &[(String, String)]) -> String {
    serde_html_form::to_string(pairs).unwrap_or_else(|err| {
        log::error!("Failed to encode query pairs: {err}");
        String::new()
    })
}

/// Partial update merged onto the latest full [`PageQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPatch {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
    /// `Some` replaces every value of the key, `None` removes it.
    pub filters: Vec<(String, Option<String>)>,
}

impl QueryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn set_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), Some(value.into())));
        self
    }

    pub fn remove_filter(mut self, key: impl Into<String>) -> Self {
        self.filters.push((key.into(), None));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_none()
            && self.page_size.is_none()
            && self.search.is_none()
            && self.filters.is_empty()
    }

    /// Merges the patch onto `base`, keeping every untouched key.
    pub fn apply(&self, base: &PageQuery) -> PageQuery {
        let mut next = base.clone();
        if let Some(page) = self.page {
            next.page = page.max(1);
        }
        if let Some(page_size) = self.page_size {
            next.page_size = page_size.max(1);
        }
        if let Some(search) = &self.search {
            next.search = search.clone();
        }
        for (key, value) in &self.filters {
            match value {
                Some(value) => {
                    match next.filters.iter().position(|(name, _)| name == key) {
                        Some(index) => {
                            next.filters[index].1 = value.clone();
                            let mut position = 0;
                            next.filters.retain(|(name, _)| {
                                let keep = name != key || position == index;
                                position += 1;
                                keep
                            });
                        }
                        None => next.filters.push((key.clone(), value.clone())),
                    }
                }
                None => next.filters.retain(|(name, _)| name != key),
            }
        }
        next
    }
}
