//! The rendering engine: rows plus columns in, a serializable view out.
//!
//! Pagination is always manual. The engine never slices rows; the data source
//! already returned one page, or the full set in client search mode.
//!
//! Query keys and page size options are read from the [`UrlState`] passed to
//! [`DataTable::render`]; the table holds no copy of them.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::table::column::{Column, SortDirection, SortState};
use crate::table::pagination::Pager;
use crate::table::search::{SearchBox, SearchMode, SearchState};
use crate::table::store::UrlState;

/// Rows handed over by the data source.
#[derive(Debug, Clone, PartialEq)]
pub enum TableData<T> {
    /// Complete candidate set; search runs in memory.
    FullSet(Vec<T>),
    /// One page already filtered by the source.
    Page { items: Vec<T>, total_rows: usize },
}

impl<T> TableData<T> {
    /// No rows, shaped for the given search mode.
    pub fn empty(mode: SearchMode) -> Self {
        match mode {
            SearchMode::Client => TableData::FullSet(Vec::new()),
            SearchMode::Server => TableData::Page {
                items: Vec::new(),
                total_rows: 0,
            },
        }
    }

    pub fn search_mode(&self) -> SearchMode {
        match self {
            TableData::FullSet(_) => SearchMode::Client,
            TableData::Page { .. } => SearchMode::Server,
        }
    }

    /// Total used for the page count. For a full set this is the unfiltered
    /// length, not the number of rows left after matching.
    pub fn total_rows(&self) -> usize {
        match self {
            TableData::FullSet(items) => items.len(),
            TableData::Page { total_rows, .. } => *total_rows,
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            TableData::FullSet(items) => items,
            TableData::Page { items, .. } => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub enable_search: bool,
    /// Overrides the mode implied by the data shape. `Some(Client)` over a
    /// [`TableData::Page`] matches the loaded page in memory while the page
    /// count keeps the source total.
    pub search_mode: Option<SearchMode>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            enable_search: true,
            search_mode: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HeaderView {
    pub id: String,
    pub label: String,
    /// `asc` or `desc` when this column drives the sort.
    pub sort: Option<&'static str>,
    /// Link toggling the sort; absent for unsortable columns.
    pub sort_href: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CellView {
    pub text: String,
    pub tone: Option<&'static str>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    /// `None` renders as an ellipsis.
    pub number: Option<usize>,
    pub href: Option<String>,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageSizeLink {
    pub size: usize,
    pub href: String,
    pub selected: bool,
}

/// Pagination controls. A `None` href means the control is disabled.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaginationView {
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub summary: String,
    pub first_href: Option<String>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub last_href: Option<String>,
    pub pages: Vec<PageLink>,
    pub page_sizes: Vec<PageSizeLink>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchView {
    pub key: String,
    pub buffer: String,
    pub committed: String,
    pub mode: SearchMode,
    pub state: SearchState,
    pub can_clear: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<Vec<CellView>>,
    /// Render the single full-width "No results" row.
    pub empty: bool,
    pub colspan: usize,
    pub pagination: PaginationView,
    pub search: Option<SearchView>,
    /// Current query string without sort, echoed by forms that post back.
    pub return_query: String,
}

/// Column definitions plus table options, generic over the row type.
pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    options: TableOptions,
}

impl<T> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            options: TableOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Sort from the URL, kept only if it names a sortable column.
    pub fn sort_for(&self, url: &UrlState) -> Option<SortState> {
        url.sort_param().and_then(SortState::parse).filter(|sort| {
            self.columns
                .iter()
                .any(|column| column.id() == sort.column && column.is_sortable())
        })
    }

    /// Rows the engine displays: matched by `filter`, ordered by `sort`,
    /// never paginated.
    pub fn row_model<'a>(
        &self,
        data: &'a TableData<T>,
        filter: Option<&str>,
        sort: Option<&SortState>,
    ) -> Vec<&'a T> {
        let needle = filter.map(|text| text.trim().to_lowercase());
        let mut rows: Vec<&T> = data
            .items()
            .iter()
            .filter(|row| match needle.as_deref() {
                None | Some("") => true,
                Some(needle) => self
                    .columns
                    .iter()
                    .filter(|column| column.is_searchable())
                    .any(|column| column.value_of(row).matches(needle)),
            })
            .collect();

        if let Some(sort) = sort
            && let Some(column) = self.columns.iter().find(|c| c.id() == sort.column)
        {
            rows.sort_by(|left, right| {
                let ordering = column.value_of(left).compare(&column.value_of(right));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        rows
    }

    /// Mode rows are matched in: the configured override, else the data shape.
    pub fn search_mode_for(&self, data: &TableData<T>) -> SearchMode {
        self.options
            .search_mode
            .unwrap_or_else(|| data.search_mode())
    }

    /// Builds the full view model for one render.
    pub fn render(&self, data: &TableData<T>, url: &UrlState, search: &SearchBox) -> TableView {
        let pager = Pager::new(url.query(), data.total_rows());
        let sort = self.sort_for(url);
        let filter = match self.search_mode_for(data) {
            SearchMode::Client => search.active_filter(),
            SearchMode::Server => None,
        };

        let headers = self
            .columns
            .iter()
            .map(|column| {
                let active = sort.as_ref().filter(|sort| sort.column == column.id());
                HeaderView {
                    id: column.id().to_string(),
                    label: column.header().to_string(),
                    sort: active.map(|sort| sort.direction.as_str()),
                    sort_href: column.is_sortable().then(|| {
                        let next = SortState::toggle(sort.as_ref(), column.id());
                        url.href_with_sort(next.as_ref().map(SortState::to_param).as_deref())
                    }),
                }
            })
            .collect();

        let rows: Vec<Vec<CellView>> = self
            .row_model(data, filter, sort.as_ref())
            .into_iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| CellView {
                        text: column.text_of(row),
                        tone: column.tone_of(row),
                        href: column.link_of(row).map(|patch| url.href_for(&patch)),
                    })
                    .collect()
            })
            .collect();

        TableView {
            headers,
            empty: rows.is_empty(),
            rows,
            colspan: self.columns.len().max(1),
            pagination: pagination_view(&pager, url),
            search: self.options.enable_search.then(|| SearchView {
                key: url.keys().search.clone(),
                buffer: search.buffer().to_string(),
                committed: search.committed().to_string(),
                mode: search.mode(),
                state: search.state(),
                can_clear: search.can_clear(),
            }),
            return_query: url.query_string(),
        }
    }
}

fn pagination_view(pager: &Pager, url: &UrlState) -> PaginationView {
    let pages = pager
        .pages()
        .into_iter()
        .map(|number| PageLink {
            number,
            href: number
                .filter(|page| *page != pager.current_page())
                .map(|page| url.href_for(&pager.go_to_page(page as i64))),
            current: number == Some(pager.current_page()),
        })
        .collect();

    let page_sizes = url
        .options()
        .iter()
        .map(|size: NonZeroUsize| PageSizeLink {
            size: size.get(),
            href: url.href_for(&pager.set_page_size(size)),
            selected: size.get() == pager.page_size(),
        })
        .collect();

    PaginationView {
        page: pager.current_page(),
        page_count: pager.page_count(),
        page_size: pager.page_size(),
        total_rows: pager.total_rows(),
        summary: pager.summary(),
        first_href: pager.can_prev().then(|| url.href_for(&pager.go_first())),
        prev_href: pager.can_prev().then(|| url.href_for(&pager.go_prev())),
        next_href: pager.can_next().then(|| url.href_for(&pager.go_next())),
        last_href: pager.can_next().then(|| url.href_for(&pager.go_last())),
        pages,
        page_sizes,
    }
}
