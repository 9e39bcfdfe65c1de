//! Headless, URL-synchronized data table.
//!
//! The URL query string owns page, page size, search text and any extra
//! filters. This module derives everything else from it on each render:
//!
//! - [`query`] parses and patches the query state,
//! - [`store`] holds it and accepts proposals,
//! - [`pagination`] clamps pages and builds the controls,
//! - [`search`] is the commit-on-submit search box,
//! - [`view`] turns rows and [`column`] definitions into a [`TableView`],
//! - [`session`] ties a store, the search box and the pager together for
//!   callers that keep a table mounted across navigations.

pub mod column;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod pagination;
pub mod query;
pub mod search;
pub mod session;
pub mod store;
pub mod view;

pub use column::{CellValue, Column, SortDirection, SortState};
pub use pagination::{Pager, clamp_page, page_count};
pub use query::{DEFAULT_PAGE_SIZE_OPTIONS, PageQuery, PageSizeOptions, QueryKeys, QueryPatch};
pub use search::{SearchBox, SearchMode, SearchState};
pub use session::TableSession;
pub use store::{HistoryStore, Navigation, QueryStore, UrlState};
pub use view::{DataTable, TableData, TableOptions, TableView};
