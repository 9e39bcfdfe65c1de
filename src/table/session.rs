//! A mounted table bound to a query-state store.
//!
//! The session owns only the search box and the latest row total. Page,
//! page size and search text are read from the store on every call, and every
//! user action is funnelled through [`QueryStore::propose`].
//!
//! The HTTP console does not mount a session; each request rebuilds its state
//! from a [`UrlState`](crate::table::UrlState). `TableSession` is the
//! stateful driver for embedders that keep a table alive between navigations
//! (a terminal front end or a scripted client) and the reference model the
//! request handlers are checked against.

use std::num::NonZeroUsize;

use crate::table::pagination::Pager;
use crate::table::query::{PageQuery, QueryPatch};
use crate::table::search::{SearchBox, SearchMode};
use crate::table::store::{Navigation, QueryStore};

pub struct TableSession<S> {
    store: S,
    search: SearchBox,
    total_rows: usize,
}

impl<S: QueryStore> TableSession<S> {
    /// Mounts over the current store state. The input buffer starts equal to
    /// the committed search text.
    pub fn mount(store: S, mode: SearchMode) -> Self {
        let query = store.read();
        Self {
            store,
            search: SearchBox::new(mode, query.search),
            total_rows: 0,
        }
    }

    /// New data arrived from the source.
    pub fn receive(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
    }

    /// Read path after any navigation, including back and forward. Never
    /// proposes.
    pub fn sync(&mut self) {
        let query = self.store.read();
        self.search.observe(&query.search);
    }

    pub fn query(&self) -> PageQuery {
        self.store.read()
    }

    pub fn pager(&self) -> Pager {
        Pager::new(&self.store.read(), self.total_rows)
    }

    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn type_text(&mut self, text: impl Into<String>) {
        self.search.input(text);
    }

    pub fn submit_search(&mut self) -> Option<Navigation> {
        let patch = self.search.submit();
        self.commit(patch)
    }

    pub fn clear_search(&mut self) -> Option<Navigation> {
        let patch = self.search.clear();
        self.commit(patch)
    }

    pub fn go_to_page(&mut self, page: i64) -> Option<Navigation> {
        let patch = self.pager().go_to_page(page);
        self.commit(patch)
    }

    pub fn go_first(&mut self) -> Option<Navigation> {
        let patch = self.pager().go_first();
        self.commit(patch)
    }

    pub fn go_last(&mut self) -> Option<Navigation> {
        let patch = self.pager().go_last();
        self.commit(patch)
    }

    pub fn go_prev(&mut self) -> Option<Navigation> {
        let patch = self.pager().go_prev();
        self.commit(patch)
    }

    pub fn go_next(&mut self) -> Option<Navigation> {
        let patch = self.pager().go_next();
        self.commit(patch)
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) -> Option<Navigation> {
        let patch = self.pager().set_page_size(page_size);
        self.commit(patch)
    }

    fn commit(&mut self, patch: QueryPatch) -> Option<Navigation> {
        let navigation = self.store.propose(patch);
        self.sync();
        navigation
    }
}
