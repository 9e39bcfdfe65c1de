//! Mock query-state store for asserting which actions write to the URL.

use mockall::mock;

use crate::table::query::{PageQuery, QueryPatch};
use crate::table::store::{Navigation, QueryStore};

mock! {
    pub QueryStore {}

    impl QueryStore for QueryStore {
        fn read(&self) -> PageQuery;
        fn propose(&mut self, patch: QueryPatch) -> Option<Navigation>;
    }
}
