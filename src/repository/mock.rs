//! Mock catalog reader for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::category::{Category, CategoryLevel};
use crate::domain::content::Content;
use crate::domain::hierarchy::HierarchyMainCategory;
use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::domain::promo_code::PromoCode;
use crate::domain::user::UserAccount;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CatalogReader, OrderListQuery, Pagination, ProductListQuery, UserListQuery};

mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogReader for Catalog {
        async fn search_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)>;
        async fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
        async fn list_users(
            &self,
            query: UserListQuery,
        ) -> RepositoryResult<(usize, Vec<UserAccount>)>;
        async fn list_contents(
            &self,
            pagination: Pagination,
        ) -> RepositoryResult<(usize, Vec<Content>)>;
        async fn list_promo_codes(&self) -> RepositoryResult<Vec<PromoCode>>;
        async fn list_categories(&self, level: CategoryLevel) -> RepositoryResult<Vec<Category>>;
        async fn category_hierarchy(&self) -> RepositoryResult<Vec<HierarchyMainCategory>>;
    }
}
