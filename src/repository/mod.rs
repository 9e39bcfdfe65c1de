//! Read access to the storefront API.
//!
//! [`CatalogReader`] is the paged data source behind every admin table. Paged
//! listings return `(total_count, items)`; listings the API serves whole
//! return just the items.

use async_trait::async_trait;

use crate::domain::category::{Category, CategoryLevel};
use crate::domain::content::Content;
use crate::domain::hierarchy::HierarchyMainCategory;
use crate::domain::order::{Order, OrderSort, OrderStatus};
use crate::domain::product::Product;
use crate::domain::promo_code::PromoCode;
use crate::domain::types::{
    CategoryId, ClothingGenderId, ColorId, FilterDate, MainCategoryId, PriceRangeId,
    ProductSortId, SubCategoryId,
};
use crate::domain::user::{UserAccount, UserStatus};
use crate::repository::errors::RepositoryResult;

#[cfg(feature = "server")]
pub mod api;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[cfg(feature = "server")]
pub use api::{ApiCredential, ApiRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: crate::table::DEFAULT_PAGE_SIZE_OPTIONS[0],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub main_category_id: Option<MainCategoryId>,
    pub category_id: Option<CategoryId>,
    pub sub_category_id: Option<SubCategoryId>,
    /// Repeatable facet; an empty list matches every gender.
    pub clothing_gender_ids: Vec<ClothingGenderId>,
    pub price_range_id: Option<PriceRangeId>,
    /// Repeatable facet; an empty list matches every color.
    pub color_ids: Vec<ColorId>,
    pub sort_id: Option<ProductSortId>,
    pub pagination: Pagination,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search: String = search.into();
        self.search = (!search.is_empty()).then_some(search);
        self
    }

    pub fn main_category(mut self, id: MainCategoryId) -> Self {
        self.main_category_id = Some(id);
        self
    }

    pub fn category(mut self, id: CategoryId) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn sub_category(mut self, id: SubCategoryId) -> Self {
        self.sub_category_id = Some(id);
        self
    }

    pub fn clothing_genders(mut self, ids: impl IntoIterator<Item = ClothingGenderId>) -> Self {
        self.clothing_gender_ids = ids.into_iter().collect();
        self
    }

    pub fn price_range(mut self, id: PriceRangeId) -> Self {
        self.price_range_id = Some(id);
        self
    }

    pub fn colors(mut self, ids: impl IntoIterator<Item = ColorId>) -> Self {
        self.color_ids = ids.into_iter().collect();
        self
    }

    pub fn sort(mut self, id: ProductSortId) -> Self {
        self.sort_id = Some(id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListQuery {
    /// Matched against the customer email.
    pub search: Option<String>,
    pub start_date: Option<FilterDate>,
    pub end_date: Option<FilterDate>,
    /// `None` lists every status.
    pub status: Option<OrderStatus>,
    pub sort: OrderSort,
    pub pagination: Pagination,
}

impl OrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search: String = search.into();
        self.search = (!search.is_empty()).then_some(search);
        self
    }

    pub fn date_range(mut self, start: Option<FilterDate>, end: Option<FilterDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sort(mut self, sort: OrderSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    /// Matched against the account email.
    pub search: Option<String>,
    pub status: Option<UserStatus>,
    pub pagination: Pagination,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search: String = search.into();
        self.search = (!search.is_empty()).then_some(search);
        self
    }

    pub fn status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }
}

#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn search_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<Product>)>;
    async fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    async fn list_users(
        &self,
        query: UserListQuery,
    ) -> RepositoryResult<(usize, Vec<UserAccount>)>;
    async fn list_contents(&self, pagination: Pagination)
    -> RepositoryResult<(usize, Vec<Content>)>;
    async fn list_promo_codes(&self) -> RepositoryResult<Vec<PromoCode>>;
    async fn list_categories(&self, level: CategoryLevel) -> RepositoryResult<Vec<Category>>;
    /// The whole catalog tree, main categories first.
    async fn category_hierarchy(&self) -> RepositoryResult<Vec<HierarchyMainCategory>>;
}
