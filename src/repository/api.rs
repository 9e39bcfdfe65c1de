//! HTTP implementation of [`CatalogReader`] over the storefront REST API.

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, CategoryLevel};
use crate::domain::content::Content;
use crate::domain::hierarchy::HierarchyMainCategory;
use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::domain::promo_code::PromoCode;
use crate::domain::user::UserAccount;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CatalogReader, OrderListQuery, Pagination, ProductListQuery, UserListQuery,
};
use crate::table::query::encode_pairs;

const PLATFORM_KEY_HEADER: &str = "key";
const TOKEN_HEADER: &str = "token";

/// Session credential attached to every API call as the `token` header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Returns `None` for blank tokens.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        (!token.is_empty()).then_some(Self(token))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}

/// Every response wraps its payload in `{"data": ...}`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PagedPayload<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    total_count: usize,
}

/// Some listings come back paged, others as a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Paged(PagedPayload<T>),
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Listing::Paged(page) => page.items,
            Listing::Plain(items) => items,
        }
    }
}

#[derive(Deserialize)]
struct HierarchyPayload {
    #[serde(default)]
    hierarchies: Vec<HierarchyMainCategory>,
}

/// JSON body of `POST /user/search`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ProductSearchBody {
    main_category_id: Option<i64>,
    category_id: Option<i64>,
    sub_category_id: Option<i64>,
    fabric: Option<String>,
    keywords: Option<String>,
    product_name: Option<String>,
    clothing_gender_id: Vec<i64>,
    price_range_id: Option<i64>,
    color_id: Vec<i64>,
    sort_id: Option<i64>,
    page_number: usize,
    page_size: usize,
}

impl From<&ProductListQuery> for ProductSearchBody {
    fn from(query: &ProductListQuery) -> Self {
        Self {
            main_category_id: query.main_category_id.map(i64::from),
            category_id: query.category_id.map(i64::from),
            sub_category_id: query.sub_category_id.map(i64::from),
            fabric: None,
            keywords: None,
            product_name: query.search.clone(),
            clothing_gender_id: query
                .clothing_gender_ids
                .iter()
                .copied()
                .map(i64::from)
                .collect(),
            price_range_id: query.price_range_id.map(i64::from),
            color_id: query.color_ids.iter().copied().map(i64::from).collect(),
            sort_id: query.sort_id.map(i64::from),
            page_number: query.pagination.page,
            page_size: query.pagination.per_page,
        }
    }
}

fn page_params(pagination: &Pagination) -> Vec<(String, String)> {
    vec![
        ("pageNumber".to_string(), pagination.page.to_string()),
        ("pageSize".to_string(), pagination.per_page.to_string()),
    ]
}

fn order_params(query: &OrderListQuery) -> Vec<(String, String)> {
    let mut params = page_params(&query.pagination);
    params.push((
        "emailSearch".to_string(),
        query.search.clone().unwrap_or_default(),
    ));
    params.push((
        "startDate".to_string(),
        query.start_date.map(|d| d.to_string()).unwrap_or_default(),
    ));
    params.push((
        "endDate".to_string(),
        query.end_date.map(|d| d.to_string()).unwrap_or_default(),
    ));
    params.push(("sortOption".to_string(), query.sort.to_string()));
    if let Some(status) = query.status {
        params.push(("statusFilter".to_string(), status.to_string()));
    }
    params
}

fn user_params(query: &UserListQuery) -> Vec<(String, String)> {
    let mut params = page_params(&query.pagination);
    params.push((
        "emailSearch".to_string(),
        query.search.clone().unwrap_or_default(),
    ));
    params.push((
        "statusId".to_string(),
        query
            .status
            .map(|s| s.code().to_string())
            .unwrap_or_default(),
    ));
    params
}

#[derive(Clone)]
pub struct ApiRepository {
    client: Client,
    base_url: String,
    platform_key: String,
    credential: Option<ApiCredential>,
}

impl ApiRepository {
    pub fn new(
        base_url: impl Into<String>,
        platform_key: impl Into<String>,
        credential: Option<ApiCredential>,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            platform_key: platform_key.into(),
            credential,
        })
    }

    fn url(&self, path: &str, params: &[(String, String)]) -> String {
        if params.is_empty() {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}{path}?{}", self.base_url, encode_pairs(params))
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(PLATFORM_KEY_HEADER, &self.platform_key);
        match &self.credential {
            Some(credential) => request.header(TOKEN_HEADER, credential.expose()),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<T> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Storefront API answered {status} for {}", response.url());
            return Err(RepositoryError::from_status(status.as_u16()));
        }
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> RepositoryResult<T> {
        self.fetch(self.client.get(self.url(path, params))).await
    }
}

#[async_trait]
impl CatalogReader for ApiRepository {
    async fn search_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<Product>)> {
        let body = ProductSearchBody::from(&query);
        let page: PagedPayload<Product> = self
            .fetch(self.client.post(self.url("/user/search", &[])).json(&body))
            .await?;
        Ok((page.total_count, page.items))
    }

    async fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)> {
        let page: PagedPayload<Order> = self.get("/admin/orders", &order_params(&query)).await?;
        Ok((page.total_count, page.items))
    }

    async fn list_users(
        &self,
        query: UserListQuery,
    ) -> RepositoryResult<(usize, Vec<UserAccount>)> {
        let page: PagedPayload<UserAccount> =
            self.get("/admin/users", &user_params(&query)).await?;
        Ok((page.total_count, page.items))
    }

    async fn list_contents(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<Content>)> {
        let page: PagedPayload<Content> =
            self.get("/help/contents", &page_params(&pagination)).await?;
        Ok((page.total_count, page.items))
    }

    async fn list_promo_codes(&self) -> RepositoryResult<Vec<PromoCode>> {
        let listing: Listing<PromoCode> = self.get("/admin/promo-codes", &[]).await?;
        Ok(listing.into_items())
    }

    async fn list_categories(&self, level: CategoryLevel) -> RepositoryResult<Vec<Category>> {
        let listing: Listing<Category> = self.get(level.endpoint(), &[]).await?;
        Ok(listing.into_items())
    }

    async fn category_hierarchy(&self) -> RepositoryResult<Vec<HierarchyMainCategory>> {
        let payload: HierarchyPayload = self.get("/admin/hierarchy-v2", &[]).await?;
        Ok(payload.hierarchies)
    }
}
