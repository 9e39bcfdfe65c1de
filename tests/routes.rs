use std::sync::{Arc, Mutex};

use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use async_trait::async_trait;
use tera::Tera;

use storefront_admin::configure_routes;
use storefront_admin::domain::category::{Category, CategoryLevel};
use storefront_admin::domain::content::Content;
use storefront_admin::domain::hierarchy::{HierarchyCategory, HierarchyMainCategory};
use storefront_admin::domain::order::Order;
use storefront_admin::domain::product::Product;
use storefront_admin::domain::promo_code::PromoCode;
use storefront_admin::domain::types::ExternalId;
use storefront_admin::domain::user::UserAccount;
use storefront_admin::repository::errors::{RepositoryError, RepositoryResult};
use storefront_admin::repository::{
    CatalogReader, OrderListQuery, Pagination, ProductListQuery, UserListQuery,
};
use storefront_admin::routes::alert_level_to_str;
use storefront_admin::table::PageSizeOptions;

/// In-memory catalog with 95 orders, one page of 42 help contents, two promo
/// codes and a two-level catalog tree. Users always fail.
#[derive(Default)]
struct StubCatalog {
    order_queries: Mutex<Vec<OrderListQuery>>,
}

impl StubCatalog {
    fn orders() -> Vec<Order> {
        (1..=95)
            .map(|id| Order {
                order_id: ExternalId::new(format!("ORD-{id}")),
                user_email: if id % 2 == 0 {
                    format!("ann{id}@example.com")
                } else {
                    format!("bob{id}@example.com")
                },
                order_date: "2024-05-01T10:30:00Z".to_string(),
                total_amount: id as f64,
                status_name: "Pending".to_string(),
                items_count: 1,
            })
            .collect()
    }

    fn pages_requested(&self) -> Vec<usize> {
        self.order_queries
            .lock()
            .unwrap()
            .iter()
            .map(|query| query.pagination.page)
            .collect()
    }
}

#[async_trait]
impl CatalogReader for StubCatalog {
    async fn search_products(
        &self,
        _query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<Product>)> {
        Ok((0, Vec::new()))
    }

    async fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)> {
        self.order_queries.lock().unwrap().push(query.clone());

        let matching: Vec<Order> = Self::orders()
            .into_iter()
            .filter(|order| match &query.search {
                Some(search) => order.user_email.contains(search.as_str()),
                None => true,
            })
            .collect();
        let Pagination { page, per_page } = query.pagination;
        let items = matching
            .iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();
        Ok((matching.len(), items))
    }

    async fn list_users(
        &self,
        _query: UserListQuery,
    ) -> RepositoryResult<(usize, Vec<UserAccount>)> {
        Err(RepositoryError::ConnectionError("connection refused".to_string()))
    }

    async fn list_contents(
        &self,
        _pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<Content>)> {
        let content = |name: &str, title: &str| Content {
            name: name.to_string(),
            title: title.to_string(),
        };
        Ok((
            42,
            vec![content("faq", "Questions"), content("terms", "Terms of sale")],
        ))
    }

    async fn list_promo_codes(&self) -> RepositoryResult<Vec<PromoCode>> {
        Ok(vec![
            PromoCode {
                promo_code_id: ExternalId::new("SPRING24"),
                discount: 10.0,
                status: true,
                ..PromoCode::default()
            },
            PromoCode {
                promo_code_id: ExternalId::new("WINTER23"),
                discount: 20.0,
                ..PromoCode::default()
            },
        ])
    }

    async fn list_categories(&self, _level: CategoryLevel) -> RepositoryResult<Vec<Category>> {
        Ok(Vec::new())
    }

    async fn category_hierarchy(&self) -> RepositoryResult<Vec<HierarchyMainCategory>> {
        Ok(vec![HierarchyMainCategory {
            id: 5,
            name: "Kids".to_string(),
            categories: vec![HierarchyCategory {
                id: 50,
                name: "Jackets".to_string(),
                sub_categories: Vec::new(),
            }],
        }])
    }
}

macro_rules! console {
    ($catalog:expr) => {{
        let tera = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap();
        let repo: Arc<dyn CatalogReader> = $catalog.clone();
        let store = CookieMessageStore::builder(Key::generate()).build();

        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(store).build())
                .configure(configure_routes)
                .app_data(web::Data::new(tera))
                .app_data(web::Data::from(repo))
                .app_data(web::Data::new(PageSizeOptions::default())),
        )
        .await
    }};
}

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn dashboard_links_every_table() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("Main Categories"));
    assert!(body.contains("Promocodes"));
}

#[actix_web::test]
async fn page_past_the_end_renders_the_last_page() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::get()
        .uri("/app/orders?pageNumber=40")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Page 10 of 10 • 95 results"));
    assert!(body.contains("ORD-95"));
    assert_eq!(catalog.pages_requested(), vec![40, 10]);
}

#[actix_web::test]
async fn server_search_is_forwarded_to_the_catalog() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::get()
        .uri("/app/orders?q=ann&pageSize=20")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("Page 1 of 3 • 47 results"));
    assert!(!body.contains("bob1@example.com"));
    let seen = catalog.order_queries.lock().unwrap();
    assert_eq!(seen[0].search.as_deref(), Some("ann"));
    assert_eq!(seen[0].pagination, Pagination { page: 1, per_page: 20 });
}

#[actix_web::test]
async fn full_set_tables_filter_in_memory() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::get()
        .uri("/app/promocodes?q=spring")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("SPRING24"));
    assert!(!body.contains("WINTER23"));
    assert!(body.contains("Page 1 of 1 • 2 results"));
}

#[actix_web::test]
async fn upstream_failure_shows_a_banner_and_an_empty_table() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::get().uri("/app/users").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Could not load users"));
    assert!(body.contains("No results"));
    assert!(body.contains("Page 1 of 1 • 0 results"));
}

#[actix_web::test]
async fn unknown_tables_are_not_found() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::get().uri("/app/clients").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/app/clients/filters/reset")
        .set_form([("return_query", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn search_commit_redirects_to_the_first_page() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::post()
        .uri("/app/orders/search")
        .set_form([
            ("q", "  ann  "),
            ("return_query", "pageNumber=3&pageSize=20&statusFilter=1"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        "/app/orders?pageNumber=1&pageSize=20&q=ann&statusFilter=1"
    );
    assert!(catalog.order_queries.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn contents_search_filters_the_loaded_page() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::post()
        .uri("/app/contents/search")
        .set_form([("q", "faq"), ("return_query", "pageNumber=2")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/app/contents?pageNumber=1&pageSize=10&q=faq");

    let req = test::TestRequest::get()
        .uri("/app/contents?q=faq")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("Questions"));
    assert!(!body.contains("Terms of sale"));
    assert!(body.contains("Page 1 of 5 • 42 results"));
}

#[actix_web::test]
async fn hierarchy_drills_down_through_links() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::get()
        .uri("/app/hierarchy-categories")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Main Categories"));
    assert!(body.contains("Kids"));
    assert!(body.contains("main-category=5"));

    let req = test::TestRequest::get()
        .uri("/app/hierarchy-categories?main-category=5")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Jackets"));
    assert!(body.contains("category=50"));
    assert!(body.contains("Up"));
}

#[actix_web::test]
async fn clearing_twice_lands_on_the_same_location() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let mut locations = Vec::new();
    for return_query in ["pageNumber=2&q=ann", "pageNumber=1&pageSize=10"] {
        let req = test::TestRequest::post()
            .uri("/app/orders/search/clear")
            .set_form([("return_query", return_query)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        locations.push(location(&resp));
    }

    assert_eq!(locations[0], "/app/orders?pageNumber=1&pageSize=10");
    assert_eq!(locations[0], locations[1]);
}

#[actix_web::test]
async fn filters_apply_on_the_first_page() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::post()
        .uri("/app/orders/filters")
        .set_form([
            ("return_query", "pageNumber=4&q=ann"),
            ("startDate", "2024-01-01"),
            ("endDate", ""),
            ("statusFilter", "2"),
            ("sortOption", "0"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        "/app/orders?pageNumber=1&pageSize=10&q=ann&startDate=2024-01-01&statusFilter=2&sortOption=0"
    );
}

#[actix_web::test]
async fn invalid_filters_return_to_the_unchanged_state() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::post()
        .uri("/app/orders/filters")
        .set_form([
            ("return_query", "pageNumber=4&statusFilter=1"),
            ("startDate", "2024-03-01"),
            ("endDate", "2024-02-01"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        "/app/orders?pageNumber=4&pageSize=10&statusFilter=1"
    );
    assert!(resp.headers().contains_key(header::SET_COOKIE));
}

#[actix_web::test]
async fn reset_removes_only_declared_filters() {
    let catalog = Arc::new(StubCatalog::default());
    let app = console!(catalog);

    let req = test::TestRequest::post()
        .uri("/app/users/filters/reset")
        .set_form([("return_query", "pageNumber=3&q=bob&statusId=1&ref=mail")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        "/app/users?pageNumber=1&pageSize=10&q=bob&ref=mail"
    );
}
