//! Loading and navigating the admin tables.
//!
//! Reads turn the request URL into repository queries and a rendered
//! [`TablePageData`]. Writes (search, filters) are proposals against the
//! request's [`UrlState`]; each returns the location to redirect to.

use std::fmt::Display;
use std::str::FromStr;

use validator::Validate;

use crate::domain::category::{Category, CategoryLevel};
use crate::domain::content::Content;
use crate::domain::hierarchy::{HierarchyLevel, HierarchySelection};
use crate::domain::order::{Order, OrderSort, OrderStatus};
use crate::domain::product::Product;
use crate::domain::types::{
    CategoryId, ClothingGenderId, ColorId, FilterDate, MainCategoryId, PriceRangeId,
    ProductSortId, SubCategoryId,
};
use crate::domain::user::{UserAccount, UserStatus};
use crate::dto::columns;
use crate::dto::tables::{
    FilterFieldView, FilterOption, FilterRule, HIERARCHY_CATEGORY_KEY, HIERARCHY_MAIN_KEY,
    HIERARCHY_SUB_KEY, TableKind, TablePageData,
};
use crate::forms::FormError;
use crate::forms::tables::{FiltersForm, SearchForm, check_date_range};
use crate::repository::{
    CatalogReader, OrderListQuery, Pagination, ProductListQuery, UserListQuery,
};
use crate::services::{ServiceError, ServiceResult};
use crate::table::{
    Column, DataTable, PageQuery, PageSizeOptions, QueryKeys, QueryPatch, QueryStore, SearchBox,
    TableData, TableOptions, TableView, UrlState, page_count,
};

/// Builds the URL state of a table from a raw query string.
pub fn table_url(kind: TableKind, raw_query: &str, options: &PageSizeOptions) -> UrlState {
    UrlState::parse(kind.path(), raw_query, QueryKeys::default(), options.clone())
}

/// Parses an optional filter, ignoring values that do not validate. The
/// URL is never trusted to be well-formed.
fn lenient<T>(query: &PageQuery, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = query.filter(key)?.trim();
    if raw.is_empty() || raw == "all" {
        return None;
    }
    raw.parse()
        .map_err(|err| log::warn!("Ignoring filter {key}={raw:?}: {err}"))
        .ok()
}

/// Every valid value of a repeatable filter, skipping the ones that do not
/// validate.
fn lenient_all<T>(query: &PageQuery, key: &str) -> Vec<T>
where
    T: FromStr,
    T::Err: Display,
{
    query
        .filter_values(key)
        .map(str::trim)
        .filter(|raw| !raw.is_empty() && *raw != "all")
        .filter_map(|raw| {
            raw.parse()
                .map_err(|err| log::warn!("Ignoring filter {key}={raw:?}: {err}"))
                .ok()
        })
        .collect()
}

/// Last page, when the requested one lies past it.
fn overshoot(query: &PageQuery, total_rows: usize) -> Option<usize> {
    let last = page_count(total_rows, query.page_size);
    (total_rows > 0 && query.page > last).then_some(last)
}

pub fn product_query(query: &PageQuery, page: usize) -> ProductListQuery {
    let mut list = ProductListQuery::new()
        .search(query.search.trim())
        .paginate(page, query.page_size);
    if let Some(id) = lenient::<MainCategoryId>(query, "MainCategoryId") {
        list = list.main_category(id);
    }
    if let Some(id) = lenient::<CategoryId>(query, "CategoryId") {
        list = list.category(id);
    }
    if let Some(id) = lenient::<SubCategoryId>(query, "SubCategoryId") {
        list = list.sub_category(id);
    }
    if let Some(id) = lenient::<PriceRangeId>(query, "PriceRangeId") {
        list = list.price_range(id);
    }
    if let Some(id) = lenient::<ProductSortId>(query, "SortId") {
        list = list.sort(id);
    }
    list.clothing_genders(lenient_all::<ClothingGenderId>(query, "ClothingGenderId"))
        .colors(lenient_all::<ColorId>(query, "ColorId"))
}

pub fn order_query(query: &PageQuery, page: usize) -> OrderListQuery {
    let mut start = lenient::<FilterDate>(query, "startDate");
    let mut end = lenient::<FilterDate>(query, "endDate");
    if let (Some(from), Some(to)) = (start, end)
        && from > to
    {
        log::warn!("Ignoring inverted date range {from}..{to}");
        start = None;
        end = None;
    }

    let mut list = OrderListQuery::new()
        .search(query.search.trim())
        .date_range(start, end)
        .sort(lenient::<OrderSort>(query, "sortOption").unwrap_or_default())
        .paginate(page, query.page_size);
    if let Some(status) = lenient::<OrderStatus>(query, "statusFilter") {
        list = list.status(status);
    }
    list
}

pub fn user_query(query: &PageQuery, page: usize) -> UserListQuery {
    let mut list = UserListQuery::new()
        .search(query.search.trim())
        .paginate(page, query.page_size);
    if let Some(status) = lenient::<UserStatus>(query, "statusId") {
        list = list.status(status);
    }
    list
}

async fn fetch_products<R>(repo: &R, query: &PageQuery) -> ServiceResult<TableData<Product>>
where
    R: CatalogReader + ?Sized,
{
    let (mut total_rows, mut items) = repo.search_products(product_query(query, query.page)).await?;
    if let Some(last) = overshoot(query, total_rows) {
        (total_rows, items) = repo.search_products(product_query(query, last)).await?;
    }
    Ok(TableData::Page { items, total_rows })
}

async fn fetch_orders<R>(repo: &R, query: &PageQuery) -> ServiceResult<TableData<Order>>
where
    R: CatalogReader + ?Sized,
{
    let (mut total_rows, mut items) = repo.list_orders(order_query(query, query.page)).await?;
    if let Some(last) = overshoot(query, total_rows) {
        (total_rows, items) = repo.list_orders(order_query(query, last)).await?;
    }
    Ok(TableData::Page { items, total_rows })
}

async fn fetch_users<R>(repo: &R, query: &PageQuery) -> ServiceResult<TableData<UserAccount>>
where
    R: CatalogReader + ?Sized,
{
    let (mut total_rows, mut items) = repo.list_users(user_query(query, query.page)).await?;
    if let Some(last) = overshoot(query, total_rows) {
        (total_rows, items) = repo.list_users(user_query(query, last)).await?;
    }
    Ok(TableData::Page { items, total_rows })
}

async fn fetch_contents<R>(repo: &R, query: &PageQuery) -> ServiceResult<TableData<Content>>
where
    R: CatalogReader + ?Sized,
{
    let pagination = |page| Pagination {
        page,
        per_page: query.page_size,
    };
    let (mut total_rows, mut items) = repo.list_contents(pagination(query.page)).await?;
    if let Some(last) = overshoot(query, total_rows) {
        (total_rows, items) = repo.list_contents(pagination(last)).await?;
    }
    Ok(TableData::Page { items, total_rows })
}

fn failure_banner(kind: TableKind, err: &ServiceError) -> String {
    match err {
        ServiceError::Unauthorized => {
            "The storefront API rejected the configured credential.".to_string()
        }
        other => format!("Could not load {}: {other}", kind.title().to_lowercase()),
    }
}

/// Renders fetched rows, or an empty table plus a banner when the fetch
/// failed.
fn render<T>(
    kind: TableKind,
    columns: Vec<Column<T>>,
    fetched: ServiceResult<TableData<T>>,
    url: &UrlState,
) -> (TableView, Option<String>) {
    let table = DataTable::new(columns).with_options(TableOptions {
        enable_search: true,
        search_mode: Some(kind.search_mode()),
    });
    let search = SearchBox::new(kind.search_mode(), url.query().search.clone());

    match fetched {
        Ok(data) => (table.render(&data, url, &search), None),
        Err(err) => {
            log::error!("Failed to load {kind} table: {err}");
            let empty = TableData::empty(kind.search_mode());
            (table.render(&empty, url, &search), Some(failure_banner(kind, &err)))
        }
    }
}

fn select(value: &str, choices: impl IntoIterator<Item = (String, String)>) -> Vec<FilterOption> {
    choices
        .into_iter()
        .map(|(option, label)| FilterOption {
            selected: option == value,
            value: option,
            label,
        })
        .collect()
}

async fn filter_views<R>(repo: &R, kind: TableKind, query: &PageQuery) -> Vec<FilterFieldView>
where
    R: CatalogReader + ?Sized,
{
    let mut views = Vec::with_capacity(kind.filters().len());
    for field in kind.filters() {
        let value = query.filter(field.key).unwrap_or_default().trim().to_string();
        let (input, value, options) = match field.rule {
            FilterRule::Date => ("date", value, Vec::new()),
            FilterRule::OrderStatus => {
                let value = if value.is_empty() { "all".to_string() } else { value };
                let choices = std::iter::once(("all".to_string(), "All".to_string())).chain(
                    OrderStatus::ALL
                        .iter()
                        .map(|s| (s.to_string(), s.label().to_string())),
                );
                let options = select(&value, choices);
                ("select", value, options)
            }
            FilterRule::OrderSort => {
                let value = if value.is_empty() {
                    OrderSort::default().to_string()
                } else {
                    value
                };
                let choices = OrderSort::ALL
                    .iter()
                    .map(|s| (s.to_string(), s.label().to_string()));
                let options = select(&value, choices);
                ("select", value, options)
            }
            FilterRule::UserStatus => {
                let choices = std::iter::once((String::new(), "All statuses".to_string())).chain(
                    UserStatus::ALL
                        .iter()
                        .map(|s| (s.code().to_string(), s.label().to_string())),
                );
                let options = select(&value, choices);
                ("select", value, options)
            }
            FilterRule::Category(level) => {
                let categories = repo.list_categories(level).await.unwrap_or_else(|err| {
                    log::warn!("Failed to load {level:?} categories for the filter bar: {err}");
                    Vec::new()
                });
                let choices = std::iter::once((String::new(), "All".to_string())).chain(
                    categories
                        .into_iter()
                        .map(|category| (category.id.to_string(), category.name)),
                );
                let options = select(&value, choices);
                ("select", value, options)
            }
        };
        views.push(FilterFieldView {
            key: field.key,
            label: field.label,
            input,
            value,
            options,
        });
    }
    views
}

/// Heading of a drill-down level.
struct Heading {
    title: String,
    breadcrumb: Option<String>,
    up_href: Option<String>,
}

impl Heading {
    fn of(kind: TableKind) -> Self {
        Self {
            title: kind.title().to_string(),
            breadcrumb: None,
            up_href: None,
        }
    }
}

fn hierarchy_selection(query: &PageQuery) -> HierarchySelection {
    HierarchySelection {
        main_category: lenient(query, HIERARCHY_MAIN_KEY),
        category: lenient(query, HIERARCHY_CATEGORY_KEY),
    }
}

/// Opens the level of the catalog tree the URL selects. The tree is always
/// fetched whole, so every level is a full set.
async fn load_hierarchy<R>(repo: &R, url: &UrlState) -> (TableView, Option<String>, Heading)
where
    R: CatalogReader + ?Sized,
{
    let kind = TableKind::Hierarchy;
    let tree = match repo.category_hierarchy().await {
        Ok(tree) => tree,
        Err(err) => {
            let (table, error) = render(
                kind,
                columns::hierarchy_main_categories(),
                Err(ServiceError::from(err)),
                url,
            );
            return (table, error, Heading::of(kind));
        }
    };

    let names = |parts: &[Option<Category>]| {
        let known: Vec<&str> = parts.iter().flatten().map(|c| c.name.as_str()).collect();
        (!known.is_empty()).then(|| known.join(" / "))
    };

    match hierarchy_selection(url.query()).resolve(&tree) {
        HierarchyLevel::MainCategories(rows) => {
            let fetched = Ok(TableData::FullSet(rows));
            let (table, error) = render(kind, columns::hierarchy_main_categories(), fetched, url);
            let heading = Heading {
                title: "Main Categories".to_string(),
                ..Heading::of(kind)
            };
            (table, error, heading)
        }
        HierarchyLevel::Categories { main, rows } => {
            let fetched = Ok(TableData::FullSet(rows));
            let (table, error) = render(kind, columns::hierarchy_categories(), fetched, url);
            let up = QueryPatch::new()
                .page(1)
                .remove_filter(HIERARCHY_MAIN_KEY)
                .remove_filter(HIERARCHY_CATEGORY_KEY)
                .remove_filter(HIERARCHY_SUB_KEY);
            let heading = Heading {
                title: "Categories".to_string(),
                breadcrumb: names(&[main]),
                up_href: Some(url.href_for(&up)),
            };
            (table, error, heading)
        }
        HierarchyLevel::SubCategories {
            main,
            category,
            rows,
        } => {
            let fetched = Ok(TableData::FullSet(rows));
            let (table, error) = render(kind, columns::hierarchy_sub_categories(), fetched, url);
            let up = QueryPatch::new()
                .page(1)
                .remove_filter(HIERARCHY_CATEGORY_KEY)
                .remove_filter(HIERARCHY_SUB_KEY);
            let heading = Heading {
                title: "Sub Categories".to_string(),
                breadcrumb: names(&[main, category]),
                up_href: Some(url.href_for(&up)),
            };
            (table, error, heading)
        }
    }
}

/// Fetches the rows for `kind` and renders the page. Upstream failures yield
/// an empty table with an error banner rather than an error.
pub async fn load_table_page<R>(repo: &R, kind: TableKind, url: &UrlState) -> TablePageData
where
    R: CatalogReader + ?Sized,
{
    let query = url.query();
    let mut heading = Heading::of(kind);
    let (table, error) = match kind {
        TableKind::Products => {
            let fetched = fetch_products(repo, query).await;
            render(kind, columns::products(), fetched, url)
        }
        TableKind::Orders => {
            let fetched = fetch_orders(repo, query).await;
            render(kind, columns::orders(), fetched, url)
        }
        TableKind::Users => {
            let fetched = fetch_users(repo, query).await;
            render(kind, columns::users(), fetched, url)
        }
        TableKind::Contents => {
            let fetched = fetch_contents(repo, query).await;
            render(kind, columns::contents(), fetched, url)
        }
        TableKind::PromoCodes => {
            let fetched = repo
                .list_promo_codes()
                .await
                .map(TableData::FullSet)
                .map_err(ServiceError::from);
            render(kind, columns::promo_codes(), fetched, url)
        }
        TableKind::Categories | TableKind::MainCategories | TableKind::SubCategories => {
            let level = match kind {
                TableKind::MainCategories => CategoryLevel::Main,
                TableKind::SubCategories => CategoryLevel::Sub,
                _ => CategoryLevel::Category,
            };
            let fetched = repo
                .list_categories(level)
                .await
                .map(TableData::FullSet)
                .map_err(ServiceError::from);
            render(kind, columns::categories(), fetched, url)
        }
        TableKind::Hierarchy => {
            let (table, error, level) = load_hierarchy(repo, url).await;
            heading = level;
            (table, error)
        }
    };

    TablePageData {
        slug: kind.slug(),
        title: heading.title,
        breadcrumb: heading.breadcrumb,
        up_href: heading.up_href,
        path: kind.path(),
        table,
        filters: filter_views(repo, kind, query).await,
        error,
    }
}

fn navigate(url: &mut UrlState, patch: QueryPatch) -> String {
    url.propose(patch)
        .map(|navigation| navigation.location)
        .unwrap_or_else(|| url.location())
}

/// Commits the submitted search text: trimmed, on the first page.
pub fn commit_search(
    kind: TableKind,
    url: &mut UrlState,
    form: &SearchForm,
) -> ServiceResult<String> {
    form.validate().map_err(FormError::from)?;

    let mut search = SearchBox::new(kind.search_mode(), url.query().search.clone());
    search.input(form.q.as_str());
    let patch = search.submit();
    Ok(navigate(url, patch))
}

/// Clears the committed search. Clearing an empty search is allowed.
pub fn clear_search(kind: TableKind, url: &mut UrlState) -> String {
    let mut search = SearchBox::new(kind.search_mode(), url.query().search.clone());
    let patch = search.clear();
    navigate(url, patch)
}

/// Applies the declared filters from the form and returns to page 1.
pub fn apply_filters(
    kind: TableKind,
    url: &mut UrlState,
    form: &FiltersForm,
) -> ServiceResult<String> {
    let accepted = form.validate_for(kind)?;

    let mut patch = QueryPatch::new().page(1);
    for (key, value) in accepted {
        patch = match value {
            Some(value) => patch.set_filter(key, value),
            None => patch.remove_filter(key),
        };
    }

    let next = patch.apply(url.query());
    if kind == TableKind::Orders {
        check_date_range(next.filter("startDate"), next.filter("endDate"))?;
    }

    Ok(navigate(url, patch))
}

/// Drops every filter the table declares and returns to page 1.
pub fn reset_filters(kind: TableKind, url: &mut UrlState) -> String {
    let patch = kind
        .filters()
        .iter()
        .fold(QueryPatch::new().page(1), |patch, field| patch.remove_filter(field.key));
    navigate(url, patch)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::hierarchy::{
        HierarchyCategory, HierarchyMainCategory, HierarchySubCategory,
    };
    use crate::domain::promo_code::PromoCode;
    use crate::domain::types::ExternalId;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockCatalog;

    fn url(kind: TableKind, raw: &str) -> UrlState {
        table_url(kind, raw, &PageSizeOptions::default())
    }

    fn order(id: i64, email: &str) -> Order {
        Order {
            order_id: ExternalId::new(id.to_string()),
            user_email: email.to_string(),
            order_date: "2024-05-01T10:30:00Z".to_string(),
            total_amount: 10.0,
            status_name: "Pending".to_string(),
            items_count: 1,
        }
    }

    #[test]
    fn order_query_forwards_valid_filters_and_drops_bad_ones() {
        let state = url(
            TableKind::Orders,
            "pageNumber=2&q=+ann+&startDate=2024-01-01&endDate=bogus&statusFilter=all&sortOption=9",
        );
        let list = order_query(state.query(), 2);

        assert_eq!(list.search.as_deref(), Some("ann"));
        assert_eq!(list.start_date.map(|d| d.to_string()).as_deref(), Some("2024-01-01"));
        assert_eq!(list.end_date, None);
        assert_eq!(list.status, None);
        assert_eq!(list.sort, OrderSort::DateDesc);
        assert_eq!(list.pagination, Pagination { page: 2, per_page: 10 });
    }

    #[test]
    fn inverted_date_range_in_url_is_ignored() {
        let state = url(TableKind::Orders, "startDate=2024-02-01&endDate=2024-01-01");
        let list = order_query(state.query(), 1);
        assert_eq!((list.start_date, list.end_date), (None, None));
    }

    #[test]
    fn product_query_reads_category_ids() {
        let state = url(TableKind::Products, "q=shoe&CategoryId=4&SubCategoryId=0");
        let list = product_query(state.query(), 1);

        assert_eq!(list.search.as_deref(), Some("shoe"));
        assert_eq!(list.category_id.map(CategoryId::get), Some(4));
        assert_eq!(list.sub_category_id, None);
        assert_eq!(list.main_category_id, None);
    }

    #[test]
    fn product_query_forwards_repeated_facets() {
        let state = url(
            TableKind::Products,
            "ColorId=1&ColorId=x&ColorId=4&ClothingGenderId=2&PriceRangeId=3&SortId=1",
        );
        let list = product_query(state.query(), 1);

        let colors: Vec<i64> = list.color_ids.iter().map(|id| id.get()).collect();
        assert_eq!(colors, vec![1, 4]);
        assert_eq!(list.clothing_gender_ids, vec![ClothingGenderId::new(2).unwrap()]);
        assert_eq!(list.price_range_id.map(PriceRangeId::get), Some(3));
        assert_eq!(list.sort_id.map(ProductSortId::get), Some(1));
    }

    #[actix_web::test]
    async fn server_table_shows_the_page_as_returned() {
        let mut repo = MockCatalog::new();
        repo.expect_list_orders()
            .with(eq(OrderListQuery::new().search("shoe").paginate(1, 10)))
            .times(1)
            .returning(|_| Ok((95, (1..=10).map(|id| order(id, "x@example.com")).collect())));

        let state = url(TableKind::Orders, "q=shoe");
        let page = load_table_page(&repo, TableKind::Orders, &state).await;

        assert!(page.error.is_none());
        assert_eq!(page.table.rows.len(), 10);
        assert_eq!(page.table.pagination.page_count, 10);
        assert_eq!(page.table.pagination.summary, "Page 1 of 10 • 95 results");
        assert_eq!(page.filters.len(), 4);
    }

    #[actix_web::test]
    async fn page_past_the_end_refetches_the_last_page() {
        let mut repo = MockCatalog::new();
        repo.expect_list_orders()
            .withf(|query| query.pagination.page == 40)
            .times(1)
            .returning(|_| Ok((95, Vec::new())));
        repo.expect_list_orders()
            .withf(|query| query.pagination.page == 10)
            .times(1)
            .returning(|_| Ok((95, (91..=95).map(|id| order(id, "x@example.com")).collect())));

        let state = url(TableKind::Orders, "pageNumber=40");
        let page = load_table_page(&repo, TableKind::Orders, &state).await;

        assert_eq!(page.table.rows.len(), 5);
        assert_eq!(page.table.pagination.page, 10);
    }

    #[actix_web::test]
    async fn upstream_failure_renders_an_empty_table_with_a_banner() {
        let mut repo = MockCatalog::new();
        repo.expect_list_users()
            .returning(|_| Err(RepositoryError::ConnectionError("refused".to_string())));

        let state = url(TableKind::Users, "pageNumber=3");
        let page = load_table_page(&repo, TableKind::Users, &state).await;

        assert!(page.table.empty);
        assert_eq!(page.table.pagination.summary, "Page 1 of 1 • 0 results");
        assert!(page.error.unwrap().contains("refused"));
    }

    #[actix_web::test]
    async fn rejected_credential_gets_its_own_banner() {
        let mut repo = MockCatalog::new();
        repo.expect_list_promo_codes()
            .returning(|| Err(RepositoryError::Unauthorized));

        let page = load_table_page(
            &repo,
            TableKind::PromoCodes,
            &url(TableKind::PromoCodes, ""),
        ).await;

        assert_eq!(
            page.error.as_deref(),
            Some("The storefront API rejected the configured credential.")
        );
    }

    #[actix_web::test]
    async fn full_set_tables_filter_rows_in_memory() {
        let mut repo = MockCatalog::new();
        repo.expect_list_categories()
            .with(eq(CategoryLevel::Main))
            .returning(|_| {
                Ok(vec![
                    Category { id: 1, name: "Red shoes".to_string() },
                    Category { id: 2, name: "Hats".to_string() },
                    Category { id: 3, name: "Redwood".to_string() },
                ])
            });

        let state = url(TableKind::MainCategories, "q=red");
        let page = load_table_page(&repo, TableKind::MainCategories, &state).await;

        assert_eq!(page.table.rows.len(), 2);
        assert_eq!(page.table.pagination.total_rows, 3);
        assert!(page.filters.is_empty());
    }

    #[actix_web::test]
    async fn promo_codes_are_a_full_set() {
        let mut repo = MockCatalog::new();
        repo.expect_list_promo_codes().returning(|| {
            Ok(vec![PromoCode {
                promo_code_id: ExternalId::new("SPRING"),
                discount: 15.0,
                status: true,
                ..PromoCode::default()
            }])
        });

        let page = load_table_page(
            &repo,
            TableKind::PromoCodes,
            &url(TableKind::PromoCodes, "pageNumber=2"),
        ).await;

        assert_eq!(page.table.rows.len(), 1);
        assert_eq!(page.table.rows[0][1].text, "15%");
        assert_eq!(page.table.pagination.page, 1);
    }

    #[actix_web::test]
    async fn product_filters_list_categories_and_survive_their_failure() {
        let mut repo = MockCatalog::new();
        repo.expect_search_products().returning(|_| Ok((0, Vec::new())));
        repo.expect_list_categories()
            .with(eq(CategoryLevel::Category))
            .returning(|_| Ok(vec![Category { id: 4, name: "Boots".to_string() }]));
        repo.expect_list_categories()
            .withf(|level| *level != CategoryLevel::Category)
            .returning(|_| Err(RepositoryError::Status(500)));

        let state = url(TableKind::Products, "CategoryId=4");
        let page = load_table_page(&repo, TableKind::Products, &state).await;

        let category = &page.filters[1];
        assert_eq!(category.key, "CategoryId");
        assert_eq!(category.options.len(), 2);
        assert!(category.options[1].selected);
        assert_eq!(page.filters[0].options.len(), 1);
        assert!(page.table.empty);
    }

    #[test]
    fn search_commit_trims_and_resets_the_page() {
        let mut state = url(
            TableKind::Products,
            "pageNumber=4&pageSize=20&CategoryId=2&sort=name.asc",
        );
        let form = SearchForm {
            q: "  shoe ".to_string(),
            return_query: String::new(),
        };

        let location = commit_search(TableKind::Products, &mut state, &form).unwrap();

        assert_eq!(location, "/app/products?pageNumber=1&pageSize=20&q=shoe&CategoryId=2");
    }

    #[actix_web::test]
    async fn contents_search_matches_the_loaded_page_only() {
        let mut repo = MockCatalog::new();
        repo.expect_list_contents()
            .with(eq(Pagination { page: 1, per_page: 10 }))
            .times(1)
            .returning(|_| {
                let content = |name: &str, title: &str| Content {
                    name: name.to_string(),
                    title: title.to_string(),
                };
                Ok((
                    42,
                    vec![
                        content("faq", "Questions"),
                        content("terms", "Terms of sale"),
                        content("shipping", "Shipping FAQ"),
                    ],
                ))
            });

        let state = url(TableKind::Contents, "q=faq");
        let page = load_table_page(&repo, TableKind::Contents, &state).await;

        assert_eq!(page.table.rows.len(), 2);
        assert_eq!(page.table.pagination.total_rows, 42);
        assert_eq!(page.table.pagination.page_count, 5);
        assert!(page.table.search.is_some());
    }

    #[test]
    fn contents_search_commit_redirects() {
        let mut state = url(TableKind::Contents, "pageNumber=3");
        let form = SearchForm {
            q: "faq".to_string(),
            return_query: String::new(),
        };
        assert_eq!(
            commit_search(TableKind::Contents, &mut state, &form).unwrap(),
            "/app/contents?pageNumber=1&pageSize=10&q=faq"
        );
    }

    fn catalog_tree() -> Vec<HierarchyMainCategory> {
        vec![
            HierarchyMainCategory {
                id: 1,
                name: "Women".to_string(),
                categories: vec![HierarchyCategory {
                    id: 10,
                    name: "Shoes".to_string(),
                    sub_categories: vec![
                        HierarchySubCategory {
                            id: 100,
                            name: "Boots".to_string(),
                            hierarchy_id: 7,
                            status: true,
                        },
                        HierarchySubCategory {
                            id: 101,
                            name: "Sandals".to_string(),
                            hierarchy_id: 8,
                            status: false,
                        },
                    ],
                }],
            },
            HierarchyMainCategory {
                id: 2,
                name: "Men".to_string(),
                categories: Vec::new(),
            },
        ]
    }

    fn hierarchy_repo() -> MockCatalog {
        let mut repo = MockCatalog::new();
        repo.expect_category_hierarchy()
            .times(1)
            .returning(|| Ok(catalog_tree()));
        repo
    }

    #[actix_web::test]
    async fn hierarchy_starts_at_main_categories_with_drill_links() {
        let repo = hierarchy_repo();
        let state = url(TableKind::Hierarchy, "q=o&category=10");

        let page = load_table_page(&repo, TableKind::Hierarchy, &state).await;

        assert_eq!(page.title, "Main Categories");
        assert!(page.up_href.is_none());
        assert_eq!(page.table.rows.len(), 1);
        assert_eq!(page.table.rows[0][1].text, "Women");
        assert_eq!(
            page.table.rows[0][1].href.as_deref(),
            Some("/app/hierarchy-categories?pageNumber=1&pageSize=10&q=o&main-category=1")
        );
    }

    #[actix_web::test]
    async fn hierarchy_lists_categories_of_the_selected_main_category() {
        let repo = hierarchy_repo();
        let state = url(TableKind::Hierarchy, "main-category=1");

        let page = load_table_page(&repo, TableKind::Hierarchy, &state).await;

        assert_eq!(page.title, "Categories");
        assert_eq!(page.breadcrumb.as_deref(), Some("Women"));
        assert_eq!(page.table.rows[0][1].text, "Shoes");
        assert_eq!(
            page.table.rows[0][1].href.as_deref(),
            Some("/app/hierarchy-categories?pageNumber=1&pageSize=10&main-category=1&category=10")
        );
        assert_eq!(
            page.up_href.as_deref(),
            Some("/app/hierarchy-categories?pageNumber=1&pageSize=10")
        );
    }

    #[actix_web::test]
    async fn hierarchy_lists_sub_categories_of_the_selected_category() {
        let repo = hierarchy_repo();
        let state = url(TableKind::Hierarchy, "main-category=1&category=10");

        let page = load_table_page(&repo, TableKind::Hierarchy, &state).await;

        assert_eq!(page.title, "Sub Categories");
        assert_eq!(page.breadcrumb.as_deref(), Some("Women / Shoes"));
        let labels: Vec<_> = page.table.headers.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["ID", "Hierarchy ID", "Status", "Name"]);
        assert_eq!(page.table.rows.len(), 2);
        assert_eq!(page.table.rows[1][2].text, "Inactive");
        assert_eq!(
            page.up_href.as_deref(),
            Some("/app/hierarchy-categories?pageNumber=1&pageSize=10&main-category=1")
        );
    }

    #[actix_web::test]
    async fn hierarchy_failure_shows_the_banner_on_the_top_level() {
        let mut repo = MockCatalog::new();
        repo.expect_category_hierarchy()
            .returning(|| Err(RepositoryError::Status(502)));

        let state = url(TableKind::Hierarchy, "main-category=1");
        let page = load_table_page(&repo, TableKind::Hierarchy, &state).await;

        assert_eq!(page.title, "Hierarchy Categories");
        assert!(page.table.empty);
        assert!(page.error.is_some());
    }

    #[test]
    fn clear_twice_lands_on_the_same_location() {
        let mut state = url(TableKind::Users, "pageNumber=3&q=bob&statusId=1");

        let first = clear_search(TableKind::Users, &mut state);
        let second = clear_search(TableKind::Users, &mut state);

        assert_eq!(first, "/app/users?pageNumber=1&pageSize=10&statusId=1");
        assert_eq!(first, second);
    }

    #[test]
    fn filters_apply_on_first_page_and_keep_search() {
        let mut state = url(TableKind::Orders, "pageNumber=5&q=ann&statusFilter=1");
        let form = FiltersForm::parse(
            b"startDate=2024-01-01&endDate=2024-01-31&statusFilter=all&sortOption=1",
        )
        .unwrap();

        let location = apply_filters(TableKind::Orders, &mut state, &form).unwrap();

        assert_eq!(
            location,
            "/app/orders?pageNumber=1&pageSize=10&q=ann&startDate=2024-01-01&endDate=2024-01-31&sortOption=1"
        );
    }

    #[test]
    fn inverted_date_range_is_rejected_before_navigation() {
        let mut state = url(TableKind::Orders, "pageNumber=2&endDate=2024-01-10");
        let form = FiltersForm::parse(b"startDate=2024-02-01").unwrap();

        let result = apply_filters(TableKind::Orders, &mut state, &form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(state.location(), "/app/orders?pageNumber=2&pageSize=10&endDate=2024-01-10");
    }

    #[test]
    fn reset_drops_declared_filters_only() {
        let mut state = url(TableKind::Users, "pageNumber=2&q=bob&statusId=3&utm=mail");
        let location = reset_filters(TableKind::Users, &mut state);
        assert_eq!(location, "/app/users?pageNumber=1&pageSize=10&q=bob&utm=mail");
    }
}
