use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::tables::TableKind;
use crate::forms::tables::{FiltersForm, ReturnForm, SearchForm};
use crate::repository::CatalogReader;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::tables::{
    apply_filters, clear_search, commit_search, load_table_page, reset_filters, table_url,
};
use crate::table::{PageSizeOptions, UrlState};

fn table_kind(slug: &str) -> Option<TableKind> {
    slug.parse().ok()
}

/// Turns the outcome of a table proposal into a response. Rejected input is
/// flashed and the user lands back on the unchanged state.
fn respond(kind: TableKind, url: &UrlState, outcome: Result<String, ServiceError>) -> HttpResponse {
    match outcome {
        Ok(location) => redirect(&location),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::warn!("Rejected {kind} table input: {err}");
            FlashMessage::error(err.to_string()).send();
            redirect(&url.location())
        }
    }
}

#[get("/app/{table}")]
pub async fn show_table(
    table: web::Path<String>,
    request: HttpRequest,
    repo: web::Data<dyn CatalogReader>,
    page_sizes: web::Data<PageSizeOptions>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(kind) = table_kind(&table) else {
        return HttpResponse::NotFound().finish();
    };

    let url = table_url(kind, request.query_string(), &page_sizes);
    let page = load_table_page(repo.get_ref(), kind, &url).await;

    let mut context = base_context(&flash_messages, kind.slug());
    context.insert("page", &page);
    render_template(&tera, "table/index.html", &context)
}

#[post("/app/{table}/search")]
pub async fn search_table(
    table: web::Path<String>,
    page_sizes: web::Data<PageSizeOptions>,
    web::Form(form): web::Form<SearchForm>,
) -> impl Responder {
    let Some(kind) = table_kind(&table) else {
        return HttpResponse::NotFound().finish();
    };

    let mut url = table_url(kind, &form.return_query, &page_sizes);
    let outcome = commit_search(kind, &mut url, &form);
    respond(kind, &url, outcome)
}

#[post("/app/{table}/search/clear")]
pub async fn clear_table_search(
    table: web::Path<String>,
    page_sizes: web::Data<PageSizeOptions>,
    web::Form(form): web::Form<ReturnForm>,
) -> impl Responder {
    let Some(kind) = table_kind(&table) else {
        return HttpResponse::NotFound().finish();
    };

    let mut url = table_url(kind, &form.return_query, &page_sizes);
    redirect(&clear_search(kind, &mut url))
}

#[post("/app/{table}/filters")]
pub async fn filter_table(
    table: web::Path<String>,
    page_sizes: web::Data<PageSizeOptions>,
    body: web::Bytes,
) -> impl Responder {
    let Some(kind) = table_kind(&table) else {
        return HttpResponse::NotFound().finish();
    };

    let form = match FiltersForm::parse(&body) {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Rejected {kind} filter form: {err}");
            FlashMessage::error("Could not read the filter form.").send();
            return redirect(&kind.path());
        }
    };

    let mut url = table_url(kind, &form.return_query, &page_sizes);
    let outcome = apply_filters(kind, &mut url, &form);
    respond(kind, &url, outcome)
}

#[post("/app/{table}/filters/reset")]
pub async fn reset_table_filters(
    table: web::Path<String>,
    page_sizes: web::Data<PageSizeOptions>,
    web::Form(form): web::Form<ReturnForm>,
) -> impl Responder {
    let Some(kind) = table_kind(&table) else {
        return HttpResponse::NotFound().finish();
    };

    let mut url = table_url(kind, &form.return_query, &page_sizes);
    redirect(&reset_filters(kind, &mut url))
}
