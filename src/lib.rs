//! Storefront admin console.
//!
//! The `data` feature builds the headless table core, the domain types and
//! the storefront API contract. The `server` feature (default) adds the
//! Actix-Web shell that renders the admin tables.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod table;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{configure_routes, run};

#[cfg(feature = "server")]
mod server {
    use std::sync::Arc;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::models::config::{MIN_SECRET_LEN, ServerConfig};
    use crate::repository::{ApiRepository, CatalogReader};
    use crate::routes::main::show_index;
    use crate::routes::tables::{
        clear_table_search, filter_table, reset_table_filters, search_table, show_table,
    };

    /// Registers every console route on `cfg`.
    pub fn configure_routes(cfg: &mut web::ServiceConfig) {
        cfg.service(show_index)
            .service(show_table)
            .service(search_table)
            .service(clear_table_search)
            .service(filter_table)
            .service(reset_table_filters);
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        if !server_config.has_valid_secret() {
            return Err(std::io::Error::other(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }

        let credential = server_config.credential();
        if credential.is_none() {
            log::warn!("No API token configured, calling the storefront API anonymously");
        }

        let repo = ApiRepository::new(
            server_config.api_base_url.clone(),
            server_config.platform_key.clone(),
            credential,
            server_config.request_timeout(),
        )
        .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
        let repo: Arc<dyn CatalogReader> = Arc::new(repo);
        let repo = web::Data::from(repo);

        let page_sizes = web::Data::new(server_config.page_size_options());

        // Flash messages live in a signed cookie.
        let secret_key = Key::from(server_config.secret.as_bytes());
        let message_store = CookieMessageStore::builder(secret_key).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
        let tera = web::Data::new(tera);

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving the admin console on {}:{} against {}",
            bind_address.0,
            bind_address.1,
            server_config.api_base_url
        );

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .configure(configure_routes)
                .app_data(tera.clone())
                .app_data(repo.clone())
                .app_data(page_sizes.clone())
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
