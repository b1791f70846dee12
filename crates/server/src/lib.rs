//! Guestbook server library.
//!
//! This crate provides the guestbook HTTP service as a library, allowing the
//! router to be tested in-process and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::{ServerConfig, StoreBackend};
use db::{EntryStore, MemoryEntryStore, PgEntryStore};
use state::AppState;

/// Construct the entry store selected by configuration.
///
/// Called once at startup; the returned handle is shared for the life of the
/// process and must be closed with [`EntryStore::close`] at shutdown.
///
/// # Errors
///
/// Returns `sqlx::Error` if the `PostgreSQL` pool cannot be created.
pub async fn connect_store(config: &ServerConfig) -> Result<Arc<dyn EntryStore>, sqlx::Error> {
    match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = db::create_pool(database_url).await?;
            tracing::info!("Database pool created");
            Ok(Arc::new(PgEntryStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory entry store; entries are lost on restart");
            Ok(Arc::new(MemoryEntryStore::new()))
        }
    }
}

/// Build the full application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let mut router = routes::routes().layer(axum::middleware::from_fn(
        middleware::request_id_middleware,
    ));

    if let Some(cors) = cors_layer(state.config()) {
        router = router.layer(cors);
    }

    router
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// CORS for a page hosted on a different origin than the API.
fn cors_layer(config: &ServerConfig) -> Option<CorsLayer> {
    let origin = config.allowed_origin.as_deref()?;

    match HeaderValue::from_str(origin) {
        Ok(origin) => Some(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([CONTENT_TYPE]),
        ),
        Err(e) => {
            tracing::warn!(origin, error = %e, "Ignoring invalid GUESTBOOK_ALLOWED_ORIGIN");
            None
        }
    }
}
