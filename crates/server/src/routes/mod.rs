//! HTTP route handlers for the guestbook server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (entry store reachable)
//!
//! # Guestbook (JSON)
//! GET    /guestbook            - List entries, newest first
//! POST   /guestbook            - Create entry {name, message}
//! DELETE /guestbook/{id}       - Delete entry {password}
//! ```

pub mod guestbook;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};

use crate::state::AppState;

/// Create the guestbook routes router.
pub fn guestbook_routes() -> Router<AppState> {
    Router::new()
        .route("/guestbook", get(guestbook::list).post(guestbook::create))
        .route("/guestbook/{id}", delete(guestbook::delete))
}

/// Create the health check routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
}

/// Build all application routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(guestbook_routes()).merge(health_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the entry store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
