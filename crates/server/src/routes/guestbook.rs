//! Guestbook route handlers.
//!
//! JSON API consumed by the guestbook section of the invitation page.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use guestbook_core::EntryId;
use guestbook_core::api::{
    CreateEntryRequest, CreateEntryResponse, DeleteEntryRequest, DeleteEntryResponse,
    ListEntriesResponse,
};

use crate::error::{AppError, Operation, Result};
use crate::services::GuestbookError;
use crate::state::AppState;

/// List all guestbook entries, newest first.
///
/// GET /guestbook
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ListEntriesResponse>> {
    let entries = state
        .guestbook()
        .list()
        .await
        .map_err(|e| AppError::guestbook(Operation::List, e))?;

    Ok(Json(ListEntriesResponse { entries }))
}

/// Create a guestbook entry.
///
/// POST /guestbook
///
/// Missing or blank fields are rejected with 400. The response carries the
/// new entry's delete token, which is not retrievable afterwards.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateEntryResponse>)> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected guestbook body");
        AppError::BadRequest("Name and message are required.".to_string())
    })?;

    let name = body.name.unwrap_or_default();
    let message = body.message.unwrap_or_default();

    let created = state
        .guestbook()
        .create(&name, &message)
        .await
        .map_err(|e| AppError::guestbook(Operation::Create, e))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateEntryResponse {
            entry: created.entry,
            delete_token: Some(created.delete_token),
        }),
    ))
}

/// Delete a guestbook entry.
///
/// DELETE /guestbook/{id}
///
/// The `password` field must hold the entry's delete token or the moderator
/// secret. A missing body is treated as an empty password. Credentials are
/// checked before existence: without one the answer is always 401.
#[instrument(skip(state, payload))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<DeleteEntryRequest>, JsonRejection>,
) -> Result<Json<DeleteEntryResponse>> {
    let password = payload
        .ok()
        .and_then(|Json(body)| body.password)
        .unwrap_or_default();

    // A malformed id names no entry; only a moderator learns that
    let Ok(id) = id.parse::<EntryId>() else {
        return Err(if state.guestbook().is_moderator(&password) {
            AppError::NotFound("This message no longer exists.".to_string())
        } else {
            AppError::guestbook(Operation::Delete, GuestbookError::Unauthorized)
        });
    };

    state
        .guestbook()
        .delete(id, &password)
        .await
        .map_err(|e| AppError::guestbook(Operation::Delete, e))?;

    Ok(Json(DeleteEntryResponse {
        message: "Guestbook message deleted.".to_string(),
    }))
}
