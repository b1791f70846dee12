//! Client-side contract with the guestbook server.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use guestbook_core::api::CreateEntryResponse;
use guestbook_core::{EntryId, GuestbookEntry};

/// Errors returned by guestbook API calls.
///
/// Server-reported variants display the server's own `{error}` text so it can
/// be shown to guests unchanged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Name or message missing (400).
    #[error("{0}")]
    Validation(String),

    /// Delete secret rejected (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Entry does not exist, typically because it was already deleted (404).
    #[error("{0}")]
    NotFound(String),

    /// Any other non-success response.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Request never got a response.
    #[error("could not reach the guestbook server: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("unexpected response from the guestbook server: {0}")]
    Parse(String),
}

/// Operations the controller performs against the guestbook server.
#[async_trait]
pub trait GuestbookApi: Send + Sync {
    /// Fetch all entries, newest first.
    async fn list(&self) -> Result<Vec<GuestbookEntry>, ApiError>;

    /// Create an entry; the response carries the entry's delete token.
    async fn create(&self, name: &str, message: &str) -> Result<CreateEntryResponse, ApiError>;

    /// Delete an entry, returning the server's confirmation message.
    async fn delete(&self, id: EntryId, password: &str) -> Result<String, ApiError>;
}

#[async_trait]
impl<T: GuestbookApi + ?Sized> GuestbookApi for Arc<T> {
    async fn list(&self) -> Result<Vec<GuestbookEntry>, ApiError> {
        (**self).list().await
    }

    async fn create(&self, name: &str, message: &str) -> Result<CreateEntryResponse, ApiError> {
        (**self).create(name, message).await
    }

    async fn delete(&self, id: EntryId, password: &str) -> Result<String, ApiError> {
        (**self).delete(id, password).await
    }
}
