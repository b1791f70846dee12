//! Guestbook service error types.

use thiserror::Error;

use guestbook_core::{EntryError, EntryId};

use crate::db::RepositoryError;

/// Errors that can occur during guestbook operations.
#[derive(Debug, Error)]
pub enum GuestbookError {
    /// Submitted name or message is blank.
    #[error("invalid entry: {0}")]
    Validation(#[from] EntryError),

    /// Supplied secret matches neither the entry's token nor the moderator secret.
    #[error("delete secret does not match")]
    Unauthorized,

    /// No entry with this id exists (never did, or already deleted).
    #[error("guestbook entry {0} not found")]
    NotFound(EntryId),

    /// Repository/database error.
    #[error("store error: {0}")]
    Store(#[from] RepositoryError),
}
