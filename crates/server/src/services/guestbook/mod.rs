//! Guestbook service.
//!
//! Validates submissions, issues per-entry delete capabilities, and authorizes
//! deletions before touching the store.

mod error;
mod token;

pub use error::GuestbookError;

use std::sync::Arc;

use secrecy::SecretString;

use guestbook_core::{EntryId, GuestbookEntry, NewEntry};

use crate::db::EntryStore;

/// A freshly created entry together with the capability to delete it.
#[derive(Debug, Clone)]
pub struct CreatedEntry {
    pub entry: GuestbookEntry,
    /// Returned to the creator once; only its digest is stored.
    pub delete_token: String,
}

/// Guestbook service over a shared entry store.
#[derive(Clone)]
pub struct GuestbookService {
    store: Arc<dyn EntryStore>,
    moderator_secret: Option<SecretString>,
}

impl GuestbookService {
    /// Create a new guestbook service.
    ///
    /// # Arguments
    ///
    /// * `store` - Entry store shared by all requests
    /// * `moderator_secret` - Optional secret allowed to delete any entry
    #[must_use]
    pub fn new(store: Arc<dyn EntryStore>, moderator_secret: Option<SecretString>) -> Self {
        Self {
            store,
            moderator_secret,
        }
    }

    /// Get a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn EntryStore> {
        &self.store
    }

    /// List all entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::Store` if the store is unreachable.
    pub async fn list(&self) -> Result<Vec<GuestbookEntry>, GuestbookError> {
        Ok(self.store.list().await?)
    }

    /// Create a new entry.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::Validation` if either field is blank; nothing
    /// is persisted in that case.
    /// Returns `GuestbookError::Store` if persisting fails.
    pub async fn create(&self, name: &str, message: &str) -> Result<CreatedEntry, GuestbookError> {
        let new_entry = NewEntry::parse(name, message)?;
        let (delete_token, token_hash) = token::issue();

        let entry = self.store.create(new_entry, Some(token_hash)).await?;
        tracing::info!(entry_id = %entry.id, "Guestbook entry created");

        Ok(CreatedEntry {
            entry,
            delete_token,
        })
    }

    /// Permanently delete an entry.
    ///
    /// The supplied secret must be the entry's capability token or the
    /// moderator secret. The secret is checked before existence is reported:
    /// without a valid credential every id answers `Unauthorized`.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::Unauthorized` if the secret is empty or
    /// matches neither the moderator secret nor the entry's token (including
    /// when no such entry exists); the store is left untouched.
    /// Returns `GuestbookError::NotFound` if an authorized caller names a
    /// missing entry, including when a concurrent delete removed it first.
    /// Returns `GuestbookError::Store` if the store fails.
    pub async fn delete(&self, id: EntryId, supplied_secret: &str) -> Result<(), GuestbookError> {
        if supplied_secret.is_empty() {
            tracing::warn!(entry_id = %id, "Rejected guestbook delete: empty secret");
            return Err(GuestbookError::Unauthorized);
        }

        let moderator = self.is_moderator(supplied_secret);
        let stored = self.store.find(id).await?;

        match stored {
            None if moderator => return Err(GuestbookError::NotFound(id)),
            Some(stored)
                if moderator
                    || stored
                        .delete_token_hash
                        .as_deref()
                        .is_some_and(|hash| token::matches_digest(supplied_secret, hash)) => {}
            _ => {
                tracing::warn!(entry_id = %id, "Rejected guestbook delete: secret mismatch");
                return Err(GuestbookError::Unauthorized);
            }
        }

        if !self.store.delete_by_id(id).await? {
            return Err(GuestbookError::NotFound(id));
        }

        tracing::info!(entry_id = %id, moderator, "Guestbook entry deleted");
        Ok(())
    }

    /// Whether `supplied` is the configured moderator secret.
    ///
    /// Always `false` when no moderator secret is configured or `supplied`
    /// is empty.
    #[must_use]
    pub fn is_moderator(&self, supplied: &str) -> bool {
        !supplied.is_empty()
            && self
                .moderator_secret
                .as_ref()
                .is_some_and(|secret| token::matches_secret(supplied, secret))
    }
}
