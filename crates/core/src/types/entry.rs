//! Guestbook entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntryId;

/// Errors that can occur when validating a [`NewEntry`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// The name is empty or whitespace-only.
    #[error("name is required")]
    EmptyName,
    /// The message is empty or whitespace-only.
    #[error("message is required")]
    EmptyMessage,
}

/// A persisted guestbook message.
///
/// Entries are immutable once created; the only state change is deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestbookEntry {
    /// Store-generated identifier, the only handle for deletion.
    pub id: EntryId,
    /// Display name of the guest (untrusted).
    pub name: String,
    /// Free-text message, may contain newlines (untrusted).
    pub message: String,
    /// Store-assigned creation time. Lists are ordered by this, newest first.
    pub created_at: DateTime<Utc>,
}

/// A validated guestbook submission, not yet persisted.
///
/// ## Constraints
///
/// - `name` must contain at least one non-whitespace character
/// - `message` must contain at least one non-whitespace character
///
/// Both fields are kept exactly as submitted; trimming only decides validity.
///
/// ## Examples
///
/// ```
/// use guestbook_core::NewEntry;
///
/// assert!(NewEntry::parse("김영수", "축하합니다").is_ok());
/// assert!(NewEntry::parse("", "message").is_err());
/// assert!(NewEntry::parse("name", " \n\t").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    name: String,
    message: String,
}

impl NewEntry {
    /// Validate a submission.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::EmptyName`] or [`EntryError::EmptyMessage`] if the
    /// corresponding field is empty after trimming. The name is checked first.
    pub fn parse(name: &str, message: &str) -> Result<Self, EntryError> {
        if name.trim().is_empty() {
            return Err(EntryError::EmptyName);
        }
        if message.trim().is_empty() {
            return Err(EntryError::EmptyMessage);
        }

        Ok(Self {
            name: name.to_owned(),
            message: message.to_owned(),
        })
    }

    /// Returns the guest's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attach store-generated identity, producing a persisted entry.
    #[must_use]
    pub fn into_entry(self, id: EntryId, created_at: DateTime<Utc>) -> GuestbookEntry {
        GuestbookEntry {
            id,
            name: self.name,
            message: self.message,
            created_at,
        }
    }
}
