//! Entry store for guestbook `PostgreSQL` (or process memory).
//!
//! # Database: `guestbook`
//!
//! ## Tables
//!
//! - `guestbook_entry` - Guestbook messages plus the digest of each entry's
//!   delete capability token
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p guestbook-cli -- migrate
//! ```
//!
//! # Lifecycle
//!
//! A store is constructed once at startup, shared behind `Arc<dyn EntryStore>`
//! by every request, and closed after the server has drained.

pub mod entries;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use guestbook_core::{EntryId, GuestbookEntry, NewEntry};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use entries::PgEntryStore;
pub use memory::MemoryEntryStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row breaks entry invariants (e.g. a blank name).
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store cannot serve requests (closed or unreachable).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// An entry as held by the store, including its authorization material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub entry: GuestbookEntry,
    /// Digest of the creator's capability token, if one was issued.
    pub delete_token_hash: Option<String>,
}

/// Durable keyed collection of guestbook entries.
///
/// `id` and `created_at` are always generated by the store.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries, newest first.
    async fn list(&self) -> Result<Vec<GuestbookEntry>, RepositoryError>;

    /// Persist a validated entry and return it with its generated identity.
    async fn create(
        &self,
        entry: NewEntry,
        delete_token_hash: Option<String>,
    ) -> Result<GuestbookEntry, RepositoryError>;

    /// Look up a single entry by id.
    async fn find(&self, id: EntryId) -> Result<Option<StoredEntry>, RepositoryError>;

    /// Permanently remove an entry. Returns `false` if no such entry existed.
    async fn delete_by_id(&self, id: EntryId) -> Result<bool, RepositoryError>;

    /// Check that the store can serve requests.
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// Release underlying resources. Called once at shutdown.
    async fn close(&self) {}
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
