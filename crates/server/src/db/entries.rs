//! `PostgreSQL`-backed entry store.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate builds
//! without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use guestbook_core::{EntryId, GuestbookEntry, NewEntry};

use super::{EntryStore, RepositoryError, StoredEntry};

/// Row shape of `guestbook_entry`.
#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    id: EntryId,
    name: String,
    message: String,
    delete_token_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl EntryRow {
    /// Convert a row, rejecting rows that break entry invariants.
    fn into_stored(self) -> Result<StoredEntry, RepositoryError> {
        let Self {
            id,
            name,
            message,
            delete_token_hash,
            created_at,
        } = self;

        let entry = NewEntry::parse(&name, &message)
            .map_err(|e| RepositoryError::DataCorruption(format!("entry {id}: {e}")))?
            .into_entry(id, created_at);

        Ok(StoredEntry {
            entry,
            delete_token_hash,
        })
    }

    fn into_entry(self) -> Result<GuestbookEntry, RepositoryError> {
        self.into_stored().map(|stored| stored.entry)
    }
}

/// Entry store over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgEntryStore {
    pool: PgPool,
}

impl PgEntryStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn list(&self) -> Result<Vec<GuestbookEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT id, name, message, delete_token_hash, created_at
            FROM guestbook_entry
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EntryRow::into_entry).collect()
    }

    async fn create(
        &self,
        entry: NewEntry,
        delete_token_hash: Option<String>,
    ) -> Result<GuestbookEntry, RepositoryError> {
        let row = sqlx::query_as::<_, EntryRow>(
            r"
            INSERT INTO guestbook_entry (name, message, delete_token_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, message, delete_token_hash, created_at
            ",
        )
        .bind(entry.name())
        .bind(entry.message())
        .bind(delete_token_hash)
        .fetch_one(&self.pool)
        .await?;

        row.into_entry()
    }

    async fn find(&self, id: EntryId) -> Result<Option<StoredEntry>, RepositoryError> {
        let row = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT id, name, message, delete_token_hash, created_at
            FROM guestbook_entry
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EntryRow::into_stored).transpose()
    }

    async fn delete_by_id(&self, id: EntryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM guestbook_entry WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(name: &str, message: &str) -> EntryRow {
        EntryRow {
            id: EntryId::generate(),
            name: name.to_string(),
            message: message.to_string(),
            delete_token_hash: Some("digest".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_row_converts_verbatim() {
        let stored = row(" 김영수 ", "축하합니다\n").into_stored().unwrap();
        assert_eq!(stored.entry.name, " 김영수 ");
        assert_eq!(stored.entry.message, "축하합니다\n");
        assert_eq!(stored.delete_token_hash.as_deref(), Some("digest"));
    }

    #[test]
    fn test_blank_row_is_data_corruption() {
        for (name, message) in [("", "hello"), ("guest", "  ")] {
            let err = row(name, message).into_entry().unwrap_err();
            assert!(matches!(err, RepositoryError::DataCorruption(_)));
        }
    }
}
