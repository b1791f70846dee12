//! Process-local entry store for development and tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use guestbook_core::{EntryId, GuestbookEntry, NewEntry};

use super::{EntryStore, RepositoryError, StoredEntry};

/// In-memory entry store.
///
/// Entries are kept in insertion order; listing walks them newest first, so
/// entries sharing a timestamp list the most recently inserted first.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: RwLock<Vec<StoredEntry>>,
    closed: AtomicBool,
}

impl MemoryEntryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding pre-built entries (e.g. fixtures with fixed timestamps).
    ///
    /// Seeded entries carry no capability token.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = GuestbookEntry>) -> Self {
        let mut stored: Vec<StoredEntry> = entries
            .into_iter()
            .map(|entry| StoredEntry {
                entry,
                delete_token_hash: None,
            })
            .collect();
        stored.sort_by_key(|s| s.entry.created_at);

        Self {
            entries: RwLock::new(stored),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of entries currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn ensure_open(&self) -> Result<(), RepositoryError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(RepositoryError::Unavailable("store is closed".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn list(&self) -> Result<Vec<GuestbookEntry>, RepositoryError> {
        self.ensure_open()?;
        let entries = self.entries.read().await;

        let mut listed: Vec<GuestbookEntry> =
            entries.iter().rev().map(|s| s.entry.clone()).collect();
        // Stable sort keeps newest-inserted first among equal timestamps
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn create(
        &self,
        entry: NewEntry,
        delete_token_hash: Option<String>,
    ) -> Result<GuestbookEntry, RepositoryError> {
        self.ensure_open()?;
        let mut entries = self.entries.write().await;

        let created = entry.into_entry(EntryId::generate(), Utc::now());
        entries.push(StoredEntry {
            entry: created.clone(),
            delete_token_hash,
        });
        Ok(created)
    }

    async fn find(&self, id: EntryId) -> Result<Option<StoredEntry>, RepositoryError> {
        self.ensure_open()?;
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|s| s.entry.id == id).cloned())
    }

    async fn delete_by_id(&self, id: EntryId) -> Result<bool, RepositoryError> {
        self.ensure_open()?;
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|s| s.entry.id != id);
        Ok(entries.len() < before)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Duration};

    use super::*;

    fn fixture(name: &str, created_at: DateTime<Utc>) -> GuestbookEntry {
        NewEntry::parse(name, "congratulations")
            .unwrap()
            .into_entry(EntryId::generate(), created_at)
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let now = Utc::now();
        let older = fixture("older", now - Duration::hours(1));
        let newer = fixture("newer", now);
        let store = MemoryEntryStore::with_entries([newer.clone(), older.clone()]);

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![newer, older]);
    }

    #[tokio::test]
    async fn test_create_generates_identity() {
        let store = MemoryEntryStore::new();
        let a = store
            .create(NewEntry::parse("a", "hello").unwrap(), Some("hash".into()))
            .await
            .unwrap();
        let b = store
            .create(NewEntry::parse("b", "hello").unwrap(), None)
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        let listed = store.list().await.unwrap();
        assert_eq!(listed.first().unwrap().id, b.id);

        let found = store.find(a.id).await.unwrap().unwrap();
        assert_eq!(found.delete_token_hash.as_deref(), Some("hash"));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_rows() {
        let store = MemoryEntryStore::new();
        let entry = store
            .create(NewEntry::parse("a", "hello").unwrap(), None)
            .await
            .unwrap();

        assert!(store.delete_by_id(entry.id).await.unwrap());
        assert!(!store.delete_by_id(entry.id).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_closed_store_is_unavailable() {
        let store = MemoryEntryStore::new();
        store.close().await;

        assert!(matches!(
            store.list().await,
            Err(RepositoryError::Unavailable(_))
        ));
        assert!(store.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_close_is_seen_by_other_tasks() {
        let store = std::sync::Arc::new(MemoryEntryStore::new());
        assert!(store.ping().await.is_ok());

        let closer = std::sync::Arc::clone(&store);
        tokio::spawn(async move { closer.close().await })
            .await
            .unwrap();

        assert!(matches!(
            store.find(EntryId::generate()).await,
            Err(RepositoryError::Unavailable(_))
        ));
    }
}
