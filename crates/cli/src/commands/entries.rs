//! Entry inspection and moderation commands.

use tracing::info;

use guestbook_core::EntryId;
use guestbook_server::db::{EntryStore, PgEntryStore};

use super::{CliError, connect};

/// Print all entries, newest first.
pub async fn list() -> Result<(), CliError> {
    let store = PgEntryStore::new(connect().await?);
    let entries = store.list().await?;

    info!("Guestbook entries: {}", entries.len());
    for entry in &entries {
        info!(
            "  {} | {} | {}: {}",
            entry.id,
            entry.created_at.to_rfc3339(),
            entry.name,
            entry.message
        );
    }

    store.close().await;
    Ok(())
}

/// Delete an entry by ID, bypassing delete-token checks.
pub async fn delete(id: &str) -> Result<(), CliError> {
    let id: EntryId = id
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidId(id.to_owned()))?;

    let store = PgEntryStore::new(connect().await?);
    let deleted = store.delete_by_id(id).await?;
    store.close().await;

    if !deleted {
        return Err(CliError::NotFound(id.to_string()));
    }

    info!(entry_id = %id, "Entry deleted");
    Ok(())
}
