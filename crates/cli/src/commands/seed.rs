//! Seed the guestbook with entries.
//!
//! Without a file the invitation page's default entries are inserted. A seed
//! file is a YAML list:
//!
//! ```yaml
//! - name: 김영수
//!   message: 결혼 축하합니다!
//! - name: 이미라
//!   message: 행복하게 사세요.
//! ```
//!
//! Seeded entries get no delete token; only the moderator secret (or
//! `guestbook-cli delete`) can remove them.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use guestbook_core::NewEntry;
use guestbook_server::db::{EntryStore, PgEntryStore};

use super::{CliError, connect};

/// One entry as written in a seed file.
#[derive(Debug, Deserialize)]
struct SeedEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

/// Seed from `file`, or from the default entries when no file is given.
pub async fn run(file: Option<&str>) -> Result<(), CliError> {
    // Validate everything before touching the database
    let entries = match file {
        Some(path) => {
            info!(path, "Loading guestbook entries from file");
            let content = tokio::fs::read_to_string(Path::new(path)).await?;
            parse_seed(&content)?
        }
        None => default_entries(),
    };

    info!(count = entries.len(), "Seed entries validated");

    let store = PgEntryStore::new(connect().await?);
    // Insert oldest first so creation times keep the file's reading order
    for entry in entries.into_iter().rev() {
        let created = store.create(entry, None).await?;
        info!(entry_id = %created.id, name = %created.name, "Seeded entry");
    }

    info!("Seeding complete!");
    store.close().await;
    Ok(())
}

/// Parse and validate a YAML seed document (newest first).
fn parse_seed(content: &str) -> Result<Vec<NewEntry>, CliError> {
    let raw: Vec<SeedEntry> = serde_yaml::from_str(content)?;

    raw.into_iter()
        .enumerate()
        .map(|(i, e)| {
            NewEntry::parse(&e.name, &e.message)
                .map_err(|source| CliError::InvalidSeedEntry { index: i + 1, source })
        })
        .collect()
}

fn default_entries() -> Vec<NewEntry> {
    guestbook_client::seed::default_seed()
        .into_iter()
        .filter_map(|e| NewEntry::parse(&e.name, &e.message).ok())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use guestbook_core::EntryError;

    use super::*;

    #[test]
    fn test_parse_seed() {
        let yaml = "- name: 김영수\n  message: 축하합니다\n- name: 이미라\n  message: 행복하세요\n";
        let entries = parse_seed(yaml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.first().unwrap().name(), "김영수");
    }

    #[test]
    fn test_parse_seed_reports_invalid_entry() {
        let yaml = "- name: ok\n  message: fine\n- name: '  '\n  message: blank name\n";
        let err = parse_seed(yaml).unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidSeedEntry {
                index: 2,
                source: EntryError::EmptyName
            }
        ));
    }

    #[test]
    fn test_parse_seed_missing_field_is_validation_error() {
        let err = parse_seed("- name: guest\n").unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidSeedEntry {
                source: EntryError::EmptyMessage,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_seed_rejects_wrong_shape() {
        assert!(matches!(
            parse_seed("name: not-a-list"),
            Err(CliError::Yaml(_))
        ));
    }

    #[test]
    fn test_default_entries_are_valid() {
        assert_eq!(default_entries().len(), 2);
    }
}
