//! CLI subcommands.
//!
//! # Environment Variables
//!
//! - `GUESTBOOK_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

pub mod entries;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use guestbook_core::EntryError;
use guestbook_server::db::{self, RepositoryError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Entry store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),

    /// Seed file could not be read.
    #[error("Could not read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not valid YAML of the expected shape.
    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A seed entry failed validation.
    #[error("Seed entry #{index}: {source}")]
    InvalidSeedEntry { index: usize, source: EntryError },

    /// Entry ID is not a UUID.
    #[error("Invalid entry ID: {0}")]
    InvalidId(String),

    /// No entry with the given ID.
    #[error("Entry not found: {0}")]
    NotFound(String),
}

/// Load `.env` and connect to the guestbook database.
async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("GUESTBOOK_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("GUESTBOOK_DATABASE_URL"))?;

    tracing::info!("Connecting to guestbook database...");
    Ok(db::create_pool(&database_url).await?)
}
