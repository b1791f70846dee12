//! Database migration command.
//!
//! Migrations live in `crates/server/migrations/` and are embedded at build
//! time.

use super::{CliError, connect};

/// Apply all pending guestbook migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running guestbook migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Guestbook migrations complete!");
    pool.close().await;
    Ok(())
}
