//! Guestbook CLI - Database migrations and moderation tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply guestbook migrations
//! guestbook-cli migrate
//!
//! # Insert the invitation page's default entries
//! guestbook-cli seed
//!
//! # Insert entries from a YAML file
//! guestbook-cli seed --file entries.yaml
//!
//! # List entries, newest first
//! guestbook-cli list
//!
//! # Remove an entry as a moderator
//! guestbook-cli delete 6f1c2d5e-8a4b-4e2f-9c1a-0b3d5e7f9a1c
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the guestbook with entries
//! - `list` - Print stored entries
//! - `delete` - Delete an entry without its delete token

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "guestbook-cli")]
#[command(author, version, about = "Wedding guestbook CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the guestbook with entries
    Seed {
        /// YAML file with a list of `{name, message}` entries
        #[arg(short, long)]
        file: Option<String>,
    },
    /// List entries, newest first
    List,
    /// Delete an entry by ID
    Delete {
        /// Entry ID (UUID)
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::run(file.as_deref()).await?,
        Commands::List => commands::entries::list().await?,
        Commands::Delete { id } => commands::entries::delete(&id).await?,
    }
    Ok(())
}
