//! Integration test harness for the guestbook.
//!
//! Each test boots the real router on an ephemeral local port, backed by an
//! in-memory entry store, and talks to it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p guestbook-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use secrecy::SecretString;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use guestbook_client::HttpGuestbookApi;
use guestbook_server::config::ServerConfig;
use guestbook_server::db::{EntryStore, MemoryEntryStore};
use guestbook_server::state::AppState;

/// Moderator secret configured on every test server.
pub const MODERATOR_SECRET: &str = "wedding-moderator-Q7v2kX9p";

/// A running guestbook server for one test.
pub struct TestServer {
    base_url: String,
    store: Arc<MemoryEntryStore>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with an empty store.
    pub async fn spawn() -> Self {
        Self::spawn_with(MemoryEntryStore::new()).await
    }

    /// Start a server over a pre-populated store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn_with(store: MemoryEntryStore) -> Self {
        let mut config = ServerConfig::in_memory();
        config.moderator_secret = Some(SecretString::from(MODERATOR_SECRET));

        let store = Arc::new(store);
        let shared: Arc<dyn EntryStore> = store.clone();
        let app = guestbook_server::app(AppState::new(config.clone(), shared));

        let listener = TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            store,
            task,
        }
    }

    /// Absolute URL for a server path such as `/guestbook`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// The server's base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Typed client for this server.
    ///
    /// # Panics
    ///
    /// Panics if the base URL is rejected, which cannot happen for a bound
    /// socket address.
    #[must_use]
    pub fn api(&self) -> HttpGuestbookApi {
        HttpGuestbookApi::new(&self.base_url).expect("Test server URL is valid")
    }

    /// The store behind the server, for inspection and fault injection.
    #[must_use]
    pub fn store(&self) -> &MemoryEntryStore {
        &self.store
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
