//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::EntryStore;
use crate::services::GuestbookService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the guestbook service. The entry store inside the
/// service is constructed by the caller and injected here; nothing in the
/// server creates a store implicitly.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    guestbook: GuestbookService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `store` - Entry store, shared by reference for the life of the process
    #[must_use]
    pub fn new(config: ServerConfig, store: Arc<dyn EntryStore>) -> Self {
        let guestbook = GuestbookService::new(store, config.moderator_secret.clone());

        Self {
            inner: Arc::new(AppStateInner { config, guestbook }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the guestbook service.
    #[must_use]
    pub fn guestbook(&self) -> &GuestbookService {
        &self.inner.guestbook
    }

    /// Get a reference to the entry store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn EntryStore> {
        self.inner.guestbook.store()
    }
}
