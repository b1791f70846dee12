//! Guestbook view controller.
//!
//! Owns the state the server does not: the entry cache, form buffers, busy
//! flags, and the delete-confirmation workflow. The cache only changes after
//! the server confirms an operation.
//!
//! State sits behind a mutex that is never held across an `.await`, so every
//! operation takes `&self` and operations may interleave: a guest can cancel a
//! delete prompt while the delete request is still in flight.
//!
//! Every response is tagged with the mount generation it was issued under.
//! After [`GuestbookController::unmount`] (or a re-mount) stale responses are
//! dropped without touching state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use guestbook_core::api::CreateEntryResponse;
use guestbook_core::{EntryId, GuestbookEntry};

use crate::api::{ApiError, GuestbookApi};
use crate::notify::{Notifier, ToastVariant};

/// Renderable snapshot of the guestbook section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestbookView {
    /// Entries newest first.
    pub entries: Vec<GuestbookEntry>,
    /// Initial list request in flight.
    pub loading: bool,
    /// Showing seed entries because the list request failed.
    pub using_seed: bool,
    /// Create request in flight.
    pub submitting: bool,
    /// Delete request in flight.
    pub deleting: bool,
    /// Name input buffer.
    pub name: String,
    /// Message input buffer.
    pub message: String,
    /// Delete password input buffer.
    pub delete_secret: String,
    /// Entry whose delete prompt is open.
    pub pending_delete: Option<EntryId>,
}

impl GuestbookView {
    /// Whether the delete prompt is open.
    #[must_use]
    pub const fn is_delete_prompt_open(&self) -> bool {
        self.pending_delete.is_some()
    }
}

/// Result of [`GuestbookController::mount`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// Live entries replaced the cache.
    Loaded(usize),
    /// The request failed; seed entries are shown instead.
    FellBack(ApiError),
    /// The view was unmounted before the response arrived.
    Discarded,
}

/// Result of [`GuestbookController::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input, unmounted view, or a submission already in flight.
    Skipped,
    Created(GuestbookEntry),
    /// Buffers were kept so the guest can retry.
    Failed(ApiError),
    Discarded,
}

/// Result of [`GuestbookController::confirm_delete`].
#[derive(Debug)]
pub enum DeleteOutcome {
    /// No pending selection or unmounted view. Also returned when another
    /// delete is in flight; the prompt is then closed and a warning shown.
    Skipped,
    Deleted(EntryId),
    /// The server no longer had the entry; it was dropped from the cache.
    AlreadyRemoved(EntryId),
    /// Cache left untouched.
    Failed(ApiError),
    Discarded,
}

#[derive(Debug, Default)]
struct ControllerState {
    view: GuestbookView,
    /// Capability tokens for entries this client created.
    delete_tokens: HashMap<EntryId, String>,
    mounted: bool,
    generation: u64,
}

impl ControllerState {
    const fn is_current(&self, ticket: u64) -> bool {
        self.mounted && self.generation == ticket
    }

    fn remove_entry(&mut self, id: EntryId) {
        self.view.entries.retain(|e| e.id != id);
        self.delete_tokens.remove(&id);
    }

    fn finish_delete(&mut self, id: EntryId) {
        self.view.deleting = false;
        // A newer selection made while the request was in flight stays open
        if self.view.pending_delete == Some(id) {
            self.view.pending_delete = None;
            self.view.delete_secret.clear();
        }
    }
}

/// Guestbook controller, generic over its server contract and notifier.
pub struct GuestbookController<A, N> {
    api: A,
    notifier: N,
    seed: Vec<GuestbookEntry>,
    state: Mutex<ControllerState>,
}

impl<A: GuestbookApi, N: Notifier> GuestbookController<A, N> {
    /// Create a controller. The seed entries are rendered until the first
    /// successful load, and again if loading fails.
    #[must_use]
    pub fn new(api: A, notifier: N, seed: Vec<GuestbookEntry>) -> Self {
        let mut seed = seed;
        sort_newest_first(&mut seed);

        let state = ControllerState {
            view: GuestbookView {
                entries: seed.clone(),
                using_seed: true,
                ..GuestbookView::default()
            },
            ..ControllerState::default()
        };

        Self {
            api,
            notifier,
            seed,
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current view state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GuestbookView {
        self.lock().view.clone()
    }

    /// Update the name input buffer.
    pub fn set_name(&self, name: impl Into<String>) {
        self.lock().view.name = name.into();
    }

    /// Update the message input buffer.
    pub fn set_message(&self, message: impl Into<String>) {
        self.lock().view.message = message.into();
    }

    /// Update the delete password buffer.
    pub fn set_delete_secret(&self, secret: impl Into<String>) {
        self.lock().view.delete_secret = secret.into();
    }

    /// Mount the view and load the live entry list.
    ///
    /// Transient state from a previous mount is reset. On failure the seed
    /// entries are shown and a warning is raised.
    pub async fn mount(&self) -> LoadOutcome {
        let ticket = {
            let mut state = self.lock();
            state.generation += 1;
            state.mounted = true;

            let view = &mut state.view;
            view.loading = true;
            view.submitting = false;
            view.deleting = false;
            view.pending_delete = None;
            view.delete_secret.clear();
            state.generation
        };

        let result = self.api.list().await;

        let mut state = self.lock();
        if !state.is_current(ticket) {
            tracing::debug!("Dropping guestbook list response for unmounted view");
            return LoadOutcome::Discarded;
        }
        state.view.loading = false;

        match result {
            Ok(mut entries) => {
                sort_newest_first(&mut entries);
                let count = entries.len();
                state.view.entries = entries;
                state.view.using_seed = false;
                LoadOutcome::Loaded(count)
            }
            Err(err) => {
                state.view.entries.clone_from(&self.seed);
                state.view.using_seed = true;
                drop(state);

                tracing::warn!(error = %err, "Falling back to seed guestbook entries");
                self.notifier.show(
                    "Could not load messages",
                    "Showing saved messages for now. Please try again later.",
                    ToastVariant::Warning,
                );
                LoadOutcome::FellBack(err)
            }
        }
    }

    /// Mark the view as gone. Responses still in flight will be ignored.
    pub fn unmount(&self) {
        let mut state = self.lock();
        state.mounted = false;
        state.generation += 1;
    }

    /// Submit the name and message buffers as a new entry.
    pub async fn submit(&self) -> SubmitOutcome {
        let (ticket, name, message) = {
            let mut state = self.lock();
            let view = &state.view;
            if !state.mounted
                || view.submitting
                || view.name.trim().is_empty()
                || view.message.trim().is_empty()
            {
                return SubmitOutcome::Skipped;
            }

            let (name, message) = (view.name.clone(), view.message.clone());
            state.view.submitting = true;
            (state.generation, name, message)
        };

        let result = self.api.create(&name, &message).await;

        let mut state = self.lock();
        if !state.is_current(ticket) {
            tracing::debug!("Dropping guestbook create response for unmounted view");
            return SubmitOutcome::Discarded;
        }
        state.view.submitting = false;

        match result {
            Ok(CreateEntryResponse {
                entry,
                delete_token,
            }) => {
                insert_newest_first(&mut state.view.entries, entry.clone());
                if let Some(token) = delete_token {
                    state.delete_tokens.insert(entry.id, token);
                }
                // Keep anything typed while the request was in flight
                if state.view.name == name {
                    state.view.name.clear();
                }
                if state.view.message == message {
                    state.view.message.clear();
                }
                drop(state);

                tracing::info!(entry_id = %entry.id, "Guestbook entry posted");
                self.notifier.show(
                    "Message posted",
                    "Thank you for your congratulations!",
                    ToastVariant::Default,
                );
                SubmitOutcome::Created(entry)
            }
            Err(err) => {
                drop(state);
                self.notifier.show(
                    "Could not post message",
                    &err.to_string(),
                    ToastVariant::Destructive,
                );
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Open the delete prompt for an entry. Nothing is sent yet.
    pub fn request_delete(&self, id: EntryId) {
        let mut state = self.lock();
        state.view.pending_delete = Some(id);
        state.view.delete_secret.clear();
    }

    /// Close the delete prompt without contacting the server.
    pub fn cancel_delete(&self) {
        let mut state = self.lock();
        state.view.pending_delete = None;
        state.view.delete_secret.clear();
    }

    /// Whether this client holds the delete token for an entry it created.
    #[must_use]
    pub fn owns_entry(&self, id: EntryId) -> bool {
        self.lock().delete_tokens.contains_key(&id)
    }

    /// Send the delete request for the pending entry.
    ///
    /// Uses the typed password, or this client's own delete token for the
    /// entry when the password buffer is empty. Only one delete runs at a
    /// time: confirming while another is in flight closes the prompt and
    /// warns instead of sending.
    pub async fn confirm_delete(&self) -> DeleteOutcome {
        let (ticket, id, secret) = {
            let mut state = self.lock();
            if !state.mounted {
                return DeleteOutcome::Skipped;
            }
            let Some(id) = state.view.pending_delete else {
                return DeleteOutcome::Skipped;
            };
            if state.view.deleting {
                state.view.pending_delete = None;
                state.view.delete_secret.clear();
                drop(state);

                tracing::debug!(entry_id = %id, "Delete already in flight; prompt closed");
                self.notifier.show(
                    "Please wait",
                    "Another message is being deleted. Try again in a moment.",
                    ToastVariant::Warning,
                );
                return DeleteOutcome::Skipped;
            }

            let secret = if state.view.delete_secret.is_empty() {
                state.delete_tokens.get(&id).cloned().unwrap_or_default()
            } else {
                state.view.delete_secret.clone()
            };
            state.view.deleting = true;
            (state.generation, id, secret)
        };

        let result = self.api.delete(id, &secret).await;

        let mut state = self.lock();
        if !state.is_current(ticket) {
            tracing::debug!(entry_id = %id, "Dropping guestbook delete response for unmounted view");
            return DeleteOutcome::Discarded;
        }
        state.finish_delete(id);

        match result {
            Ok(_) => {
                state.remove_entry(id);
                drop(state);

                tracing::info!(entry_id = %id, "Guestbook entry deleted");
                self.notifier
                    .show("Message deleted", "", ToastVariant::Default);
                DeleteOutcome::Deleted(id)
            }
            Err(ApiError::NotFound(reason)) => {
                state.remove_entry(id);
                drop(state);

                tracing::info!(entry_id = %id, "Guestbook entry was already deleted");
                self.notifier
                    .show("Message already removed", &reason, ToastVariant::Default);
                DeleteOutcome::AlreadyRemoved(id)
            }
            Err(err) => {
                drop(state);
                self.notifier.show(
                    "Could not delete message",
                    &err.to_string(),
                    ToastVariant::Destructive,
                );
                DeleteOutcome::Failed(err)
            }
        }
    }
}

fn sort_newest_first(entries: &mut [GuestbookEntry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Insert keeping newest-first order; ahead of any entry with the same time.
fn insert_newest_first(entries: &mut Vec<GuestbookEntry>, entry: GuestbookEntry) {
    entries.retain(|e| e.id != entry.id);
    let at = entries.partition_point(|e| e.created_at > entry.created_at);
    entries.insert(at, entry);
}
