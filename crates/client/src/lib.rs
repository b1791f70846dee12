//! Guestbook client library.
//!
//! Everything the invitation page needs to drive its guestbook section:
//!
//! - [`controller`] - View state, submission form, and the delete workflow
//! - [`api`] - The request/response contract with the server
//! - [`http`] - `reqwest` implementation of that contract
//! - [`notify`] - Toast notification capability handed to the controller
//! - [`seed`] - Fallback entries shown when the server is unreachable
//! - [`format`] - Display helpers for entry timestamps

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod controller;
pub mod format;
pub mod http;
pub mod notify;
pub mod seed;

pub use api::{ApiError, GuestbookApi};
pub use controller::{
    DeleteOutcome, GuestbookController, GuestbookView, LoadOutcome, SubmitOutcome,
};
pub use http::HttpGuestbookApi;
pub use notify::{Notifier, ToastVariant, TracingNotifier};
