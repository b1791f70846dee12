//! Business logic services for the guestbook server.
//!
//! # Services
//!
//! - `guestbook` - Entry listing, creation, and authorized deletion

pub mod guestbook;

pub use guestbook::{CreatedEntry, GuestbookError, GuestbookService};
