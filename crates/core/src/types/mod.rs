//! Core types for the guestbook.

pub mod entry;
pub mod id;

pub use entry::{EntryError, GuestbookEntry, NewEntry};
pub use id::*;
