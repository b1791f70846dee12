//! Guestbook Core - Shared types library.
//!
//! This crate provides the types shared by every guestbook component:
//! - `server` - HTTP service owning the entry store
//! - `client` - Browser-side controller and HTTP transport
//! - `cli` - Command-line tools for migrations and moderation
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. This keeps it usable on both sides of the wire.
//!
//! # Modules
//!
//! - [`types`] - Entry IDs, entries, and input validation
//! - [`api`] - JSON payloads exchanged over `/guestbook`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod types;

pub use types::*;
