//! JSON payloads for the `/guestbook` HTTP API.
//!
//! ```text
//! GET    /guestbook        -> 200 ListEntriesResponse
//! POST   /guestbook        CreateEntryRequest -> 201 CreateEntryResponse
//! DELETE /guestbook/{id}   DeleteEntryRequest -> 200 DeleteEntryResponse
//! (any failure)            -> 4xx/5xx ErrorResponse
//! ```

use serde::{Deserialize, Serialize};

use crate::GuestbookEntry;

/// Response body for `GET /guestbook`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEntriesResponse {
    /// Entries ordered newest first.
    pub entries: Vec<GuestbookEntry>,
}

/// Request body for `POST /guestbook`.
///
/// Fields are optional on the wire so that a missing field is reported as a
/// validation failure rather than a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for `POST /guestbook`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryResponse {
    pub entry: GuestbookEntry,
    /// Capability token authorizing deletion of this entry.
    ///
    /// Only ever returned here, to the creator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_token: Option<String>,
}

/// Request body for `DELETE /guestbook/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteEntryRequest {
    /// Entry capability token or moderator secret.
    #[serde(default)]
    pub password: Option<String>,
}

/// Response body for a successful `DELETE /guestbook/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEntryResponse {
    pub message: String,
}

/// Uniform error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
