//! Fallback entries rendered before (or instead of) the live list.

use chrono::DateTime;
use uuid::Uuid;

use guestbook_core::{EntryId, GuestbookEntry};

/// Entries shipped with the invitation page, newest first.
///
/// Shown on first render and whenever the server cannot be reached.
#[must_use]
pub fn default_seed() -> Vec<GuestbookEntry> {
    vec![
        GuestbookEntry {
            id: EntryId::new(Uuid::from_u128(2)),
            name: "이미라".to_string(),
            message: "결혼 정말 축하해요! 오래오래 행복하게 사랑하며 살아가길 바랄게요. 💕"
                .to_string(),
            // 2025-04-21T15:45:00Z
            created_at: DateTime::from_timestamp(1_745_250_300, 0).unwrap_or_default(),
        },
        GuestbookEntry {
            id: EntryId::new(Uuid::from_u128(1)),
            name: "김영수".to_string(),
            message: "두 분의 결혼을 진심으로 축하합니다! 앞으로도 지금처럼 서로 아끼고 사랑하며 행복하게 사세요."
                .to_string(),
            // 2025-04-20T12:30:00Z
            created_at: DateTime::from_timestamp(1_745_152_200, 0).unwrap_or_default(),
        },
    ]
}
