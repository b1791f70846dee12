//! Display helpers for guestbook entries.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

/// Seconds east of UTC for the wedding's local time (KST).
const LOCAL_OFFSET_SECS: i32 = 9 * 3600;

/// Render a creation time as a Korean long date, e.g. `2025년 4월 20일`.
///
/// The date is taken in KST so late-evening UTC posts land on the local day.
#[must_use]
pub fn format_created_at(created_at: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(LOCAL_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    let local = created_at.with_timezone(&offset);
    format!("{}년 {}월 {}일", local.year(), local.month(), local.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap_or_default()
    }

    #[test]
    fn test_formats_korean_long_date() {
        // 2025-04-20T12:30:00Z
        assert_eq!(format_created_at(at(1_745_152_200)), "2025년 4월 20일");
    }

    #[test]
    fn test_uses_local_day() {
        // 2025-04-20T20:00:00Z is already the 21st in Seoul
        assert_eq!(format_created_at(at(1_745_179_200)), "2025년 4월 21일");
    }
}
