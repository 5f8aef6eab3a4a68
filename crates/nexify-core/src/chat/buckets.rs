//! Day-bucket date ranges for the chat listing views.
//!
//! Ranges are pure functions of a caller-supplied `now`, computed fresh per
//! request. A long-running process crossing midnight therefore never serves
//! stale buckets.

use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Creation-date bucket for the chat listing views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBucket {
    /// Chats created on the current UTC day.
    Today,
    /// Chats created on the previous UTC day.
    Yesterday,
    /// Chats created 2-7 days back (excludes yesterday and today).
    LastSevenDays,
}

impl DayBucket {
    /// Half-open UTC range `[start, end)` covered by this bucket at `now`.
    ///
    /// The ranges are mutually exclusive and jointly cover the seven-day
    /// window plus today: a chat created exactly at a midnight boundary
    /// falls into exactly one bucket.
    pub fn range(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        match self {
            DayBucket::Today => (midnight, midnight + Duration::days(1)),
            DayBucket::Yesterday => (midnight - Duration::days(1), midnight),
            DayBucket::LastSevenDays => {
                (midnight - Duration::days(7), midnight - Duration::days(1))
            }
        }
    }

    /// Whether a creation timestamp falls into this bucket at `now`.
    pub fn contains(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let (start, end) = self.range(now);
        start <= created_at && created_at < end
    }
}
