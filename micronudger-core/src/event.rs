//! Calendar event types: what callers ask for and what a batch remembers.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Input to the batch generator. Only the title is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEventSpec {
    pub title: String,
    pub description: String,
    /// Wall-clock start in `timezone_id`.
    pub start: NaiveDateTime,
    pub duration_minutes: u32,

    // Per-event overrides of the batch options
    pub timezone_id: Option<String>,
    pub repeat_daily: Option<bool>,
    pub alarm_before: Option<Duration>,
}

impl CalendarEventSpec {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        start: NaiveDateTime,
        duration_minutes: u32,
    ) -> Self {
        CalendarEventSpec {
            title: title.into(),
            description: description.into(),
            start,
            duration_minutes,
            timezone_id: None,
            repeat_daily: None,
            alarm_before: None,
        }
    }
}

/// One event of the last generated batch, as persisted for later removal.
///
/// `uid`, `start`, `duration_minutes` and `timezone_id` are replayed verbatim
/// by the cancellation document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEventRecord {
    pub uid: String,
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "startISO")]
    pub start: NaiveDateTime,
    #[serde(rename = "durationMin")]
    pub duration_minutes: u32,
    #[serde(rename = "tzid")]
    pub timezone_id: String,
    #[serde(rename = "repeatDaily")]
    pub repeat_daily: bool,
}

impl GeneratedEventRecord {
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::minutes(i64::from(self.duration_minutes))
    }
}
