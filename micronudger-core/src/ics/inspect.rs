//! Read a generated document back for checks and display.

use chrono::NaiveDateTime;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{NudgerError, NudgerResult};

#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub uid: String,
    pub summary: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub timezone_id: Option<String>,
    pub sequence: Option<u32>,
    pub cancelled: bool,
    pub repeats_daily: bool,
    pub alarms: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSummary {
    pub method: Option<String>,
    pub calendar_name: Option<String>,
    pub events: Vec<EventSummary>,
}

impl DocumentSummary {
    pub fn uids(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.uid.as_str()).collect()
    }
}

pub fn inspect(content: &str) -> NudgerResult<DocumentSummary> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(NudgerError::Serialization)?;

    let calendar_prop = |name: &str| {
        calendar
            .properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.val.to_string())
    };

    let events = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(summarize_event)
        .collect::<NudgerResult<Vec<_>>>()?;

    Ok(DocumentSummary {
        method: calendar_prop("METHOD"),
        calendar_name: calendar_prop("X-WR-CALNAME"),
        events,
    })
}

fn summarize_event(vevent: &Component) -> NudgerResult<EventSummary> {
    let uid = vevent
        .find_prop("UID")
        .map(|p| p.val.to_string())
        .ok_or_else(|| NudgerError::Serialization("VEVENT without UID".into()))?;

    let (start, timezone_id) = match vevent
        .find_prop("DTSTART")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
    {
        Some(DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid })) => {
            (Some(date_time), Some(tzid))
        }
        Some(DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive))) => (Some(naive), None),
        Some(DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt))) => (Some(dt.naive_utc()), None),
        _ => (None, None),
    };

    Ok(EventSummary {
        uid,
        summary: vevent.find_prop("SUMMARY").map(|p| p.val.to_string()),
        start,
        timezone_id,
        sequence: vevent
            .find_prop("SEQUENCE")
            .and_then(|p| p.val.as_ref().parse().ok()),
        cancelled: vevent
            .find_prop("STATUS")
            .is_some_and(|p| p.val.as_ref() == "CANCELLED"),
        repeats_daily: vevent
            .find_prop("RRULE")
            .is_some_and(|p| p.val.as_ref() == "FREQ=DAILY"),
        alarms: vevent
            .components
            .iter()
            .filter(|c| c.name == "VALARM")
            .count(),
    })
}
