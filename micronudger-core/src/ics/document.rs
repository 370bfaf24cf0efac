//! Pieces shared by the publish and cancel documents.

use chrono::{DateTime, NaiveDateTime, Utc};
use icalendar::{Calendar, Property};
use uuid::Uuid;

use crate::constants::{PRODID, UID_DOMAIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Publish,
    Cancel,
}

impl Method {
    pub fn as_ics_str(self) -> &'static str {
        match self {
            Method::Publish => "PUBLISH",
            Method::Cancel => "CANCEL",
        }
    }
}

/// A UID that is never reused, across batches and runs.
pub fn mint_uid() -> String {
    format!("{}@{}", Uuid::new_v4().simple(), UID_DOMAIN)
}

/// `YYYYMMDDTHHMMSSZ`
pub(crate) fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// `YYYYMMDDTHHMMSS`, no zone suffix.
pub(crate) fn format_local(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// `NAME;TZID=<tzid>:YYYYMMDDTHHMMSS`. The tzid is written as given.
pub(crate) fn zoned_property(name: &str, dt: NaiveDateTime, tzid: &str) -> Property {
    let mut prop = Property::new(name, format_local(dt));
    prop.add_parameter("TZID", tzid);
    prop
}

/// Serialize the calendar with our envelope.
///
/// The icalendar crate writes its own VERSION/PRODID/CALSCALE header and
/// stamps nested VALARMs with DTSTAMP/UID. The header is rewritten in a
/// fixed order with our PRODID and METHOD, and the VALARM extras dropped.
pub(crate) fn render(calendar: &Calendar, method: Method) -> String {
    let raw = calendar.to_string();
    let mut out = String::with_capacity(raw.len() + 64);
    let mut depth = 0usize;
    let mut in_valarm = false;

    for line in raw.lines() {
        if line == "BEGIN:VCALENDAR" {
            push_line(&mut out, line);
            push_line(&mut out, "VERSION:2.0");
            push_line(&mut out, "CALSCALE:GREGORIAN");
            push_line(&mut out, &format!("PRODID:{}", PRODID));
            push_line(&mut out, &format!("METHOD:{}", method.as_ics_str()));
            continue;
        }

        if depth == 0 && is_envelope_line(line) {
            continue;
        }

        if line.starts_with("BEGIN:") {
            depth += 1;
            in_valarm |= line == "BEGIN:VALARM";
        } else if line.starts_with("END:") && line != "END:VCALENDAR" {
            depth = depth.saturating_sub(1);
            if line == "END:VALARM" {
                in_valarm = false;
            }
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        push_line(&mut out, line);
    }

    out
}

fn is_envelope_line(line: &str) -> bool {
    ["VERSION:", "PRODID:", "CALSCALE:", "METHOD:"]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str("\r\n");
}
