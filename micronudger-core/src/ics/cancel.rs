//! Removal documents for the last generated batch.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, Property};

use super::document::{Method, format_utc, render};
use super::generate::event_for;
use crate::batch::BatchStore;
use crate::constants::{CANCEL_SEQUENCE, REMOVAL_NAME_SUFFIX};
use crate::error::{NudgerError, NudgerResult};

pub fn build_cancellation(calendar_name: &str, store: &dyn BatchStore) -> NudgerResult<String> {
    build_cancellation_at(calendar_name, store, Utc::now())
}

/// Cancel every event of the stored batch.
///
/// Each VEVENT keeps its UID, DTSTART/DTEND and TZID, gains
/// `STATUS:CANCELLED` and a constant `SEQUENCE`. The slot is left untouched,
/// so exporting twice yields the same events.
pub fn build_cancellation_at(
    calendar_name: &str,
    store: &dyn BatchStore,
    now: DateTime<Utc>,
) -> NudgerResult<String> {
    let batch = store.get()?;
    if batch.is_empty() {
        return Err(NudgerError::NoBatchAvailable);
    }

    let dtstamp = format_utc(now);

    let mut cal = Calendar::new();
    cal.append_property(Property::new(
        "X-WR-CALNAME",
        format!("{}{}", calendar_name, REMOVAL_NAME_SUFFIX),
    ));

    for record in &batch {
        let mut ics_event = event_for(record, &dtstamp);
        ics_event.add_property("SEQUENCE", CANCEL_SEQUENCE.to_string());
        ics_event.add_property("STATUS", "CANCELLED");
        cal.push(ics_event.done());
    }

    tracing::info!(calendar = calendar_name, events = batch.len(), "built removal document");

    Ok(render(&cal.done(), Method::Cancel))
}
