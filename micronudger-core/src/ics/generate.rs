//! Publish documents for a new batch of habit events.

use chrono::{DateTime, Duration, Utc};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};

use super::document::{Method, format_utc, mint_uid, render, zoned_property};
use crate::batch::BatchStore;
use crate::constants::ALARM_MINUTES_BEFORE;
use crate::error::{NudgerError, NudgerResult};
use crate::event::{CalendarEventSpec, GeneratedEventRecord};

/// Batch-wide settings. Per-event fields on [`CalendarEventSpec`] override them.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptions {
    pub calendar_name: String,
    pub timezone_id: String,
    pub add_alarm: bool,
    pub repeat_daily: bool,
}

/// The publish document plus the records now held in the batch slot.
#[derive(Debug, Clone)]
pub struct GeneratedBatch {
    pub document: String,
    pub records: Vec<GeneratedEventRecord>,
}

pub fn generate(
    events: &[CalendarEventSpec],
    options: &BatchOptions,
    store: &mut dyn BatchStore,
) -> NudgerResult<GeneratedBatch> {
    generate_at(events, options, store, Utc::now())
}

/// Build the publish document with `now` as the shared DTSTAMP, then replace
/// the stored batch with the new records.
pub fn generate_at(
    events: &[CalendarEventSpec],
    options: &BatchOptions,
    store: &mut dyn BatchStore,
    now: DateTime<Utc>,
) -> NudgerResult<GeneratedBatch> {
    if events.is_empty() {
        return Err(NudgerError::NothingSelected);
    }
    if let Some(index) = events.iter().position(|e| e.title.trim().is_empty()) {
        return Err(NudgerError::EmptyTitle { index });
    }

    let dtstamp = format_utc(now);

    let mut cal = Calendar::new();
    cal.append_property(Property::new("X-WR-CALNAME", &options.calendar_name));
    cal.append_property(Property::new("X-WR-TIMEZONE", &options.timezone_id));

    let mut records = Vec::with_capacity(events.len());

    for spec in events {
        let record = GeneratedEventRecord {
            uid: mint_uid(),
            title: spec.title.clone(),
            description: spec.description.clone(),
            start: spec.start,
            duration_minutes: spec.duration_minutes,
            timezone_id: spec
                .timezone_id
                .clone()
                .unwrap_or_else(|| options.timezone_id.clone()),
            repeat_daily: spec.repeat_daily.unwrap_or(options.repeat_daily),
        };
        warn_unknown_timezone(&record.timezone_id);

        let alarm_before = spec
            .alarm_before
            .or_else(|| options.add_alarm.then(|| Duration::minutes(i64::from(ALARM_MINUTES_BEFORE))));

        let mut ics_event = event_for(&record, &dtstamp);
        if let Some(lead) = alarm_before {
            ics_event.alarm(display_alarm(&record.title, lead));
        }

        tracing::debug!(uid = %record.uid, title = %record.title, "emitting event");
        cal.push(ics_event.done());
        records.push(record);
    }

    let document = render(&cal.done(), Method::Publish);

    store.set(&records)?;
    tracing::info!(
        calendar = %options.calendar_name,
        events = records.len(),
        "stored generated batch"
    );

    Ok(GeneratedBatch { document, records })
}

/// The VEVENT shared by publish and cancel: identity, times, text and repeat rule.
pub(super) fn event_for(record: &GeneratedEventRecord, dtstamp: &str) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&record.uid);
    ics_event.add_property("DTSTAMP", dtstamp);
    ics_event.append_property(zoned_property("DTSTART", record.start, &record.timezone_id));
    ics_event.append_property(zoned_property("DTEND", record.end(), &record.timezone_id));
    ics_event.summary(&record.title);
    ics_event.description(&record.description);

    if record.repeat_daily {
        ics_event.add_property("RRULE", "FREQ=DAILY");
    }

    ics_event
}

fn display_alarm(title: &str, lead: Duration) -> Alarm {
    let mut alarm = Alarm::display(&format!("Reminder - {}", title), Trigger::before_start(lead));
    // Plain relative trigger, without the RELATED parameter
    alarm.add_property("TRIGGER", format!("-PT{}M", lead.num_minutes()));
    alarm
}

fn warn_unknown_timezone(tzid: &str) {
    if tzid.parse::<chrono_tz::Tz>().is_err() {
        tracing::warn!(tzid, "timezone is not a known IANA id, writing it verbatim");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::MemoryBatchStore;
    use chrono::{NaiveDate, NaiveDateTime, TimeZone};

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    fn options(add_alarm: bool, repeat_daily: bool) -> BatchOptions {
        BatchOptions {
            calendar_name: "Micronudger".to_string(),
            timezone_id: "America/New_York".to_string(),
            add_alarm,
            repeat_daily,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 12, 31, 18, 30, 0).unwrap()
    }

    #[test]
    fn walk_example_has_rrule_and_alarm() {
        let mut store = MemoryBatchStore::default();
        let events = vec![CalendarEventSpec::new("Walk", "10 min", at(2024, 1, 1, 9, 0), 10)];

        let batch = generate_at(&events, &options(true, true), &mut store, now()).unwrap();
        let ics = &batch.document;

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1, "ICS:\n{}", ics);
        assert_eq!(ics.matches("RRULE:FREQ=DAILY").count(), 1, "ICS:\n{}", ics);
        assert_eq!(ics.matches("BEGIN:VALARM").count(), 1, "ICS:\n{}", ics);
        assert!(ics.contains("TRIGGER:-PT15M"), "ICS:\n{}", ics);
        assert!(ics.contains("ACTION:DISPLAY"), "ICS:\n{}", ics);
        assert!(ics.contains("DESCRIPTION:Reminder - Walk"), "ICS:\n{}", ics);
        assert!(
            ics.contains("DTSTART;TZID=America/New_York:20240101T090000"),
            "ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;TZID=America/New_York:20240101T091000"),
            "ICS:\n{}",
            ics
        );
        assert!(ics.contains("DTSTAMP:20231231T183000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("SUMMARY:Walk"), "ICS:\n{}", ics);
        assert!(ics.contains("DESCRIPTION:10 min"), "ICS:\n{}", ics);
        assert!(!ics.contains("SEQUENCE"), "ICS:\n{}", ics);
    }

    #[test]
    fn publish_envelope() {
        let mut store = MemoryBatchStore::default();
        let events = vec![CalendarEventSpec::new("Walk", "", at(2024, 1, 1, 9, 0), 10)];
        let ics = generate_at(&events, &options(false, false), &mut store, now())
            .unwrap()
            .document;

        let lines: Vec<&str> = ics.lines().collect();
        assert_eq!(
            &lines[..5],
            &[
                "BEGIN:VCALENDAR",
                "VERSION:2.0",
                "CALSCALE:GREGORIAN",
                "PRODID:-//Micronudger//EN",
                "METHOD:PUBLISH"
            ]
        );
        assert!(lines.contains(&"X-WR-CALNAME:Micronudger"));
        assert!(lines.contains(&"X-WR-TIMEZONE:America/New_York"));
        assert_eq!(lines.last(), Some(&"END:VCALENDAR"));
        assert!(!ics.contains("RRULE"), "ICS:\n{}", ics);
        assert!(!ics.contains("VALARM"), "ICS:\n{}", ics);
    }

    #[test]
    fn n_events_get_n_unique_uids_and_shared_stamp() {
        let mut store = MemoryBatchStore::default();
        let events: Vec<_> = (0..4)
            .map(|i| CalendarEventSpec::new(format!("Habit {}", i), "", at(2024, 2, 1, 7 + i, 0), 30))
            .collect();

        let batch = generate_at(&events, &options(false, true), &mut store, now()).unwrap();
        let ics = &batch.document;

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 4);
        assert_eq!(ics.matches("DTSTAMP:20231231T183000Z").count(), 4);

        let mut uids: Vec<_> = batch.records.iter().map(|r| r.uid.clone()).collect();
        uids.sort();
        uids.dedup();
        assert_eq!(uids.len(), 4);
        for uid in &uids {
            assert!(ics.contains(&format!("UID:{}", uid)), "missing {} in\n{}", uid, ics);
        }

        assert_eq!(store.get().unwrap(), batch.records);
    }

    #[test]
    fn uids_differ_between_batches() {
        let mut store = MemoryBatchStore::default();
        let events = vec![CalendarEventSpec::new("Walk", "", at(2024, 1, 1, 9, 0), 10)];
        let first = generate_at(&events, &options(false, false), &mut store, now()).unwrap();
        let second = generate_at(&events, &options(false, false), &mut store, now()).unwrap();

        assert_ne!(first.records[0].uid, second.records[0].uid);
        assert_eq!(store.get().unwrap(), second.records);
    }

    #[test]
    fn empty_selection_fails_and_keeps_previous_batch() {
        let mut store = MemoryBatchStore::default();
        let events = vec![CalendarEventSpec::new("Walk", "", at(2024, 1, 1, 9, 0), 10)];
        let first = generate_at(&events, &options(false, false), &mut store, now()).unwrap();

        let result = generate_at(&[], &options(false, false), &mut store, now());
        assert!(matches!(result, Err(NudgerError::NothingSelected)));
        assert_eq!(store.get().unwrap(), first.records);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut store = MemoryBatchStore::default();
        let events = vec![
            CalendarEventSpec::new("Walk", "", at(2024, 1, 1, 9, 0), 10),
            CalendarEventSpec::new("  ", "", at(2024, 1, 1, 9, 0), 10),
        ];
        let result = generate_at(&events, &options(false, false), &mut store, now());
        assert!(matches!(result, Err(NudgerError::EmptyTitle { index: 1 })));
        assert!(store.get().unwrap().is_empty());
    }

    #[test]
    fn per_event_overrides() {
        let mut store = MemoryBatchStore::default();
        let mut spec = CalendarEventSpec::new("Read", "", at(2024, 1, 1, 21, 0), 20);
        spec.timezone_id = Some("Europe/Berlin".to_string());
        spec.repeat_daily = Some(true);
        spec.alarm_before = Some(Duration::minutes(5));

        let batch = generate_at(&[spec], &options(false, false), &mut store, now()).unwrap();
        let ics = &batch.document;

        assert!(ics.contains("DTSTART;TZID=Europe/Berlin:20240101T210000"), "ICS:\n{}", ics);
        assert!(ics.contains("RRULE:FREQ=DAILY"), "ICS:\n{}", ics);
        assert!(ics.contains("TRIGGER:-PT5M"), "ICS:\n{}", ics);
        assert_eq!(batch.records[0].timezone_id, "Europe/Berlin");
        assert!(batch.records[0].repeat_daily);
    }

    #[test]
    fn unknown_timezone_is_written_verbatim() {
        let mut store = MemoryBatchStore::default();
        let mut opts = options(false, false);
        opts.timezone_id = "Mars/Olympus_Mons".to_string();
        let events = vec![CalendarEventSpec::new("Walk", "", at(2024, 1, 1, 9, 0), 10)];

        let ics = generate_at(&events, &opts, &mut store, now()).unwrap().document;
        assert!(ics.contains("DTSTART;TZID=Mars/Olympus_Mons:20240101T090000"), "ICS:\n{}", ics);
    }

    #[test]
    fn valarm_has_no_uid_or_dtstamp() {
        let mut store = MemoryBatchStore::default();
        let events = vec![CalendarEventSpec::new("Walk", "", at(2024, 1, 1, 9, 0), 10)];
        let ics = generate_at(&events, &options(true, false), &mut store, now())
            .unwrap()
            .document;

        let valarm = ics
            .split("BEGIN:VALARM")
            .nth(1)
            .unwrap()
            .split("END:VALARM")
            .next()
            .unwrap();
        assert!(!valarm.contains("UID:"), "VALARM:\n{}", valarm);
        assert!(!valarm.contains("DTSTAMP:"), "VALARM:\n{}", valarm);
        assert!(!valarm.contains("RELATED"), "VALARM:\n{}", valarm);
    }
}
