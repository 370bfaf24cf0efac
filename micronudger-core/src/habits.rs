//! Built-in and custom habits, and turning a selection into calendar events.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{NudgerError, NudgerResult};
use crate::event::CalendarEventSpec;
use crate::store::write_json_atomic;
use crate::utils::parse_hhmm;

/// A habit that ships with the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinHabit {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub default_time: &'static str,
}

pub const BUILTIN_HABITS: &[BuiltinHabit] = &[
    BuiltinHabit {
        key: "walk",
        title: "Morning walk",
        description: "A 10-minute walk to start the day.",
        default_time: "08:00",
    },
    BuiltinHabit {
        key: "water",
        title: "Hydrate",
        description: "Drink a full glass of water.",
        default_time: "10:00",
    },
    BuiltinHabit {
        key: "plate",
        title: "Veggie plate",
        description: "Fill half your lunch plate with vegetables.",
        default_time: "12:30",
    },
    BuiltinHabit {
        key: "stretch",
        title: "Stretch break",
        description: "Stand up and stretch for 5 minutes.",
        default_time: "15:00",
    },
    BuiltinHabit {
        key: "winddown",
        title: "Wind down",
        description: "Dim the lights and put devices away.",
        default_time: "21:30",
    },
];

pub fn find_builtin(key: &str) -> Option<&'static BuiltinHabit> {
    BUILTIN_HABITS.iter().find(|h| h.key == key)
}

/// A checked built-in habit, optionally moved to another time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinSelection {
    pub habit: &'static BuiltinHabit,
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHabit {
    pub title: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    /// `HH:MM`, 24h.
    pub time: String,
}

impl CustomHabit {
    pub fn new(title: &str, description: &str, time: &str) -> NudgerResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(NudgerError::MissingHabitTitle);
        }
        parse_hhmm(time)?;

        Ok(CustomHabit {
            title: title.to_string(),
            description: description.trim().to_string(),
            time: time.to_string(),
        })
    }
}

/// The user's custom habits, persisted as a JSON list.
#[derive(Debug, Clone)]
pub struct HabitBook {
    path: PathBuf,
}

impl HabitBook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HabitBook { path: path.into() }
    }

    /// Missing or unreadable files read as an empty list.
    pub fn list(&self) -> Vec<CustomHabit> {
        if !self.path.exists() {
            return Vec::new();
        }

        match std::fs::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
        {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable habits file");
                Vec::new()
            }
        }
    }

    fn save(&self, list: &[CustomHabit]) -> NudgerResult<()> {
        write_json_atomic(&self.path, list)
    }

    pub fn add(&self, habit: CustomHabit) -> NudgerResult<()> {
        let mut list = self.list();
        list.push(habit);
        self.save(&list)
    }

    /// Replace the habit at `index`. A blank title keeps the old one.
    pub fn edit(&self, index: usize, title: &str, description: &str, time: &str) -> NudgerResult<()> {
        let mut list = self.list();
        let existing = list.get_mut(index).ok_or(NudgerError::HabitNotFound(index))?;
        parse_hhmm(time)?;

        let title = title.trim();
        if !title.is_empty() {
            existing.title = title.to_string();
        }
        existing.description = description.trim().to_string();
        existing.time = time.to_string();

        self.save(&list)
    }

    pub fn delete(&self, index: usize) -> NudgerResult<CustomHabit> {
        let mut list = self.list();
        if index >= list.len() {
            return Err(NudgerError::HabitNotFound(index));
        }
        let removed = list.remove(index);
        self.save(&list)?;
        Ok(removed)
    }

    pub fn clear(&self) -> NudgerResult<()> {
        self.save(&[])
    }
}

/// Expand the selection into one event per habit on `start_date`.
///
/// Built-ins come first, then every custom habit. An empty selection is
/// an error rather than an empty calendar.
pub fn expand_events(
    start_date: NaiveDate,
    duration_minutes: u32,
    builtins: &[BuiltinSelection],
    customs: &[CustomHabit],
) -> NudgerResult<Vec<CalendarEventSpec>> {
    if builtins.is_empty() && customs.is_empty() {
        return Err(NudgerError::NothingSelected);
    }

    let mut events = Vec::with_capacity(builtins.len() + customs.len());
    for sel in builtins {
        let time = sel.time.as_deref().unwrap_or(sel.habit.default_time);
        events.push(spec_at(start_date, duration_minutes, sel.habit.title, sel.habit.description, time)?);
    }
    for habit in customs {
        events.push(spec_at(
            start_date,
            duration_minutes,
            &habit.title,
            &habit.description,
            &habit.time,
        )?);
    }
    Ok(events)
}

fn spec_at(
    date: NaiveDate,
    duration_minutes: u32,
    title: &str,
    description: &str,
    time: &str,
) -> NudgerResult<CalendarEventSpec> {
    let start = date.and_time(parse_hhmm(time)?);
    Ok(CalendarEventSpec::new(title, description, start, duration_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn custom_habit_validation() {
        assert!(matches!(
            CustomHabit::new(" ", "", "09:00"),
            Err(NudgerError::MissingHabitTitle)
        ));
        assert!(matches!(
            CustomHabit::new("Read", "", "9:00"),
            Err(NudgerError::InvalidTime(_))
        ));
        let habit = CustomHabit::new("  Read ", " 10 pages ", "21:00").unwrap();
        assert_eq!(habit.title, "Read");
        assert_eq!(habit.description, "10 pages");
    }

    #[test]
    fn habit_book_crud() {
        let dir = tempfile::tempdir().unwrap();
        let book = HabitBook::new(dir.path().join("habits.json"));
        assert!(book.list().is_empty());

        book.add(CustomHabit::new("Read", "", "21:00").unwrap()).unwrap();
        book.add(CustomHabit::new("Journal", "3 lines", "22:00").unwrap()).unwrap();
        assert_eq!(book.list().len(), 2);

        book.edit(0, "", "20 pages", "20:45").unwrap();
        let first = &book.list()[0];
        assert_eq!(first.title, "Read");
        assert_eq!(first.description, "20 pages");
        assert_eq!(first.time, "20:45");

        assert!(matches!(
            book.edit(0, "Read", "", "late"),
            Err(NudgerError::InvalidTime(_))
        ));
        assert!(matches!(book.delete(5), Err(NudgerError::HabitNotFound(5))));

        let removed = book.delete(0).unwrap();
        assert_eq!(removed.title, "Read");
        assert_eq!(book.list()[0].title, "Journal");

        book.clear().unwrap();
        assert!(book.list().is_empty());
    }

    #[test]
    fn expand_orders_builtins_then_customs() {
        let builtins = vec![
            BuiltinSelection {
                habit: find_builtin("water").unwrap(),
                time: None,
            },
            BuiltinSelection {
                habit: find_builtin("walk").unwrap(),
                time: Some("06:45".to_string()),
            },
        ];
        let customs = vec![CustomHabit::new("Read", "", "21:00").unwrap()];

        let events = expand_events(date(), 30, &builtins, &customs).unwrap();
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Hydrate", "Morning walk", "Read"]);
        assert_eq!(events[0].start, date().and_hms_opt(10, 0, 0).unwrap());
        assert_eq!(events[1].start, date().and_hms_opt(6, 45, 0).unwrap());
        assert!(events.iter().all(|e| e.duration_minutes == 30));
    }

    #[test]
    fn expand_rejects_empty_selection_and_bad_override() {
        assert!(matches!(
            expand_events(date(), 30, &[], &[]),
            Err(NudgerError::NothingSelected)
        ));

        let bad = vec![BuiltinSelection {
            habit: &BUILTIN_HABITS[0],
            time: Some("noon".to_string()),
        }];
        assert!(matches!(
            expand_events(date(), 30, &bad, &[]),
            Err(NudgerError::InvalidTime(_))
        ));
    }

    #[test]
    fn builtin_defaults_are_valid_times() {
        for habit in BUILTIN_HABITS {
            assert!(parse_hhmm(habit.default_time).is_ok(), "{}", habit.key);
        }
    }
}
