/// Local data document (profile, passphrase hash, chat history).
pub const DATA_FILE: &str = "mn_data_v1.json";

/// Custom habits list.
pub const HABITS_FILE: &str = "micronudger_custom_habits_v3.json";

/// Single slot holding the most recently generated batch.
pub const LAST_BATCH_FILE: &str = "micronudger_last_batch_v1.json";

pub const PRODID: &str = "-//Micronudger//EN";

pub const DEFAULT_CALENDAR_NAME: &str = "Micronudger – Wellness";

pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Lead time of the optional display alarm.
pub const ALARM_MINUTES_BEFORE: u32 = 15;

/// SEQUENCE carried by every cancelled event. Generation emits none (0).
pub const CANCEL_SEQUENCE: u32 = 2;

/// Suffix appended to the calendar name in removal documents.
pub const REMOVAL_NAME_SUFFIX: &str = " (Removal)";

pub const UID_DOMAIN: &str = "micronudger";

/// Largest UTC offset accepted for a profile, in minutes either side.
pub const MAX_TZ_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// Name used when the profile has none.
pub const FALLBACK_NAME: &str = "friend";
