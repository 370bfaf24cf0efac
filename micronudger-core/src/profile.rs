//! User profile and the time-aware greeting banner.

use chrono::{DateTime, FixedOffset, Local, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{FALLBACK_NAME, MAX_TZ_OFFSET_MINUTES};
use crate::error::{NudgerError, NudgerResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    /// Minutes east of UTC.
    pub tz_offset_min: Option<i32>,
    /// Preferred daily nudge time, `HH:MM`.
    pub nudge_time: Option<String>,
}

impl Profile {
    /// Name to address the user by.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(FALLBACK_NAME)
    }

    fn offset(&self) -> FixedOffset {
        self.tz_offset_min
            .and_then(|m| m.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(system_offset)
    }

    pub fn banner(&self) -> String {
        self.banner_at(Utc::now())
    }

    /// "Good morning, NAME! • Daily nudge at HH:MM" evaluated in the profile's offset.
    pub fn banner_at(&self, now: DateTime<Utc>) -> String {
        let hour = now.with_timezone(&self.offset()).hour();
        let tod = if hour < 12 {
            "Good morning"
        } else if hour < 17 {
            "Good afternoon"
        } else {
            "Good evening"
        };

        let nudge = self
            .nudge_time
            .as_ref()
            .map(|t| format!(" • Daily nudge at {}", t))
            .unwrap_or_default();

        format!("{}, {}!{}", tod, self.display_name(), nudge)
    }
}

/// Accept an offset in minutes east of UTC if it is within a day.
pub fn validate_offset(minutes: i32) -> NudgerResult<i32> {
    if (-MAX_TZ_OFFSET_MINUTES..=MAX_TZ_OFFSET_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(NudgerError::InvalidOffset(minutes))
    }
}

/// Offset of the machine's local timezone, in minutes east of UTC.
pub fn system_offset_minutes() -> i32 {
    system_offset().local_minus_utc() / 60
}

fn system_offset() -> FixedOffset {
    Local::now().offset().fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile(offset: i32) -> Profile {
        Profile {
            name: Some("Mia".to_string()),
            tz_offset_min: Some(offset),
            nudge_time: None,
        }
    }

    #[test]
    fn banner_uses_profile_offset() {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 10, 0, 0).unwrap();
        assert_eq!(profile(0).banner_at(now), "Good morning, Mia!");
        assert_eq!(profile(3 * 60).banner_at(now), "Good afternoon, Mia!");
        assert_eq!(profile(8 * 60).banner_at(now), "Good evening, Mia!");
    }

    #[test]
    fn banner_mentions_nudge_time_and_fallback_name() {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 20, 0, 0).unwrap();
        let p = Profile {
            name: None,
            tz_offset_min: Some(0),
            nudge_time: Some("07:30".to_string()),
        };
        assert_eq!(
            p.banner_at(now),
            "Good evening, friend! • Daily nudge at 07:30"
        );
    }

    #[test]
    fn out_of_range_offset_falls_back_instead_of_overflowing() {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 10, 0, 0).unwrap();
        let banner = profile(40_000_000).banner_at(now);
        assert!(banner.starts_with("Good "), "banner: {}", banner);
        assert!(banner.ends_with(", Mia!"), "banner: {}", banner);
        assert!(profile(i32::MIN).banner_at(now).ends_with(", Mia!"));
    }

    #[test]
    fn offsets_are_limited_to_one_day() {
        assert_eq!(validate_offset(0).unwrap(), 0);
        assert_eq!(validate_offset(-1439).unwrap(), -1439);
        assert_eq!(validate_offset(1439).unwrap(), 1439);
        assert!(matches!(
            validate_offset(1440),
            Err(NudgerError::InvalidOffset(1440))
        ));
        assert!(matches!(
            validate_offset(40_000_000),
            Err(NudgerError::InvalidOffset(_))
        ));
    }
}
