use anyhow::Result;
use dialoguer::Input;
use micronudger_core::config::NudgerConfig;
use micronudger_core::gate::Session;
use micronudger_core::profile::{Profile, validate_offset};
use micronudger_core::utils::parse_hhmm;
use owo_colors::OwoColorize;

use super::gate;

pub fn run(
    config: &NudgerConfig,
    name: Option<String>,
    nudge_time: Option<String>,
    tz_offset: Option<i32>,
) -> Result<()> {
    let store = config.data_store();
    let mut data = store.load();
    let mut session = Session::default();
    gate::open(&store, &mut data, &mut session)?;

    let interactive = name.is_none() && nudge_time.is_none() && tz_offset.is_none();
    let updated = if interactive {
        prompt_profile(&data.profile)?
    } else {
        apply_flags(&data.profile, name, nudge_time, tz_offset)?
    };

    data.profile = updated;
    store.save(&data)?;

    println!("{}", data.profile.banner().green());
    Ok(())
}

/// Merge command-line values into the current profile, validating what changed.
fn apply_flags(
    current: &Profile,
    name: Option<String>,
    nudge_time: Option<String>,
    tz_offset: Option<i32>,
) -> Result<Profile> {
    let mut profile = current.clone();
    if let Some(name) = name {
        profile.name = non_empty(name);
    }
    if let Some(time) = nudge_time {
        profile.nudge_time = non_empty(time);
    }
    if let Some(time) = &profile.nudge_time {
        parse_hhmm(time)?;
    }
    if let Some(offset) = tz_offset {
        profile.tz_offset_min = Some(validate_offset(offset)?);
    }
    Ok(profile)
}

fn prompt_profile(current: &Profile) -> Result<Profile> {
    let name: String = Input::new()
        .with_prompt("  Name")
        .with_initial_text(current.name.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let nudge_time: String = Input::new()
        .with_prompt("  Daily nudge time, HH:MM")
        .with_initial_text(current.nudge_time.clone().unwrap_or_default())
        .allow_empty(true)
        .validate_with(|input: &String| {
            if input.is_empty() || parse_hhmm(input).is_ok() {
                Ok(())
            } else {
                Err("Time must be HH:MM (24h).")
            }
        })
        .interact_text()?;

    let tz_offset: String = Input::new()
        .with_prompt("  Minutes east of UTC (blank for system)")
        .with_initial_text(
            current
                .tz_offset_min
                .map(|m| m.to_string())
                .unwrap_or_default(),
        )
        .allow_empty(true)
        .validate_with(|input: &String| {
            if input.is_empty() {
                return Ok(());
            }
            match input.parse::<i32>() {
                Ok(minutes) => validate_offset(minutes).map(|_| ()).map_err(|e| e.to_string()),
                Err(_) => Err("Enter a whole number of minutes.".to_string()),
            }
        })
        .interact_text()?;

    Ok(Profile {
        name: non_empty(name),
        nudge_time: non_empty(nudge_time),
        tz_offset_min: tz_offset.parse().ok(),
    })
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
