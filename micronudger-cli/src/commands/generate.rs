use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use micronudger_core::batch::{BatchStore, MemoryBatchStore};
use micronudger_core::config::NudgerConfig;
use micronudger_core::event::CalendarEventSpec;
use micronudger_core::habits::{BuiltinSelection, expand_events, find_builtin};
use micronudger_core::ics::{BatchOptions, GeneratedBatch, generate, inspect};
use micronudger_core::utils::create_filename;
use owo_colors::OwoColorize;

use super::{calendar_path, write_calendar};
use crate::render::render_document;

pub struct GenerateArgs {
    pub habits: Vec<String>,
    pub start: String,
    pub duration: Option<String>,
    pub tz: Option<String>,
    pub calendar_name: Option<String>,
    pub add_alarm: bool,
    pub repeat_daily: bool,
    pub stdout: bool,
}

pub fn run(config: &NudgerConfig, args: GenerateArgs) -> Result<()> {
    let start_date = parse_start_date(&args.start)?;
    let duration_minutes = match &args.duration {
        Some(d) => parse_duration_minutes(d)?,
        None => config.duration_minutes,
    };

    let builtins = args
        .habits
        .iter()
        .map(|h| parse_selection(h))
        .collect::<Result<Vec<_>>>()?;
    let customs = config.habit_book().list();

    let events = expand_events(start_date, duration_minutes, &builtins, &customs)?;

    let calendar_name = args
        .calendar_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| config.calendar_name.clone());
    let options = BatchOptions {
        calendar_name: calendar_name.clone(),
        timezone_id: args.tz.unwrap_or_else(|| config.timezone.clone()),
        add_alarm: args.add_alarm,
        repeat_daily: args.repeat_daily,
    };

    let (batch, path) = publish(config, &events, &options, args.stdout)?;
    let Some(path) = path else {
        return Ok(());
    };

    println!(
        "{}",
        format!("  Created {} events: {}", batch.records.len(), path.display()).green()
    );
    println!("{}", render_document(&inspect(&batch.document)?));
    println!(
        "{}",
        format!(
            "  Tip: import it as a NEW calendar called “{}” so removal is easy later.",
            calendar_name
        )
        .dimmed()
    );
    Ok(())
}

/// Build the batch, deliver the document, then record the batch as the last one.
///
/// The stored slot only changes once the document is out, so a failed write
/// keeps the previous batch cancellable. With `to_stdout` no file is written.
fn publish(
    config: &NudgerConfig,
    events: &[CalendarEventSpec],
    options: &BatchOptions,
    to_stdout: bool,
) -> Result<(GeneratedBatch, Option<PathBuf>)> {
    let target = if to_stdout {
        None
    } else {
        Some(calendar_path(config, &create_filename(&options.calendar_name))?)
    };

    let mut staged = MemoryBatchStore::default();
    let batch = generate(events, options, &mut staged)?;

    match &target {
        Some(path) => write_calendar(path, &batch.document)?,
        None => print!("{}", batch.document),
    }

    config.batch_store().set(&batch.records)?;
    Ok((batch, target))
}

/// `walk` or `walk@07:15`.
fn parse_selection(input: &str) -> Result<BuiltinSelection> {
    let (key, time) = match input.split_once('@') {
        Some((key, time)) => (key, Some(time.to_string())),
        None => (input, None),
    };

    let habit = find_builtin(key).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown habit '{}'. Run `micronudger builtins` to see the list.",
            key
        )
    })?;

    Ok(BuiltinSelection { habit, time })
}

fn parse_start_date(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    fuzzydate::parse(input)
        .map(|dt| dt.date())
        .map_err(|_| anyhow::anyhow!("Could not parse start date: \"{}\"", input))
}

fn parse_duration_minutes(input: &str) -> Result<u32> {
    let std_dur = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    let minutes = u32::try_from(std_dur.as_secs() / 60).context("Duration too large")?;
    if minutes == 0 {
        anyhow::bail!("Duration must be at least one minute");
    }
    Ok(minutes)
}
