use anyhow::Result;
use micronudger_core::config::NudgerConfig;
use micronudger_core::ics::{build_cancellation, inspect};
use micronudger_core::utils::removal_filename;
use owo_colors::OwoColorize;

use super::{calendar_path, write_calendar};
use crate::render::render_document;

pub fn run(config: &NudgerConfig, calendar_name: Option<String>, stdout: bool) -> Result<()> {
    let calendar_name = calendar_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| config.calendar_name.clone());

    let batch_store = config.batch_store();
    let document = build_cancellation(&calendar_name, &batch_store)?;

    if stdout {
        print!("{}", document);
        return Ok(());
    }

    let path = calendar_path(config, &removal_filename(&calendar_name))?;
    write_calendar(&path, &document)?;
    println!("{}", render_document(&inspect(&document)?));
    println!("{}", format!("  Removal file: {}", path.display()).green());
    Ok(())
}
