use anyhow::Result;
use micronudger_core::config::NudgerConfig;
use owo_colors::OwoColorize;

use super::chat::confirm_wipe;

pub fn run(config: &NudgerConfig, force: bool) -> Result<()> {
    if !force && !confirm_wipe()? {
        return Ok(());
    }

    config.data_store().wipe()?;
    println!("{}", "Wiped profile, history, habits and the last calendar batch.".yellow());
    Ok(())
}
