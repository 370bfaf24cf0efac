use anyhow::Result;
use dialoguer::{Confirm, Input};
use micronudger_core::chat::{exchange, onboard};
use micronudger_core::config::NudgerConfig;
use micronudger_core::gate::Session;
use micronudger_core::store::{DataStore, LocalData};
use micronudger_core::utils::parse_hhmm;
use owo_colors::OwoColorize;

use super::gate;
use crate::render::Render;

const HELP: &str = "/lock  lock the coach    /wipe  forget everything    /quit  leave";

/// Interactive chat session.
pub fn run(config: &NudgerConfig) -> Result<()> {
    let store = config.data_store();
    let mut data = store.load();
    let mut session = Session::default();

    gate::open(&store, &mut data, &mut session)?;
    start(&store, &mut data)?;
    println!("{}", HELP.dimmed());

    loop {
        let input: String = Input::new()
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()?;

        match input.trim() {
            "/quit" | "/exit" => return Ok(()),
            "/lock" => {
                session.lock();
                println!("{}", "Locked.".dimmed());
                gate::open(&store, &mut data, &mut session)?;
                start(&store, &mut data)?;
            }
            "/wipe" => {
                if confirm_wipe()? {
                    store.wipe()?;
                    println!("{}", "Wiped profile and history.".yellow());
                    return Ok(());
                }
            }
            text => {
                if let Some(ex) = exchange(&mut data, text) {
                    store.save(&data)?;
                    println!("{}", ex.coach.render());
                }
            }
        }
    }
}

/// One message, one reply.
pub fn say(config: &NudgerConfig, message: &str) -> Result<()> {
    let store = config.data_store();
    let mut data = store.load();
    let mut session = Session::default();

    gate::open(&store, &mut data, &mut session)?;
    if data.profile.name.is_none() {
        onboarding(&store, &mut data)?;
    }

    match exchange(&mut data, message) {
        Some(ex) => {
            store.save(&data)?;
            println!("{}", ex.coach.render());
        }
        None => anyhow::bail!("Nothing to say."),
    }
    Ok(())
}

pub fn history(config: &NudgerConfig) -> Result<()> {
    let store = config.data_store();
    let mut data = store.load();
    let mut session = Session::default();

    gate::open(&store, &mut data, &mut session)?;
    print_history(&data);
    Ok(())
}

/// After unlocking: onboard new users, otherwise replay the history.
fn start(store: &DataStore, data: &mut LocalData) -> Result<()> {
    if data.profile.name.is_none() {
        onboarding(store, data)?;
    } else {
        print_history(data);
    }
    println!("{}", data.profile.banner().bold());
    Ok(())
}

fn onboarding(store: &DataStore, data: &mut LocalData) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("  Your name")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("Please enter your name.")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let nudge_time: String = Input::new()
        .with_prompt("  Daily nudge time, HH:MM (skip)")
        .allow_empty(true)
        .validate_with(|input: &String| {
            if input.is_empty() || parse_hhmm(input).is_ok() {
                Ok(())
            } else {
                Err("Time must be HH:MM (24h).")
            }
        })
        .interact_text()?;

    let nudge_time = (!nudge_time.is_empty()).then_some(nudge_time);
    onboard(data, &name, nudge_time.as_deref(), None)?;
    store.save(data)?;

    let welcome_turns = data.history.len().saturating_sub(2);
    for turn in &data.history.turns()[welcome_turns..] {
        println!("{}", turn.render());
    }
    Ok(())
}

fn print_history(data: &LocalData) {
    for turn in data.history.turns() {
        println!("{}", turn.render());
    }
}

pub fn confirm_wipe() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Wipe profile and history?")
        .default(false)
        .interact()?)
}
