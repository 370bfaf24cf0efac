use anyhow::Result;
use dialoguer::Confirm;
use micronudger_core::config::NudgerConfig;
use micronudger_core::habits::{BUILTIN_HABITS, CustomHabit};
use owo_colors::OwoColorize;

use crate::HabitAction;
use crate::render::{Render, render_habit_list};

pub fn run(config: &NudgerConfig, action: HabitAction) -> Result<()> {
    let book = config.habit_book();

    match action {
        HabitAction::List => {}
        HabitAction::Add {
            title,
            time,
            description,
        } => {
            let habit = CustomHabit::new(&title, &description, &time)?;
            println!("{}", format!("  Added: {}", habit.title).green());
            book.add(habit)?;
        }
        HabitAction::Edit {
            number,
            title,
            time,
            description,
        } => {
            book.edit(index(number)?, &title, &description, &time)?;
            println!("{}", format!("  Updated #{}", number).green());
        }
        HabitAction::Delete { number } => {
            let removed = book.delete(index(number)?)?;
            println!("{}", format!("  Deleted: {}", removed.title).yellow());
        }
        HabitAction::Clear { force } => {
            let confirmed = force
                || Confirm::new()
                    .with_prompt("Clear all custom habits?")
                    .default(false)
                    .interact()?;
            if !confirmed {
                return Ok(());
            }
            book.clear()?;
        }
    }

    println!("{}", render_habit_list(&book.list()));
    Ok(())
}

pub fn builtins() -> Result<()> {
    for habit in BUILTIN_HABITS {
        println!("{}", habit.render());
    }
    Ok(())
}

/// Habits are numbered from 1 on screen.
fn index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("Habit numbers start at 1"))
}
