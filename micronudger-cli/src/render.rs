//! Terminal rendering for micronudger types.

use micronudger_core::habits::{BuiltinHabit, CustomHabit};
use micronudger_core::ics::DocumentSummary;
use micronudger_core::transcript::{CoachTurn, Speaker};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for CoachTurn {
    fn render(&self) -> String {
        match self.speaker {
            Speaker::User => format!("{} {}", "you ›".cyan(), self.text),
            Speaker::Coach => {
                let mut lines = self.text.lines();
                let first = lines.next().unwrap_or_default();
                let mut out = format!("{} {}", "coach ›".green(), first);
                for line in lines {
                    out.push_str(&format!("\n        {}", line));
                }
                out
            }
        }
    }
}

impl Render for BuiltinHabit {
    fn render(&self) -> String {
        format!(
            "{:<10} {} {}  {}",
            self.key.bold(),
            self.default_time.dimmed(),
            self.title,
            self.description.dimmed()
        )
    }
}

/// Numbered custom habits, or a hint when there are none.
pub fn render_habit_list(habits: &[CustomHabit]) -> String {
    if habits.is_empty() {
        return format!(
            "{}\n{}",
            "No custom habits yet".dimmed(),
            "Add a title, description and time with `micronudger habits add`.".dimmed()
        );
    }

    habits
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let desc = if h.description.is_empty() {
                String::new()
            } else {
                format!("  {}", h.description.dimmed())
            };
            format!("{:>3}. {} {}{}", i + 1, h.time.dimmed(), h.title, desc)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_document(summary: &DocumentSummary) -> String {
    let method = summary.method.as_deref().unwrap_or("?");
    let name = summary.calendar_name.as_deref().unwrap_or("(unnamed)");
    let mut lines = vec![format!("{} {}", method.bold(), name)];

    for event in &summary.events {
        let when = event
            .start
            .map(|s| s.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        lines.push(format!(
            "   {} {} {}",
            event.summary.as_deref().unwrap_or("(No title)"),
            when.dimmed(),
            event.timezone_id.as_deref().unwrap_or_default().dimmed()
        ));
    }

    lines.join("\n")
}
