mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use micronudger_core::config::NudgerConfig;
use owo_colors::OwoColorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "micronudger")]
#[command(about = "A local habit coach with calendar nudges you can remove again")]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the coach
    Chat,
    /// Send a single message and print the reply
    Say {
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Show the conversation so far
    History,
    /// Update your name, nudge time or timezone offset
    Settings {
        #[arg(long)]
        name: Option<String>,

        /// Daily nudge time (HH:MM)
        #[arg(long)]
        nudge_time: Option<String>,

        /// Minutes east of UTC
        #[arg(long, allow_hyphen_values = true)]
        tz_offset: Option<i32>,
    },
    /// Manage custom habits
    Habits {
        #[command(subcommand)]
        action: HabitAction,
    },
    /// Write a calendar file with the selected habits
    Generate {
        /// Built-in habit key, optionally with a time (e.g. "walk" or "walk@07:15")
        #[arg(long = "habit")]
        habits: Vec<String>,

        /// First day of the nudges (e.g. "2025-03-20" or "tomorrow")
        #[arg(short, long, default_value = "today")]
        start: String,

        /// Length of each event (e.g. "30m", "1h")
        #[arg(short, long)]
        duration: Option<String>,

        /// IANA timezone id (defaults to config)
        #[arg(long)]
        tz: Option<String>,

        #[arg(short, long)]
        calendar_name: Option<String>,

        /// Skip the 15-minute reminder
        #[arg(long)]
        no_alarm: bool,

        /// Create one-off events instead of daily ones
        #[arg(long)]
        no_repeat: bool,

        /// Print the calendar instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Write a removal file cancelling the last generated calendar
    Remove {
        #[arg(short, long)]
        calendar_name: Option<String>,

        /// Print the calendar instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// List the built-in habits
    Builtins,
    /// Delete profile, history, habits and the last batch
    Wipe {
        #[arg(short, long)]
        force: bool,
    },
    /// Show where micronudger keeps its files
    Config,
}

#[derive(Subcommand)]
pub enum HabitAction {
    List,
    Add {
        title: String,

        /// Time of day (HH:MM)
        #[arg(short, long, default_value = "09:00")]
        time: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    Edit {
        /// Position shown by `habits list`
        number: usize,

        #[arg(long, default_value = "")]
        title: String,

        #[arg(short, long)]
        time: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    Delete {
        number: usize,
    },
    Clear {
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not install logger: {e}");
    }

    if let Err(e) = run(cli.command) {
        eprintln!("{}", e.to_string().red());
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    let config = NudgerConfig::load()?;

    match command {
        Commands::Chat => commands::chat::run(&config),
        Commands::Say { message } => commands::chat::say(&config, &message.join(" ")),
        Commands::History => commands::chat::history(&config),
        Commands::Settings {
            name,
            nudge_time,
            tz_offset,
        } => commands::settings::run(&config, name, nudge_time, tz_offset),
        Commands::Habits { action } => commands::habits::run(&config, action),
        Commands::Generate {
            habits,
            start,
            duration,
            tz,
            calendar_name,
            no_alarm,
            no_repeat,
            stdout,
        } => commands::generate::run(
            &config,
            commands::generate::GenerateArgs {
                habits,
                start,
                duration,
                tz,
                calendar_name,
                add_alarm: config.add_alarm && !no_alarm,
                repeat_daily: config.repeat_daily && !no_repeat,
                stdout,
            },
        ),
        Commands::Remove {
            calendar_name,
            stdout,
        } => commands::remove::run(&config, calendar_name, stdout),
        Commands::Builtins => commands::habits::builtins(),
        Commands::Wipe { force } => commands::wipe::run(&config, force),
        Commands::Config => commands::config::run(&config),
    }
}
