//! Configuration at ~/.config/micronudger/config.toml

use std::path::{Path, PathBuf};

use ::config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::batch::FileBatchStore;
use crate::constants::{DEFAULT_CALENDAR_NAME, DEFAULT_DURATION_MINUTES};
use crate::error::{NudgerError, NudgerResult};
use crate::habits::HabitBook;
use crate::store::DataStore;

static DEFAULT_DATA_DIR: &str = "~/.micronudger";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

fn default_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NudgerConfig {
    /// Where profile, history, habits and the last batch are kept
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    /// IANA timezone id written into DTSTART/DTEND
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_duration")]
    pub duration_minutes: u32,

    #[serde(default = "default_true")]
    pub add_alarm: bool,

    #[serde(default = "default_true")]
    pub repeat_daily: bool,

    /// Where .ics files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for NudgerConfig {
    fn default() -> Self {
        NudgerConfig {
            data_dir: default_data_dir(),
            calendar_name: default_calendar_name(),
            timezone: default_timezone(),
            duration_minutes: default_duration(),
            add_alarm: true,
            repeat_daily: true,
            output_dir: default_output_dir(),
        }
    }
}

impl NudgerConfig {
    pub fn config_path() -> NudgerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| NudgerError::Config("Could not determine config directory".into()))?
            .join("micronudger");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file first if none exists.
    pub fn load() -> NudgerResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::create_default_config(&path)?;
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> NudgerResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| NudgerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| NudgerError::Config(e.to_string()))
    }

    pub fn create_default_config(path: &Path) -> NudgerResult<()> {
        let contents = format!(
            "\
# micronudger configuration

# Where your profile, chat history and habits live:
# data_dir = \"{}\"

# Calendar defaults:
# calendar_name = \"{}\"
# timezone = \"America/New_York\"
# duration_minutes = {}
# add_alarm = true
# repeat_daily = true

# Where .ics files are written:
# output_dir = \".\"
",
            DEFAULT_DATA_DIR, DEFAULT_CALENDAR_NAME, DEFAULT_DURATION_MINUTES
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NudgerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| NudgerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        expand(&self.output_dir)
    }

    pub fn data_store(&self) -> DataStore {
        DataStore::new(self.data_path())
    }

    pub fn habit_book(&self) -> HabitBook {
        HabitBook::new(self.data_store().habits_path())
    }

    pub fn batch_store(&self) -> FileBatchStore {
        FileBatchStore::new(self.data_store().last_batch_path())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
