//! Error types for micronudger.

use thiserror::Error;

/// Errors that can occur in micronudger operations.
#[derive(Error, Debug)]
pub enum NudgerError {
    #[error("Please pick a built-in habit or add your own.")]
    NothingSelected,

    #[error("Event #{index} has an empty title")]
    EmptyTitle { index: usize },

    #[error(
        "No recently created events found. Generate your calendar first, then you can export a removal file."
    )]
    NoBatchAvailable,

    #[error("Time must be HH:MM (24h), got '{0}'")]
    InvalidTime(String),

    #[error("Please enter a habit title.")]
    MissingHabitTitle,

    #[error("No custom habit at position {0}")]
    HabitNotFound(usize),

    #[error("Please enter your name.")]
    MissingName,

    #[error("Timezone offset must be between -1439 and 1439 minutes, got {0}")]
    InvalidOffset(i32),

    #[error(transparent)]
    Passphrase(#[from] PassphraseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Reasons the passphrase gate refuses to open.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PassphraseError {
    #[error("Please enter a passphrase.")]
    Empty,

    #[error("Passphrases do not match.")]
    Mismatch,

    #[error("Incorrect passphrase.")]
    Incorrect,

    #[error("A passphrase is already set")]
    AlreadySet,

    #[error("No passphrase has been set yet")]
    NotSet,
}

impl From<serde_json::Error> for NudgerError {
    fn from(e: serde_json::Error) -> Self {
        NudgerError::Serialization(e.to_string())
    }
}

/// Result type alias for micronudger operations.
pub type NudgerResult<T> = Result<T, NudgerError>;
