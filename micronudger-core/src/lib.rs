//! Core of the micronudger habit coach.
//!
//! - `guardrail` and `coach` turn free text into a safety message or a canned tip
//! - `chat`, `gate`, `profile`, `store` and `transcript` keep the conversation local
//! - `ics` publishes habit batches and later cancels the most recent one

pub mod batch;
pub mod chat;
pub mod coach;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod gate;
pub mod guardrail;
pub mod habits;
pub mod ics;
pub mod profile;
pub mod store;
pub mod transcript;
pub mod utils;

pub use error::{NudgerError, NudgerResult, PassphraseError};
