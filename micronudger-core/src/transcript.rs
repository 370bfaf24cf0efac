//! Append-only conversation log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Coach,
}

/// One conversational entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachTurn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl CoachTurn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        CoachTurn {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered turns. Only `push` mutates it; entries are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<CoachTurn>);

impl Transcript {
    pub fn push(&mut self, turn: CoachTurn) {
        self.0.push(turn);
    }

    pub fn turns(&self) -> &[CoachTurn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&CoachTurn> {
        self.0.last()
    }
}
