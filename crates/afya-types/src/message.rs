//! Message entry types.
//!
//! Entries are append-only: within a session they are totally ordered by
//! non-decreasing timestamp and removed only when the whole session is
//! deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a message entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            // "bot" is the historical wire form written by earlier clients.
            "assistant" | "bot" => Ok(Sender::Assistant),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single message within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEntry {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl MessageEntry {
    /// Build an entry stamped with the current time.
    pub fn now(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build a user entry stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self::now(Sender::User, text)
    }

    /// Build an assistant entry stamped with the current time.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::now(Sender::Assistant, text)
    }
}
