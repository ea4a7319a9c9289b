//! Chat session and transcript types for the Aura client.
//!
//! A conversation is an ordered sequence of turns exchanged within a
//! server-issued chat session. Turns are immutable once appended and
//! insertion order is the only ordering guarantee.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Speaker role of a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One message in a conversation transcript, tagged by speaker role.
///
/// Turns carry no timestamps; position in the transcript is the only
/// ordering information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Server-assigned handle correlating a sequence of message exchanges.
///
/// Issued once per widget activation and held for the widget's lifetime;
/// a fresh widget value requests a fresh session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: String,
}

impl ChatSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

/// Notification published when the transcript grows.
///
/// Consumers use this to react to new turns (the CLI scrolls output);
/// the transcript itself never depends on anyone listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    TurnAppended { index: usize, role: TurnRole },
}
