//! Chat and chat message types.

use super::collection::Keyed;
use super::user::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric chat identifier. `0` means no chat is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub u64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A conversation the logged-in user takes part in.
///
/// `participants` lists the other members; for a chat created by accepting a
/// hangout request the first participant is the requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub chat_id: ChatId,
    #[serde(default)]
    pub participants: Vec<UserSummary>,
}

impl Chat {
    pub fn new(chat_id: ChatId, participants: Vec<UserSummary>) -> Self {
        Self {
            chat_id,
            participants,
        }
    }
}

impl Keyed for Chat {
    type Key = ChatId;

    fn key(&self) -> &ChatId {
        &self.chat_id
    }
}

/// A single message in the open chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: None,
            sender: Some(sender.into()),
            text: text.into(),
            created_at: Some(Utc::now()),
        }
    }
}
