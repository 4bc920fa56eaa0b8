//! Event and comment domain model.
//!
//! An [`Event`] is a multi-attendee gathering, distinct from a one-on-one
//! hangout. Its attendees and comments are owned by the event; users point at
//! events through [`UserEvent`](super::UserEvent) entries.

use super::collection::{Keyed, KeyedVec};
use super::user::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Event identifier as issued by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Comment identifier as issued by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A gathering users can attend and comment on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub attendees: KeyedVec<UserSummary>,
    #[serde(default)]
    pub comments: KeyedVec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

impl Event {
    /// Creates an event with no attendees, comments or tags.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EventId(id.into()),
            name: name.into(),
            description: String::new(),
            location: None,
            starts_at: None,
            tags: Vec::new(),
            attendees: KeyedVec::new(),
            comments: KeyedVec::new(),
            creator: None,
        }
    }

    /// Returns `true` if `email` is on the attendee list.
    #[must_use]
    pub fn is_attended_by(&self, email: &str) -> bool {
        self.attendees.contains_key(&email.to_string())
    }

    /// Takes the descriptive fields of `incoming`, keeping this event's
    /// attendees and comments.
    ///
    /// Attendance is paired with the user's event list, so it only changes
    /// through the attend and comment transitions.
    pub fn refresh_details(&mut self, incoming: &Self) {
        self.name.clone_from(&incoming.name);
        self.description.clone_from(&incoming.description);
        self.location.clone_from(&incoming.location);
        self.starts_at = incoming.starts_at;
        self.tags.clone_from(&incoming.tags);
        self.creator.clone_from(&incoming.creator);
    }
}

impl Keyed for Event {
    type Key = EventId;

    fn key(&self) -> &EventId {
        &self.id
    }
}

/// A comment posted on an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<UserSummary>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Creates a comment stamped with the current time.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: CommentId(id.into()),
            author: None,
            text: text.into(),
            created_at: Some(Utc::now()),
        }
    }

    /// Returns a human-readable string describing how long ago the comment was posted.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - 1 day or more: "Xd ago"
    ///
    /// Comments without a timestamp return an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use hangouts::domain::Comment;
    ///
    /// let mut comment = Comment::new("c1", "see you there");
    /// assert_eq!(comment.time_ago(), "just now");
    ///
    /// comment.created_at = Some(chrono::Utc::now() - chrono::Duration::seconds(300));
    /// assert_eq!(comment.time_ago(), "5m ago");
    /// ```
    #[must_use]
    pub fn time_ago(&self) -> String {
        let Some(created_at) = self.created_at else {
            return String::new();
        };
        let diff = Utc::now().timestamp() - created_at.timestamp();

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}

impl Keyed for Comment {
    type Key = CommentId;

    fn key(&self) -> &CommentId {
        &self.id
    }
}
