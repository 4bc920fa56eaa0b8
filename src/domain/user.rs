//! User model and the lightweight user shapes embedded in other entities.
//!
//! A [`User`] is the logged-in account together with every relationship list
//! the client tracks for it. Other users only ever appear as a
//! [`UserSummary`]: inside chats, hangout requests, accepted hangouts and
//! event attendee lists.

use super::chat::Chat;
use super::collection::{Keyed, KeyedVec};
use super::event::EventId;
use super::hangout::OngoingHangout;
use serde::{Deserialize, Serialize};

/// The public face of a user as other users see it.
///
/// Keyed by email, which is how the backend addresses counterparts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

impl UserSummary {
    /// Creates a summary with no profile photo.
    pub fn new(email: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            profile_photo: None,
        }
    }
}

impl Keyed for UserSummary {
    type Key = String;

    fn key(&self) -> &String {
        &self.email
    }
}

/// A hangout request is addressed by the counterpart's summary.
pub type HangoutRequest = UserSummary;

/// Membership of the user in an event, as stored on the user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEvent {
    pub event_id: EventId,
    #[serde(default)]
    pub is_creator: bool,
}

impl Keyed for UserEvent {
    type Key = EventId;

    fn key(&self) -> &EventId {
        &self.event_id
    }
}

/// A user in the directory of other users (`allUsers`).
///
/// Carries enough profile data for the results list and the profile modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub exp: u32,
    #[serde(default)]
    pub lvl: u32,
}

impl Profile {
    /// Creates a profile with only identity fields set.
    pub fn new(email: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: String::new(),
            profile_photo: None,
            interests: Vec::new(),
            exp: 0,
            lvl: 0,
        }
    }

    /// Returns the summary other views embed for this user.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            profile_photo: self.profile_photo.clone(),
        }
    }
}

impl Keyed for Profile {
    type Key = String;

    fn key(&self) -> &String {
        &self.email
    }
}

/// The logged-in user and every relationship list tracked for it.
///
/// This record is the single source of truth for the user's chats, blocks,
/// hangout requests and events; the state exposes the list views as accessors
/// over these fields rather than as copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub exp: u32,
    #[serde(default)]
    pub lvl: u32,

    #[serde(default)]
    pub sent_hangout_requests: KeyedVec<HangoutRequest>,
    #[serde(default)]
    pub received_hangout_requests: KeyedVec<HangoutRequest>,
    #[serde(default)]
    pub accepted_hangouts: KeyedVec<UserSummary>,
    #[serde(default)]
    pub ongoing_hangouts: KeyedVec<OngoingHangout>,
    #[serde(default)]
    pub blocked_users: Vec<String>,
    #[serde(default)]
    pub blocked_by_users: Vec<String>,
    #[serde(default)]
    pub chats: KeyedVec<Chat>,
    #[serde(default)]
    pub events: KeyedVec<UserEvent>,
}

impl User {
    /// Returns the summary other users see for this account.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            profile_photo: self.profile_photo.clone(),
        }
    }

    /// Returns `true` if this user has blocked, or is blocked by, `email`.
    #[must_use]
    pub fn is_blocked(&self, email: &str) -> bool {
        self.blocked_users.iter().any(|e| e == email)
            || self.blocked_by_users.iter().any(|e| e == email)
    }
}

/// Profile edit payload.
///
/// Relationship lists are optional: an edit that leaves them out keeps the
/// lists of the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub exp: u32,
    #[serde(default)]
    pub lvl: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_hangout_requests: Option<KeyedVec<HangoutRequest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_hangout_requests: Option<KeyedVec<HangoutRequest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_hangouts: Option<KeyedVec<UserSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ongoing_hangouts: Option<KeyedVec<OngoingHangout>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_users: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_by_users: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chats: Option<KeyedVec<Chat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<KeyedVec<UserEvent>>,
}

impl UserUpdate {
    /// Builds the updated user, taking missing relationship lists from `current`.
    #[must_use]
    pub fn apply_to(&self, current: &User) -> User {
        User {
            id: self.id.clone().or_else(|| current.id.clone()),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            profile_photo: self.profile_photo.clone(),
            interests: self.interests.clone(),
            exp: self.exp,
            lvl: self.lvl,
            sent_hangout_requests: self
                .sent_hangout_requests
                .clone()
                .unwrap_or_else(|| current.sent_hangout_requests.clone()),
            received_hangout_requests: self
                .received_hangout_requests
                .clone()
                .unwrap_or_else(|| current.received_hangout_requests.clone()),
            accepted_hangouts: self
                .accepted_hangouts
                .clone()
                .unwrap_or_else(|| current.accepted_hangouts.clone()),
            ongoing_hangouts: self
                .ongoing_hangouts
                .clone()
                .unwrap_or_else(|| current.ongoing_hangouts.clone()),
            blocked_users: self
                .blocked_users
                .clone()
                .unwrap_or_else(|| current.blocked_users.clone()),
            blocked_by_users: self
                .blocked_by_users
                .clone()
                .unwrap_or_else(|| current.blocked_by_users.clone()),
            chats: self.chats.clone().unwrap_or_else(|| current.chats.clone()),
            events: self.events.clone().unwrap_or_else(|| current.events.clone()),
        }
    }
}

/// Registration payload sent to the backend by the signup form.
///
/// The confirmation password never leaves the form; the PIN is already
/// coerced to an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub password: String,
    pub pin: u32,
}
