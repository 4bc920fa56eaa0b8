//! Actions: the closed set of state transitions the store accepts.
//!
//! This module defines the [`Action`] type. Views and network handlers build
//! actions and hand them to the [`Store`](crate::app::Store), which runs them
//! through the reducer in [`handler`](crate::app::handler).
//!
//! # Wire Format
//!
//! Actions travel as flat JSON records: a `type` tag in `SCREAMING_SNAKE_CASE`
//! followed by camelCase payload fields.
//!
//! ```json
//! { "type": "ACCEPT_REQUEST", "fromUserEmail": "a@email.com",
//!   "newChat": { "chat_id": 3, "participants": [{ "email": "a@email.com" }] } }
//! ```
//!
//! [`Action::parse`] is the boundary: an unknown `type` is reported as
//! `Ok(None)` so the caller can leave state untouched, while a known `type`
//! with a malformed payload is a [`HangoutError::Validation`].
//!
//! # Example
//!
//! ```rust
//! use hangouts::app::Action;
//! use hangouts::app::modes::ResultsTab;
//!
//! let action = Action::parse(r#"{"type":"TOGGLE_RESULTS_VIEW","activeView":"events"}"#)?;
//! assert_eq!(action, Some(Action::ToggleResultsView { active_view: ResultsTab::Events }));
//!
//! assert_eq!(Action::parse(r#"{"type":"SOMETHING_ELSE"}"#)?, None);
//! # Ok::<(), hangouts::HangoutError>(())
//! ```

use super::modes::{ActiveView, ResultsTab};
use crate::domain::error::{HangoutError, Result};
use crate::domain::{
    Chat, ChatId, ChatMessage, Comment, CommentId, Event, EventId, HangoutId, KeyedVec, Profile,
    User, UserSummary, UserUpdate,
};
use serde::{Deserialize, Serialize};

/// A state transition request.
///
/// One variant per action type the reducer understands. Variants without a
/// payload act on the state alone (for example [`Action::AttendEvent`] uses the
/// logged-in user and the currently shown event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Switches the top-level screen.
    SetActiveView { active_view: ActiveView },
    /// Replaces the directory of other users.
    SetAllUsers { all_users: KeyedVec<Profile> },
    /// Drops one user from the directory.
    RemoveUser { user_email: String },
    /// Logs a user in with their full record.
    SetUser { user: User },
    /// Flips between the login and signup forms.
    ToggleAuth,
    /// Selects the results tab.
    ToggleResultsView { active_view: ResultsTab },
    /// Opens another user's profile.
    ShowProfile { profile: Profile },
    /// Opens the edit form for the user's own profile.
    ShowEditProfileForm,
    /// Saves profile edits.
    UpdateProfile { updated_user: UserUpdate },
    /// Closes the profile modal.
    CloseProfile,
    /// Replaces the user's chats.
    SetChats { chats: KeyedVec<Chat> },
    /// Removes a chat; closes it if it is open.
    RemoveUserChat { chat_id: ChatId },
    /// Opens a chat with its message history.
    ShowChat {
        messages: Vec<ChatMessage>,
        chat_id: ChatId,
    },
    /// Closes the open chat.
    CloseChat,
    /// Appends a message to the open chat.
    CreateMessage { message: ChatMessage },
    /// Replaces the event list.
    GetEvents { events: KeyedVec<Event> },
    /// Adds a newly created event.
    CreateEvent { new_event: Event },
    /// Opens the new-event form.
    ShowNewEventForm,
    /// Closes the new-event form.
    CloseNewEventForm,
    /// Opens the edit-event form.
    ShowEditEventForm,
    /// Closes the edit-event form.
    CloseEditEventForm,
    /// Replaces an event with its edited version.
    UpdateEvent {
        event_id: EventId,
        updated_event: Event,
    },
    /// Deletes an event.
    ///
    /// `event_id` is authoritative. Older clients also send `id`; when present
    /// it must name the same event.
    DeleteEvent {
        event_id: EventId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<EventId>,
    },
    /// Opens an event's detail modal.
    ShowEvent { event: Event },
    /// Closes the event modal.
    CloseEvent,
    /// Adds the user to the shown event's attendees.
    AttendEvent,
    /// Removes the user from the shown event's attendees.
    UnattendEvent,
    /// Posts a comment on the shown event.
    CreateComment { new_comment: Comment },
    /// Deletes a comment from the shown event.
    DeleteComment { comment_id: CommentId },
    /// Records an outgoing hangout request.
    SendRequest { to_user: UserSummary },
    /// Accepts an incoming hangout request and opens its chat.
    AcceptRequest {
        from_user_email: String,
        new_chat: Chat,
    },
    /// Declines an incoming hangout request.
    DeclineRequest { from_user_email: String },
    /// Blocks a user and drops the chat with them.
    BlockUser {
        blocked_user_email: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        chat_id: Option<ChatId>,
    },
    /// Unblocks a user.
    UnblockUser { blocked_user_email: String },
    /// Sets the user's experience after a review.
    AddExp { exp: u32 },
    /// Moves an accepted hangout to the ongoing list.
    ///
    /// `participants[1]` is the counterpart.
    StartHangout {
        hangout_id: HangoutId,
        participants: Vec<UserSummary>,
    },
    /// Ends an ongoing hangout and prompts for a review.
    FinishHangout {
        hangout_id: HangoutId,
        user_to_review: String,
    },
}

impl Action {
    /// Every `type` tag the reducer understands.
    pub const KINDS: [&'static str; 37] = [
        "SET_ACTIVE_VIEW",
        "SET_ALL_USERS",
        "REMOVE_USER",
        "SET_USER",
        "TOGGLE_AUTH",
        "TOGGLE_RESULTS_VIEW",
        "SHOW_PROFILE",
        "SHOW_EDIT_PROFILE_FORM",
        "UPDATE_PROFILE",
        "CLOSE_PROFILE",
        "SET_CHATS",
        "REMOVE_USER_CHAT",
        "SHOW_CHAT",
        "CLOSE_CHAT",
        "CREATE_MESSAGE",
        "GET_EVENTS",
        "CREATE_EVENT",
        "SHOW_NEW_EVENT_FORM",
        "CLOSE_NEW_EVENT_FORM",
        "SHOW_EDIT_EVENT_FORM",
        "CLOSE_EDIT_EVENT_FORM",
        "UPDATE_EVENT",
        "DELETE_EVENT",
        "SHOW_EVENT",
        "CLOSE_EVENT",
        "ATTEND_EVENT",
        "UNATTEND_EVENT",
        "CREATE_COMMENT",
        "DELETE_COMMENT",
        "SEND_REQUEST",
        "ACCEPT_REQUEST",
        "DECLINE_REQUEST",
        "BLOCK_USER",
        "UNBLOCK_USER",
        "ADD_EXP",
        "START_HANGOUT",
        "FINISH_HANGOUT",
    ];

    /// Parses one action record at the dispatch boundary.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(action))` for a well-formed record of a known type
    /// - `Ok(None)` for a record whose `type` the reducer does not handle
    ///
    /// # Errors
    ///
    /// Returns [`HangoutError::Validation`] if the input is not a JSON object
    /// with a string `type`, or if the payload of a known type is malformed.
    pub fn parse(json: &str) -> Result<Option<Self>> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| HangoutError::Validation(format!("action is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Same as [`Action::parse`] for an already decoded JSON value.
    ///
    /// # Errors
    ///
    /// See [`Action::parse`].
    pub fn from_value(value: serde_json::Value) -> Result<Option<Self>> {
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| HangoutError::Validation("action has no string `type`".to_string()))?;

        if !Self::KINDS.contains(&kind) {
            tracing::debug!(action_type = %kind, "ignoring unknown action type");
            return Ok(None);
        }

        let kind = kind.to_string();
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| HangoutError::Validation(format!("malformed {kind} payload: {e}")))
    }

    /// Returns the wire `type` tag of this action.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SetActiveView { .. } => "SET_ACTIVE_VIEW",
            Self::SetAllUsers { .. } => "SET_ALL_USERS",
            Self::RemoveUser { .. } => "REMOVE_USER",
            Self::SetUser { .. } => "SET_USER",
            Self::ToggleAuth => "TOGGLE_AUTH",
            Self::ToggleResultsView { .. } => "TOGGLE_RESULTS_VIEW",
            Self::ShowProfile { .. } => "SHOW_PROFILE",
            Self::ShowEditProfileForm => "SHOW_EDIT_PROFILE_FORM",
            Self::UpdateProfile { .. } => "UPDATE_PROFILE",
            Self::CloseProfile => "CLOSE_PROFILE",
            Self::SetChats { .. } => "SET_CHATS",
            Self::RemoveUserChat { .. } => "REMOVE_USER_CHAT",
            Self::ShowChat { .. } => "SHOW_CHAT",
            Self::CloseChat => "CLOSE_CHAT",
            Self::CreateMessage { .. } => "CREATE_MESSAGE",
            Self::GetEvents { .. } => "GET_EVENTS",
            Self::CreateEvent { .. } => "CREATE_EVENT",
            Self::ShowNewEventForm => "SHOW_NEW_EVENT_FORM",
            Self::CloseNewEventForm => "CLOSE_NEW_EVENT_FORM",
            Self::ShowEditEventForm => "SHOW_EDIT_EVENT_FORM",
            Self::CloseEditEventForm => "CLOSE_EDIT_EVENT_FORM",
            Self::UpdateEvent { .. } => "UPDATE_EVENT",
            Self::DeleteEvent { .. } => "DELETE_EVENT",
            Self::ShowEvent { .. } => "SHOW_EVENT",
            Self::CloseEvent => "CLOSE_EVENT",
            Self::AttendEvent => "ATTEND_EVENT",
            Self::UnattendEvent => "UNATTEND_EVENT",
            Self::CreateComment { .. } => "CREATE_COMMENT",
            Self::DeleteComment { .. } => "DELETE_COMMENT",
            Self::SendRequest { .. } => "SEND_REQUEST",
            Self::AcceptRequest { .. } => "ACCEPT_REQUEST",
            Self::DeclineRequest { .. } => "DECLINE_REQUEST",
            Self::BlockUser { .. } => "BLOCK_USER",
            Self::UnblockUser { .. } => "UNBLOCK_USER",
            Self::AddExp { .. } => "ADD_EXP",
            Self::StartHangout { .. } => "START_HANGOUT",
            Self::FinishHangout { .. } => "FINISH_HANGOUT",
        }
    }

    /// Checks payload constraints the type system cannot express.
    ///
    /// Runs before the transition, so a rejected action never touches state.
    ///
    /// # Errors
    ///
    /// Returns [`HangoutError::Validation`] describing the first violated
    /// constraint.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::SetUser { user } if user.email.is_empty() => {
                invalid("SET_USER requires a user email")
            }
            Self::RemoveUser { user_email: email }
            | Self::DeclineRequest {
                from_user_email: email,
            }
            | Self::UnblockUser {
                blocked_user_email: email,
            }
            | Self::BlockUser {
                blocked_user_email: email,
                ..
            } if email.is_empty() => invalid(&format!("{} requires a user email", self.kind())),
            Self::SendRequest { to_user } if to_user.email.is_empty() => {
                invalid("SEND_REQUEST requires a recipient email")
            }
            Self::AcceptRequest {
                from_user_email,
                new_chat,
            } => {
                if from_user_email.is_empty() {
                    return invalid("ACCEPT_REQUEST requires the requester email");
                }
                if new_chat.participants.is_empty() {
                    return invalid("ACCEPT_REQUEST chat has no participants");
                }
                Ok(())
            }
            Self::CreateEvent { new_event } if new_event.id.0.is_empty() => {
                invalid("CREATE_EVENT requires an event id")
            }
            Self::ShowEvent { event } if event.id.0.is_empty() => {
                invalid("SHOW_EVENT requires an event id")
            }
            Self::UpdateEvent {
                event_id,
                updated_event,
            } if &updated_event.id != event_id => invalid(&format!(
                "UPDATE_EVENT targets {event_id} but carries event {}",
                updated_event.id
            )),
            Self::DeleteEvent {
                event_id,
                id: Some(legacy),
            } if legacy != event_id => invalid(&format!(
                "DELETE_EVENT ids disagree: eventId {event_id}, id {legacy}"
            )),
            Self::CreateComment { new_comment } if new_comment.id.0.is_empty() => {
                invalid("CREATE_COMMENT requires a comment id")
            }
            Self::StartHangout {
                hangout_id,
                participants,
            } => {
                if hangout_id.is_empty() {
                    return invalid("START_HANGOUT requires a hangout id");
                }
                if participants.len() < 2 {
                    return invalid(&format!(
                        "START_HANGOUT needs two participants, got {}",
                        participants.len()
                    ));
                }
                Ok(())
            }
            Self::FinishHangout { hangout_id, .. } if hangout_id.is_empty() => {
                invalid("FINISH_HANGOUT requires a hangout id")
            }
            _ => Ok(()),
        }
    }
}

fn invalid(message: &str) -> Result<()> {
    Err(HangoutError::Validation(message.to_string()))
}
