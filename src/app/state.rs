//! Application state container.
//!
//! This module defines [`AppState`], the single aggregate every view reads
//! from and the reducer writes to.
//!
//! # Normalized Layout
//!
//! The logged-in [`User`] record owns all of the user's relationship lists
//! (chats, blocks, hangout requests, accepted and ongoing hangouts, events).
//! Views that want a flat slice use the accessor methods
//! ([`AppState::chats`], [`AppState::received_hangout_requests`], ...) instead
//! of reading a second copy, so a mutation can never update one copy and miss
//! the other.
//!
//! The shown event is likewise a pointer ([`AppState::current_event_id`]) into
//! [`AppState::all_events`], resolved by [`AppState::current_event`].
//!
//! # Example
//!
//! ```rust
//! use hangouts::app::AppState;
//! use hangouts::app::modes::{ActiveView, ResultsTab};
//!
//! let state = AppState::new();
//! assert_eq!(state.active_view, ActiveView::Results);
//! assert_eq!(state.results_switch, ResultsTab::Hangouts);
//! assert!(state.show_login);
//! assert!(state.chats().is_empty());
//! ```

use super::modes::{ActiveView, ResultsTab};
use crate::domain::{
    Chat, ChatId, ChatMessage, Event, EventId, HangoutId, HangoutRequest, KeyedVec,
    OngoingHangout, Profile, User, UserEvent, UserSummary,
};
use serde::{Deserialize, Serialize};

/// Central application state.
///
/// Mutated only by [`reduce`](crate::app::reduce), always on a private copy
/// owned by the [`Store`](crate::app::Store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    /// Top-level screen.
    pub active_view: ActiveView,

    /// Tab selected on the results screen.
    pub results_switch: ResultsTab,

    /// The logged-in user; empty until `SET_USER`.
    pub user: User,

    /// Directory of other users shown as hangout candidates.
    pub all_users: KeyedVec<Profile>,

    /// Every event the client knows about.
    pub all_events: KeyedVec<Event>,

    pub show_profile: bool,
    pub show_edit_profile_form: bool,
    pub show_event: bool,
    pub show_review: bool,
    pub show_new_event_form: bool,
    pub show_edit_event_form: bool,

    /// Profile shown in the profile modal.
    pub current_profile: Option<Profile>,

    /// Event shown in the event modal, by id.
    pub current_event_id: Option<EventId>,

    pub is_logged_in: bool,
    pub show_login: bool,
    pub show_chat: bool,

    /// Messages of the open chat.
    pub current_chat_messages: Vec<ChatMessage>,

    /// Id of the open chat, `ChatId(0)` when none has been opened.
    pub current_chat_id: ChatId,

    /// Last hangout that finished.
    pub hangout_id: HangoutId,

    /// Counterpart the review prompt asks about.
    pub user_to_review: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates the initial state: results screen, hangouts tab, login form
    /// shown, nobody logged in, every collection empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active_view: ActiveView::Results,
            results_switch: ResultsTab::Hangouts,
            user: User::default(),
            all_users: KeyedVec::new(),
            all_events: KeyedVec::new(),
            show_profile: false,
            show_edit_profile_form: false,
            show_event: false,
            show_review: false,
            show_new_event_form: false,
            show_edit_event_form: false,
            current_profile: None,
            current_event_id: None,
            is_logged_in: false,
            show_login: true,
            show_chat: false,
            current_chat_messages: Vec::new(),
            current_chat_id: ChatId(0),
            hangout_id: HangoutId::default(),
            user_to_review: String::new(),
        }
    }

    /// The user's chats.
    #[must_use]
    pub fn chats(&self) -> &KeyedVec<Chat> {
        &self.user.chats
    }

    /// Emails the user has blocked.
    #[must_use]
    pub fn blocked_users(&self) -> &[String] {
        &self.user.blocked_users
    }

    /// Emails of users who blocked the user.
    #[must_use]
    pub fn blocked_by_users(&self) -> &[String] {
        &self.user.blocked_by_users
    }

    /// Hangout requests the user sent.
    #[must_use]
    pub fn sent_hangout_requests(&self) -> &KeyedVec<HangoutRequest> {
        &self.user.sent_hangout_requests
    }

    /// Hangout requests waiting for the user's answer.
    #[must_use]
    pub fn received_hangout_requests(&self) -> &KeyedVec<HangoutRequest> {
        &self.user.received_hangout_requests
    }

    /// Counterparts of agreed hangouts that have not started.
    #[must_use]
    pub fn accepted_hangouts(&self) -> &KeyedVec<UserSummary> {
        &self.user.accepted_hangouts
    }

    /// Hangouts in progress.
    #[must_use]
    pub fn ongoing_hangouts(&self) -> &KeyedVec<OngoingHangout> {
        &self.user.ongoing_hangouts
    }

    /// Events the user attends or created.
    #[must_use]
    pub fn user_events(&self) -> &KeyedVec<UserEvent> {
        &self.user.events
    }

    /// The event shown in the event modal, if any.
    #[must_use]
    pub fn current_event(&self) -> Option<&Event> {
        self.current_event_id
            .as_ref()
            .and_then(|id| self.all_events.get(id))
    }

    /// Returns `true` if the user is on the attendee list of `event_id`.
    #[must_use]
    pub fn is_attending(&self, event_id: &EventId) -> bool {
        self.all_events
            .get(event_id)
            .is_some_and(|event| event.is_attended_by(&self.user.email))
    }

    /// Lists the hangout stages `email` currently occupies.
    ///
    /// A counterpart should never be in more than one active stage at once.
    #[must_use]
    pub fn hangout_stages(&self, email: &str) -> Vec<&'static str> {
        let key = email.to_string();
        let mut stages = Vec::new();
        if self.user.received_hangout_requests.contains_key(&key) {
            stages.push("received");
        }
        if self.user.sent_hangout_requests.contains_key(&key) {
            stages.push("sent");
        }
        if self.user.accepted_hangouts.contains_key(&key) {
            stages.push("accepted");
        }
        if self.user.ongoing_hangouts.iter().any(|h| h.involves(email)) {
            stages.push("ongoing");
        }
        stages
    }

    /// Returns the durable part of the state, with transient UI cleared.
    ///
    /// Modals, forms, the open chat and the review prompt do not survive a
    /// restart; screen selection and all domain data do.
    #[must_use]
    pub fn persisted(&self) -> Self {
        Self {
            show_profile: false,
            show_edit_profile_form: false,
            show_event: false,
            show_review: false,
            show_new_event_form: false,
            show_edit_event_form: false,
            current_profile: None,
            current_event_id: None,
            show_chat: false,
            current_chat_messages: Vec::new(),
            ..self.clone()
        }
    }
}
