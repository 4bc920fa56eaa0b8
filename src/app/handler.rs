//! The reducer: folds one [`Action`] into the [`AppState`].
//!
//! [`reduce`] is the only code that writes application state. It is
//! synchronous and deterministic, performs no I/O, and reports every failure
//! as an error instead of panicking. The [`Store`](crate::app::Store) runs it
//! on a private copy of the state, so a rejected action leaves the visible
//! state untouched even if the transition had started.
//!
//! # Transition Groups
//!
//! - **Screens and modals**: `SET_ACTIVE_VIEW`, `TOGGLE_AUTH`, `TOGGLE_RESULTS_VIEW`,
//!   the `SHOW_*`/`CLOSE_*` pairs
//! - **Session**: `SET_USER`, `UPDATE_PROFILE`, `ADD_EXP`
//! - **Directory**: `SET_ALL_USERS`, `REMOVE_USER`, `BLOCK_USER`, `UNBLOCK_USER`
//! - **Chats**: `SET_CHATS`, `REMOVE_USER_CHAT`, `SHOW_CHAT`, `CREATE_MESSAGE`
//! - **Events**: `GET_EVENTS`, `CREATE_EVENT`, `UPDATE_EVENT`, `DELETE_EVENT`,
//!   `ATTEND_EVENT`, `UNATTEND_EVENT`, `CREATE_COMMENT`, `DELETE_COMMENT`
//! - **Hangout lifecycle**: `SEND_REQUEST`, `ACCEPT_REQUEST`, `DECLINE_REQUEST`,
//!   `START_HANGOUT`, `FINISH_HANGOUT`
//!
//! # Example
//!
//! ```rust
//! use hangouts::app::{reduce, Action, AppState};
//!
//! let mut state = AppState::new();
//! let changed = reduce(&mut state, &Action::ToggleAuth)?;
//! assert!(changed);
//! assert!(!state.show_login);
//! # Ok::<(), hangouts::HangoutError>(())
//! ```

use crate::app::modes::{ActiveView, ResultsTab};
use crate::app::{Action, AppState};
use crate::domain::error::{HangoutError, Result};
use crate::domain::{Event, EventId, OngoingHangout, UserEvent};

/// Applies `action` to `state`.
///
/// The payload is validated first ([`Action::validate`]); lookups of the
/// entities the action targets happen before any field is written.
///
/// # Returns
///
/// `true` if the state changed and subscribed views should re-render.
///
/// # Errors
///
/// - [`HangoutError::Validation`] for malformed payloads and invariant
///   violations (duplicate ids, attending twice, no logged-in user)
/// - [`HangoutError::NotFound`] when the targeted event, comment, request or
///   hangout does not exist
///
/// On error `state` may be partially written; callers that need the previous
/// state must keep their own copy, as the store does.
#[allow(clippy::too_many_lines)]
pub fn reduce(state: &mut AppState, action: &Action) -> Result<bool> {
    let _span = tracing::debug_span!("reduce", action_type = action.kind()).entered();

    action.validate()?;

    match action {
        Action::SetActiveView { active_view } => {
            Ok(assign(&mut state.active_view, active_view.clone()))
        }
        Action::SetAllUsers { all_users } => {
            Ok(assign(&mut state.all_users, all_users.clone()))
        }
        Action::RemoveUser { user_email } => Ok(state.all_users.remove(user_email).is_some()),
        Action::SetUser { user } => {
            tracing::debug!(
                email = %user.email,
                chats = user.chats.len(),
                received_requests = user.received_hangout_requests.len(),
                accepted = user.accepted_hangouts.len(),
                ongoing = user.ongoing_hangouts.len(),
                "user logged in"
            );
            state.user = user.clone();
            state.is_logged_in = true;
            Ok(true)
        }
        Action::ToggleAuth => {
            state.show_login = !state.show_login;
            Ok(true)
        }
        Action::ToggleResultsView { active_view } => {
            Ok(assign(&mut state.results_switch, *active_view))
        }
        Action::ShowProfile { profile } => {
            state.current_profile = Some(profile.clone());
            state.show_profile = true;
            Ok(true)
        }
        Action::ShowEditProfileForm => Ok(assign(&mut state.show_edit_profile_form, true)),
        Action::UpdateProfile { updated_user } => {
            state.user = updated_user.apply_to(&state.user);
            state.show_edit_profile_form = false;
            Ok(true)
        }
        Action::CloseProfile => {
            let changed = state.current_profile.is_some() || state.show_profile;
            state.current_profile = None;
            state.show_profile = false;
            Ok(changed)
        }
        Action::SetChats { chats } => Ok(assign(&mut state.user.chats, chats.clone())),
        Action::RemoveUserChat { chat_id } => {
            let mut changed = state.user.chats.remove(chat_id).is_some();
            if state.show_chat && state.current_chat_id == *chat_id {
                tracing::debug!(chat_id = %chat_id, "closing removed chat");
                state.show_chat = false;
                changed = true;
            }
            Ok(changed)
        }
        Action::ShowChat { messages, chat_id } => {
            state.current_chat_messages.clone_from(messages);
            state.current_chat_id = *chat_id;
            state.show_chat = true;
            Ok(true)
        }
        Action::CloseChat => Ok(assign(&mut state.show_chat, false)),
        Action::CreateMessage { message } => {
            state.current_chat_messages.push(message.clone());
            Ok(true)
        }
        Action::GetEvents { events } => Ok(assign(&mut state.all_events, events.clone())),
        Action::CreateEvent { new_event } => {
            if !state.all_events.insert_unique(new_event.clone()) {
                return Err(HangoutError::Validation(format!(
                    "event {} already exists",
                    new_event.id
                )));
            }
            state.show_new_event_form = false;
            Ok(true)
        }
        Action::ShowNewEventForm => Ok(assign(&mut state.show_new_event_form, true)),
        Action::CloseNewEventForm => Ok(assign(&mut state.show_new_event_form, false)),
        Action::ShowEditEventForm => Ok(assign(&mut state.show_edit_event_form, true)),
        Action::CloseEditEventForm => Ok(assign(&mut state.show_edit_event_form, false)),
        Action::UpdateEvent {
            event_id,
            updated_event,
        } => {
            state
                .all_events
                .replace(updated_event.clone())
                .map_err(|_| HangoutError::not_found("event", event_id))?;
            state.current_event_id = Some(event_id.clone());
            state.show_edit_event_form = false;
            tracing::debug!(event_id = %event_id, "event updated");
            Ok(true)
        }
        Action::DeleteEvent { event_id, .. } => {
            let had_membership = state.user.events.remove(event_id).is_some();
            let had_event = state.all_events.remove(event_id).is_some();
            if !had_event && !had_membership {
                return Err(HangoutError::not_found("event", event_id));
            }
            tracing::debug!(event_id = %event_id, had_event, had_membership, "event deleted");
            state.results_switch = ResultsTab::Events;
            state.current_event_id = None;
            state.show_event = false;
            Ok(true)
        }
        Action::ShowEvent { event } => {
            if !state.all_events.update_with(&event.id, |known| known.refresh_details(event)) {
                state.all_events.insert_unique(event.clone());
            }
            state.current_event_id = Some(event.id.clone());
            state.show_event = true;
            Ok(true)
        }
        Action::CloseEvent => {
            let changed = state.current_event_id.is_some() || state.show_event;
            state.current_event_id = None;
            state.show_event = false;
            Ok(changed)
        }
        Action::AttendEvent => attend_current_event(state),
        Action::UnattendEvent => unattend_current_event(state),
        Action::CreateComment { new_comment } => {
            let event_id = current_event_id(state)?;
            let mut duplicate = false;
            state.all_events.update_with(&event_id, |event| {
                duplicate = !event.comments.insert_unique(new_comment.clone());
            });
            if duplicate {
                return Err(HangoutError::Validation(format!(
                    "comment {} already exists",
                    new_comment.id
                )));
            }
            Ok(true)
        }
        Action::DeleteComment { comment_id } => {
            let event_id = current_event_id(state)?;
            let mut removed = false;
            state.all_events.update_with(&event_id, |event| {
                removed = event.comments.remove(comment_id).is_some();
            });
            if !removed {
                return Err(HangoutError::not_found("comment", comment_id));
            }
            Ok(true)
        }
        Action::SendRequest { to_user } => {
            let stages = state.hangout_stages(&to_user.email);
            if stages.contains(&"sent") {
                return Ok(false);
            }
            if let Some(stage) = stages.first() {
                return Err(HangoutError::Validation(format!(
                    "{} is already in the {stage} hangout stage",
                    to_user.email
                )));
            }
            Ok(state.user.sent_hangout_requests.insert_unique(to_user.clone()))
        }
        Action::AcceptRequest {
            from_user_email,
            new_chat,
        } => {
            state
                .user
                .received_hangout_requests
                .remove(from_user_email)
                .ok_or_else(|| HangoutError::not_found("hangout request", from_user_email))?;

            // Validated non-empty.
            let counterpart = new_chat.participants[0].clone();
            if counterpart.email != *from_user_email {
                tracing::warn!(
                    from_user_email = %from_user_email,
                    participant = %counterpart.email,
                    "accepted chat's first participant is not the requester"
                );
            }
            state.user.sent_hangout_requests.remove(&counterpart.email);
            state.user.accepted_hangouts.insert_unique(counterpart);

            let chat_added = state.user.chats.insert_unique(new_chat.clone());
            tracing::debug!(chat_id = %new_chat.chat_id, chat_added, "hangout request accepted");

            state.active_view = ActiveView::Chats;
            Ok(true)
        }
        Action::DeclineRequest { from_user_email } => {
            state
                .user
                .received_hangout_requests
                .remove(from_user_email)
                .ok_or_else(|| HangoutError::not_found("hangout request", from_user_email))?;
            Ok(true)
        }
        Action::BlockUser {
            blocked_user_email,
            chat_id,
        } => {
            state.all_users.remove(blocked_user_email);
            if let Some(chat_id) = chat_id {
                state.user.chats.remove(chat_id);
            }
            if !state.user.blocked_users.contains(blocked_user_email) {
                state.user.blocked_users.push(blocked_user_email.clone());
            }
            tracing::debug!(email = %blocked_user_email, "user blocked");
            Ok(true)
        }
        Action::UnblockUser { blocked_user_email } => {
            let before = state.user.blocked_users.len();
            state.user.blocked_users.retain(|email| email != blocked_user_email);
            Ok(state.user.blocked_users.len() != before)
        }
        Action::AddExp { exp } => {
            state.user.exp = *exp;
            state.show_review = false;
            Ok(true)
        }
        Action::StartHangout {
            hangout_id,
            participants,
        } => {
            // Validated to hold at least two entries.
            let counterpart = participants[1].clone();
            if state.user.ongoing_hangouts.contains_key(hangout_id) {
                return Err(HangoutError::Validation(format!(
                    "hangout {hangout_id} already started"
                )));
            }
            state
                .user
                .accepted_hangouts
                .remove(&counterpart.email)
                .ok_or_else(|| HangoutError::not_found("accepted hangout", &counterpart.email))?;
            tracing::debug!(hangout_id = %hangout_id, with = %counterpart.email, "hangout started");
            state.user.ongoing_hangouts.insert_unique(OngoingHangout {
                hangout_id: hangout_id.clone(),
                participants: vec![counterpart],
            });
            Ok(true)
        }
        Action::FinishHangout {
            hangout_id,
            user_to_review,
        } => {
            state
                .user
                .ongoing_hangouts
                .remove(hangout_id)
                .ok_or_else(|| HangoutError::not_found("ongoing hangout", hangout_id))?;
            tracing::debug!(hangout_id = %hangout_id, "hangout finished");
            state.hangout_id = hangout_id.clone();
            state.user_to_review.clone_from(user_to_review);
            state.show_review = true;
            Ok(true)
        }
    }
}

/// Adds the user to the shown event and the event to the user, together.
///
/// A user who already holds a membership entry for the event (its creator)
/// keeps that entry unchanged.
fn attend_current_event(state: &mut AppState) -> Result<bool> {
    let event_id = current_event_id(state)?;
    if state.user.email.is_empty() {
        return Err(HangoutError::Validation(
            "ATTEND_EVENT requires a logged-in user".to_string(),
        ));
    }
    if state.is_attending(&event_id) {
        return Err(HangoutError::Validation(format!(
            "already attending event {event_id}"
        )));
    }

    let attendee = state.user.summary();
    state.all_events.update_with(&event_id, |event: &mut Event| {
        event.attendees.insert_unique(attendee);
    });
    state.user.events.insert_unique(UserEvent {
        event_id: event_id.clone(),
        is_creator: false,
    });

    tracing::debug!(event_id = %event_id, email = %state.user.email, "attending event");
    Ok(true)
}

/// Removes the user from the shown event and the event from the user, together.
///
/// The creator's membership entry is kept.
fn unattend_current_event(state: &mut AppState) -> Result<bool> {
    let event_id = current_event_id(state)?;
    let email = state.user.email.clone();

    let mut removed_attendee = false;
    state.all_events.update_with(&event_id, |event: &mut Event| {
        removed_attendee = event.attendees.remove(&email).is_some();
    });

    let is_creator = state
        .user
        .events
        .get(&event_id)
        .is_some_and(|membership| membership.is_creator);
    let removed_membership = !is_creator && state.user.events.remove(&event_id).is_some();

    tracing::debug!(
        event_id = %event_id,
        removed_attendee,
        removed_membership,
        "left event"
    );
    Ok(removed_attendee || removed_membership)
}

/// Resolves the shown event's id, requiring that it still exists.
fn current_event_id(state: &AppState) -> Result<EventId> {
    state
        .current_event()
        .map(|event| event.id.clone())
        .ok_or_else(|| {
            HangoutError::not_found(
                "current event",
                state
                    .current_event_id
                    .as_ref()
                    .map_or_else(|| "none".to_string(), ToString::to_string),
            )
        })
}

/// Writes `value` into `slot`, reporting whether it differed.
fn assign<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
