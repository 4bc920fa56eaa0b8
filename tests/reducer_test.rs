//! Reducer and store behavior, driven through the wire format where it matters.

use hangouts::app::modes::{ActiveView, ResultsTab};
use hangouts::app::{reduce, Action, AppState, Store};
use hangouts::domain::{
    Chat, ChatId, ChatMessage, Comment, CommentId, Event, EventId, HangoutId, Profile, User,
    UserEvent, UserSummary,
};
use hangouts::HangoutError;
use std::sync::Arc;

fn summary(email: &str) -> UserSummary {
    UserSummary::new(email, email.split('@').next().unwrap_or_default())
}

fn logged_in(email: &str) -> Store {
    let mut store = Store::default();
    let user = User {
        email: email.to_string(),
        first_name: "Me".to_string(),
        ..User::default()
    };
    store.dispatch(&Action::SetUser { user }).unwrap();
    store
}

fn showing_event(email: &str, event: Event) -> Store {
    let mut store = logged_in(email);
    store.dispatch(&Action::ShowEvent { event }).unwrap();
    store
}

#[test]
fn initial_state_matches_first_launch() {
    let state = AppState::new();
    assert_eq!(state.active_view, ActiveView::Results);
    assert_eq!(state.results_switch, ResultsTab::Hangouts);
    assert!(state.show_login);
    assert!(!state.is_logged_in);
    assert_eq!(state.current_chat_id, ChatId(0));
    assert!(state.all_events.is_empty());
}

#[test]
fn unknown_action_type_returns_identical_snapshot() {
    let mut store = logged_in("me@email.com");
    let before = store.snapshot();
    let after = store
        .dispatch_json(r#"{"type":"DO_A_BARREL_ROLL","x":1}"#)
        .unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn rejected_action_keeps_previous_snapshot() {
    let mut store = logged_in("me@email.com");
    let before = store.snapshot();
    let err = store
        .dispatch(&Action::DeclineRequest {
            from_user_email: "nobody@email.com".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, HangoutError::NotFound { .. }));
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn malformed_payload_of_known_type_is_validation_error() {
    let mut store = Store::default();
    let err = store
        .dispatch_json(r#"{"type":"ADD_EXP","exp":"lots"}"#)
        .unwrap_err();
    assert!(matches!(err, HangoutError::Validation(_)));
}

#[test]
fn set_user_logs_in_and_exposes_relationships() {
    let mut store = Store::default();
    store
        .dispatch_json(
            r#"{"type":"SET_USER","user":{
                "email":"me@email.com","first_name":"Me",
                "chats":[{"chat_id":4,"participants":[{"email":"a@email.com"}]}],
                "received_hangout_requests":[{"email":"b@email.com","first_name":"Bea"}],
                "blocked_users":["c@email.com"]
            }}"#,
        )
        .unwrap();

    let state = store.state();
    assert!(state.is_logged_in);
    assert_eq!(state.chats().len(), 1);
    assert_eq!(state.received_hangout_requests().len(), 1);
    assert_eq!(state.blocked_users(), ["c@email.com".to_string()]);
}

#[test]
fn accept_request_removes_only_that_request() {
    let mut store = logged_in("me@email.com");
    let mut user = store.state().user.clone();
    user.received_hangout_requests =
        vec![summary("a@email.com"), summary("b@email.com")].into();
    store.dispatch(&Action::SetUser { user }).unwrap();

    store
        .dispatch_json(
            r#"{"type":"ACCEPT_REQUEST","fromUserEmail":"a@email.com",
                "newChat":{"chat_id":3,"participants":[{"email":"a@email.com","first_name":"a"}]}}"#,
        )
        .unwrap();

    let state = store.state();
    let remaining: Vec<&str> = state
        .received_hangout_requests()
        .iter()
        .map(|r| r.email.as_str())
        .collect();
    assert_eq!(remaining, ["b@email.com"]);
    assert!(state.accepted_hangouts().contains_key(&"a@email.com".to_string()));
    assert!(state.chats().contains_key(&ChatId(3)));
    assert_eq!(state.active_view, ActiveView::Chats);
}

#[test]
fn accept_request_does_not_duplicate_existing_chat() {
    let mut store = logged_in("me@email.com");
    let chat = Chat::new(ChatId(3), vec![summary("a@email.com")]);
    let mut user = store.state().user.clone();
    user.received_hangout_requests = vec![summary("a@email.com")].into();
    user.chats = vec![chat.clone()].into();
    store.dispatch(&Action::SetUser { user }).unwrap();

    store
        .dispatch(&Action::AcceptRequest {
            from_user_email: "a@email.com".to_string(),
            new_chat: chat,
        })
        .unwrap();
    assert_eq!(store.state().chats().len(), 1);
}

#[test]
fn accept_request_with_empty_chat_is_rejected() {
    let mut store = logged_in("me@email.com");
    let err = store
        .dispatch(&Action::AcceptRequest {
            from_user_email: "a@email.com".to_string(),
            new_chat: Chat::new(ChatId(1), vec![]),
        })
        .unwrap_err();
    assert!(matches!(err, HangoutError::Validation(_)));
}

#[test]
fn hangout_lifecycle_keeps_counterpart_in_one_stage() {
    let mut store = logged_in("me@email.com");
    let mut user = store.state().user.clone();
    user.received_hangout_requests = vec![summary("a@email.com")].into();
    store.dispatch(&Action::SetUser { user }).unwrap();
    assert_eq!(store.state().hangout_stages("a@email.com"), ["received"]);

    store
        .dispatch(&Action::AcceptRequest {
            from_user_email: "a@email.com".to_string(),
            new_chat: Chat::new(ChatId(9), vec![summary("a@email.com")]),
        })
        .unwrap();
    assert_eq!(store.state().hangout_stages("a@email.com"), ["accepted"]);

    store
        .dispatch(&Action::StartHangout {
            hangout_id: HangoutId::from("h1"),
            participants: vec![summary("me@email.com"), summary("a@email.com")],
        })
        .unwrap();
    assert_eq!(store.state().hangout_stages("a@email.com"), ["ongoing"]);

    store
        .dispatch(&Action::FinishHangout {
            hangout_id: HangoutId::from("h1"),
            user_to_review: "a@email.com".to_string(),
        })
        .unwrap();
    let state = store.state();
    assert!(state.hangout_stages("a@email.com").is_empty());
    assert!(state.show_review);
    assert_eq!(state.user_to_review, "a@email.com");
    assert_eq!(state.hangout_id, HangoutId::from("h1"));

    store.dispatch(&Action::AddExp { exp: 40 }).unwrap();
    assert_eq!(store.state().user.exp, 40);
    assert!(!store.state().show_review);
}

#[test]
fn start_hangout_requires_two_participants() {
    let mut store = logged_in("me@email.com");
    let err = store
        .dispatch(&Action::StartHangout {
            hangout_id: HangoutId::from("h1"),
            participants: vec![summary("me@email.com")],
        })
        .unwrap_err();
    assert!(matches!(err, HangoutError::Validation(_)));
}

#[test]
fn finish_unknown_hangout_is_not_found() {
    let mut store = logged_in("me@email.com");
    let err = store
        .dispatch(&Action::FinishHangout {
            hangout_id: HangoutId::from("nope"),
            user_to_review: String::new(),
        })
        .unwrap_err();
    assert!(matches!(err, HangoutError::NotFound { kind: "ongoing hangout", .. }));
}

#[test]
fn send_request_twice_is_a_no_op() {
    let mut store = logged_in("me@email.com");
    let to_user = summary("a@email.com");
    store.dispatch(&Action::SendRequest { to_user: to_user.clone() }).unwrap();
    let before = store.snapshot();
    let after = store.dispatch(&Action::SendRequest { to_user }).unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(store.state().sent_hangout_requests().len(), 1);
}

#[test]
fn block_user_drops_directory_entry_and_chat() {
    let mut store = logged_in("me@email.com");
    store
        .dispatch(&Action::SetAllUsers {
            all_users: vec![Profile::new("a@email.com", "Ann"), Profile::new("b@email.com", "Bo")]
                .into(),
        })
        .unwrap();
    store
        .dispatch(&Action::SetChats {
            chats: vec![Chat::new(ChatId(5), vec![summary("a@email.com")])].into(),
        })
        .unwrap();

    store
        .dispatch_json(r#"{"type":"BLOCK_USER","blockedUserEmail":"a@email.com","chatId":5}"#)
        .unwrap();

    let state = store.state();
    assert_eq!(state.all_users.len(), 1);
    assert!(state.chats().is_empty());
    assert_eq!(state.blocked_users(), ["a@email.com".to_string()]);

    store
        .dispatch(&Action::UnblockUser {
            blocked_user_email: "a@email.com".to_string(),
        })
        .unwrap();
    assert!(store.state().blocked_users().is_empty());
}

#[test]
fn removing_open_chat_closes_it() {
    let mut store = logged_in("me@email.com");
    store
        .dispatch(&Action::SetChats {
            chats: vec![Chat::new(ChatId(2), vec![summary("a@email.com")])].into(),
        })
        .unwrap();
    store
        .dispatch(&Action::ShowChat {
            messages: vec![ChatMessage::new("a@email.com", "hi")],
            chat_id: ChatId(2),
        })
        .unwrap();
    store
        .dispatch(&Action::CreateMessage {
            message: ChatMessage::new("me@email.com", "hello"),
        })
        .unwrap();
    assert_eq!(store.state().current_chat_messages.len(), 2);

    store.dispatch(&Action::RemoveUserChat { chat_id: ChatId(2) }).unwrap();
    assert!(!store.state().show_chat);
    assert!(store.state().chats().is_empty());
}

#[test]
fn update_profile_keeps_lists_missing_from_payload() {
    let mut store = logged_in("me@email.com");
    store
        .dispatch(&Action::SetChats {
            chats: vec![Chat::new(ChatId(2), vec![summary("a@email.com")])].into(),
        })
        .unwrap();
    store.dispatch(&Action::ShowEditProfileForm).unwrap();

    store
        .dispatch_json(
            r#"{"type":"UPDATE_PROFILE","updatedUser":{"email":"me@email.com","first_name":"New","interests":["climbing"]}}"#,
        )
        .unwrap();

    let state = store.state();
    assert_eq!(state.user.first_name, "New");
    assert_eq!(state.user.interests, ["climbing".to_string()]);
    assert_eq!(state.chats().len(), 1);
    assert!(!state.show_edit_profile_form);
}

#[test]
fn create_event_rejects_duplicate_id() {
    let mut store = logged_in("me@email.com");
    store.dispatch(&Action::ShowNewEventForm).unwrap();
    store
        .dispatch(&Action::CreateEvent {
            new_event: Event::new("e1", "Picnic"),
        })
        .unwrap();
    assert!(!store.state().show_new_event_form);

    let err = store
        .dispatch(&Action::CreateEvent {
            new_event: Event::new("e1", "Another picnic"),
        })
        .unwrap_err();
    assert!(matches!(err, HangoutError::Validation(_)));
    assert_eq!(store.state().all_events.len(), 1);
}

#[test]
fn update_event_replaces_the_event() {
    let mut store = logged_in("me@email.com");
    store
        .dispatch(&Action::GetEvents {
            events: vec![Event::new("e1", "Picnic"), Event::new("e2", "Hike")].into(),
        })
        .unwrap();
    store.dispatch(&Action::ShowEditEventForm).unwrap();

    let mut edited = Event::new("e1", "Picnic in the park");
    edited.tags = vec!["outdoors".to_string()];
    store
        .dispatch(&Action::UpdateEvent {
            event_id: EventId::from("e1"),
            updated_event: edited.clone(),
        })
        .unwrap();

    let state = store.state();
    assert_eq!(state.all_events.get(&EventId::from("e1")), Some(&edited));
    assert_eq!(state.all_events.as_slice()[0].id, EventId::from("e1"));
    assert_eq!(state.current_event().map(|e| e.name.as_str()), Some("Picnic in the park"));
    assert!(!state.show_edit_event_form);
}

#[test]
fn update_event_with_mismatched_id_is_rejected() {
    let mut store = logged_in("me@email.com");
    let err = store
        .dispatch(&Action::UpdateEvent {
            event_id: EventId::from("e1"),
            updated_event: Event::new("e2", "Hike"),
        })
        .unwrap_err();
    assert!(matches!(err, HangoutError::Validation(_)));
}

#[test]
fn delete_event_removes_event_and_membership() {
    let mut store = logged_in("me@email.com");
    let mut user = store.state().user.clone();
    user.events = vec![UserEvent {
        event_id: EventId::from("e1"),
        is_creator: true,
    }]
    .into();
    store.dispatch(&Action::SetUser { user }).unwrap();
    store
        .dispatch(&Action::ShowEvent {
            event: Event::new("e1", "Picnic"),
        })
        .unwrap();

    store
        .dispatch_json(r#"{"type":"DELETE_EVENT","eventId":"e1","id":"e1"}"#)
        .unwrap();

    let state = store.state();
    assert!(state.all_events.is_empty());
    assert!(state.user_events().is_empty());
    assert!(!state.show_event);
    assert_eq!(state.current_event_id, None);
    assert_eq!(state.results_switch, ResultsTab::Events);
}

#[test]
fn delete_event_with_conflicting_legacy_id_is_rejected() {
    let mut store = logged_in("me@email.com");
    let err = store
        .dispatch_json(r#"{"type":"DELETE_EVENT","eventId":"e1","id":"e2"}"#)
        .unwrap_err();
    assert!(matches!(err, HangoutError::Validation(_)));
}

#[test]
fn attend_then_unattend_updates_both_sides() {
    let mut store = showing_event("me@email.com", Event::new("e1", "Picnic"));

    store.dispatch(&Action::AttendEvent).unwrap();
    let id = EventId::from("e1");
    assert!(store.state().is_attending(&id));
    assert!(store.state().user_events().contains_key(&id));
    assert_eq!(
        store.state().current_event().map(|e| e.attendees.len()),
        Some(1)
    );

    store.dispatch(&Action::UnattendEvent).unwrap();
    assert!(!store.state().is_attending(&id));
    assert!(!store.state().user_events().contains_key(&id));
}

#[test]
fn attending_twice_is_rejected() {
    let mut store = showing_event("me@email.com", Event::new("e1", "Picnic"));
    store.dispatch(&Action::AttendEvent).unwrap();
    let err = store.dispatch(&Action::AttendEvent).unwrap_err();
    assert!(matches!(err, HangoutError::Validation(_)));
    assert_eq!(
        store.state().current_event().map(|e| e.attendees.len()),
        Some(1)
    );
}

#[test]
fn attend_without_shown_event_is_not_found() {
    let mut store = logged_in("me@email.com");
    let err = store.dispatch(&Action::AttendEvent).unwrap_err();
    assert!(matches!(err, HangoutError::NotFound { kind: "current event", .. }));
}

#[test]
fn comments_are_added_and_removed_on_shown_event() {
    let mut store = showing_event("me@email.com", Event::new("e1", "Picnic"));

    store
        .dispatch(&Action::CreateComment {
            new_comment: Comment::new("c1", "bringing snacks"),
        })
        .unwrap();
    store
        .dispatch(&Action::CreateComment {
            new_comment: Comment::new("c2", "me too"),
        })
        .unwrap();
    assert_eq!(store.state().current_event().map(|e| e.comments.len()), Some(2));

    store
        .dispatch(&Action::DeleteComment {
            comment_id: CommentId::from("c1"),
        })
        .unwrap();
    let event = store.state().current_event().cloned().unwrap();
    let ids: Vec<&str> = event.comments.iter().map(|c| c.id.0.as_str()).collect();
    assert_eq!(ids, ["c2"]);

    let err = store
        .dispatch(&Action::DeleteComment {
            comment_id: CommentId::from("c1"),
        })
        .unwrap_err();
    assert!(matches!(err, HangoutError::NotFound { kind: "comment", .. }));
}

#[test]
fn close_event_clears_pointer() {
    let mut store = showing_event("me@email.com", Event::new("e1", "Picnic"));
    store.dispatch(&Action::CloseEvent).unwrap();
    assert!(store.state().current_event().is_none());
    assert_eq!(store.state().all_events.len(), 1);

    let before = store.snapshot();
    let after = store.dispatch(&Action::CloseEvent).unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn profile_modal_opens_and_closes() {
    let mut state = AppState::new();
    reduce(
        &mut state,
        &Action::ShowProfile {
            profile: Profile::new("a@email.com", "Ann"),
        },
    )
    .unwrap();
    assert!(state.show_profile);
    assert_eq!(state.current_profile.as_ref().map(|p| p.email.as_str()), Some("a@email.com"));

    reduce(&mut state, &Action::CloseProfile).unwrap();
    assert!(!state.show_profile);
    assert!(state.current_profile.is_none());
}

#[test]
fn subscribers_see_only_changes() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut store = Store::default();
    store.subscribe(move |_state, action| {
        sink.lock().unwrap().push(action.kind());
    });

    store.dispatch(&Action::SetActiveView { active_view: ActiveView::Chats }).unwrap();
    store.dispatch(&Action::SetActiveView { active_view: ActiveView::Chats }).unwrap();
    let _ = store.dispatch(&Action::AttendEvent);

    assert_eq!(*seen.lock().unwrap(), ["SET_ACTIVE_VIEW"]);
    assert_eq!(store.dispatched(), 1);
}

#[test]
fn send_request_to_accepted_counterpart_is_rejected() {
    let mut store = Store::default();
    let user = User {
        email: "me@email.com".to_string(),
        received_hangout_requests: vec![summary("a@email.com")].into(),
        ..User::default()
    };
    store.dispatch(&Action::SetUser { user }).unwrap();
    store
        .dispatch(&Action::AcceptRequest {
            from_user_email: "a@email.com".to_string(),
            new_chat: Chat::new(ChatId(3), vec![summary("a@email.com")]),
        })
        .unwrap();

    let before = store.snapshot();
    let err = store
        .dispatch(&Action::SendRequest {
            to_user: summary("a@email.com"),
        })
        .unwrap_err();
    assert!(matches!(err, HangoutError::Validation(_)));
    assert!(Arc::ptr_eq(&before, &store.snapshot()));

    store
        .dispatch(&Action::StartHangout {
            hangout_id: HangoutId::from("h1"),
            participants: vec![summary("me@email.com"), summary("a@email.com")],
        })
        .unwrap();
    assert!(store
        .dispatch(&Action::SendRequest {
            to_user: summary("a@email.com"),
        })
        .is_err());
    assert_eq!(store.state().hangout_stages("a@email.com"), ["ongoing"]);
}

#[test]
fn reshowing_listed_event_keeps_attendance() {
    let mut store = logged_in("me@email.com");
    store
        .dispatch(&Action::GetEvents {
            events: vec![Event::new("e1", "Picnic")].into(),
        })
        .unwrap();
    store
        .dispatch(&Action::ShowEvent {
            event: Event::new("e1", "Picnic"),
        })
        .unwrap();
    store.dispatch(&Action::AttendEvent).unwrap();
    store.dispatch(&Action::CloseEvent).unwrap();

    let mut listed = Event::new("e1", "Picnic at noon");
    listed.tags = vec!["food".to_string()];
    store.dispatch(&Action::ShowEvent { event: listed }).unwrap();

    let state = store.state();
    let id = EventId::from("e1");
    assert!(state.is_attending(&id));
    assert!(state.user_events().contains_key(&id));
    let event = state.current_event().unwrap();
    assert_eq!(event.name, "Picnic at noon");
    assert_eq!(event.tags, ["food".to_string()]);
}

#[test]
fn delete_unloaded_event_still_drops_membership() {
    let mut store = logged_in("me@email.com");
    let mut user = store.state().user.clone();
    user.events = vec![UserEvent {
        event_id: EventId::from("e1"),
        is_creator: false,
    }]
    .into();
    store.dispatch(&Action::SetUser { user }).unwrap();

    store
        .dispatch_json(r#"{"type":"DELETE_EVENT","eventId":"e1"}"#)
        .unwrap();
    assert!(store.state().user_events().is_empty());

    let err = store
        .dispatch_json(r#"{"type":"DELETE_EVENT","eventId":"e1"}"#)
        .unwrap_err();
    assert!(matches!(err, HangoutError::NotFound { kind: "event", .. }));
}
