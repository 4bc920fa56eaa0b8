//! Property-based tests for the reducer.
//!
//! Invariants are checked after every action of arbitrary sequences; rejected
//! actions are part of the sequence and must leave the invariants intact too.

use hangouts::app::{Action, Store};
use hangouts::domain::{
    Chat, ChatId, Comment, CommentId, Event, EventId, HangoutId, User, UserSummary,
};
use proptest::prelude::*;

const ME: &str = "me@email.com";
const EVENT: &str = "e1";

fn counterpart(i: u8) -> UserSummary {
    UserSummary::new(format!("friend{i}@email.com"), format!("Friend {i}"))
}

fn store_with_event() -> Store {
    let mut store = Store::default();
    let user = User {
        email: ME.to_string(),
        first_name: "Me".to_string(),
        ..User::default()
    };
    store.dispatch(&Action::SetUser { user }).unwrap();
    store
        .dispatch(&Action::ShowEvent {
            event: Event::new(EVENT, "Picnic"),
        })
        .unwrap();
    store
}

/// Attendance, comment and modal actions around a single event.
fn event_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => Just(Action::AttendEvent),
        3 => Just(Action::UnattendEvent),
        2 => (0u8..5).prop_map(|i| Action::CreateComment {
            new_comment: Comment::new(format!("c{i}"), "hi"),
        }),
        2 => (0u8..5).prop_map(|i| Action::DeleteComment {
            comment_id: CommentId(format!("c{i}")),
        }),
        1 => "[A-Za-z ]{0,12}".prop_map(|name| Action::ShowEvent {
            event: Event::new(EVENT, name),
        }),
        1 => Just(Action::CloseEvent),
    ]
}

/// Hangout lifecycle actions over a small pool of counterparts.
fn hangout_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..3).prop_map(|i| Action::SendRequest { to_user: counterpart(i) }),
        (0u8..3).prop_map(|i| Action::AcceptRequest {
            from_user_email: counterpart(i).email,
            new_chat: Chat::new(ChatId(u64::from(i) + 1), vec![counterpart(i)]),
        }),
        (0u8..3).prop_map(|i| Action::DeclineRequest {
            from_user_email: counterpart(i).email,
        }),
        (0u8..3).prop_map(|i| Action::StartHangout {
            hangout_id: HangoutId(format!("h{i}")),
            participants: vec![UserSummary::new(ME, "Me"), counterpart(i)],
        }),
        (0u8..3).prop_map(|i| Action::FinishHangout {
            hangout_id: HangoutId(format!("h{i}")),
            user_to_review: counterpart(i).email,
        }),
    ]
}

proptest! {
    /// The user is an attendee of the event exactly when the event is on the
    /// user's list.
    #[test]
    fn prop_attendance_is_mirrored(actions in prop::collection::vec(event_action(), 0..40)) {
        let mut store = store_with_event();
        let id = EventId::from(EVENT);

        for action in actions {
            let _ = store.dispatch(&action);
            let state = store.state();
            prop_assert_eq!(
                state.is_attending(&id),
                state.user_events().contains_key(&id),
                "attendance diverged after {:?}", action.kind()
            );
        }
    }

    /// Attending then leaving restores the attendee list.
    #[test]
    fn prop_attend_unattend_round_trip(attend_first in any::<bool>()) {
        let mut store = store_with_event();
        if attend_first {
            store.dispatch(&Action::AttendEvent).unwrap();
            store.dispatch(&Action::UnattendEvent).unwrap();
        }
        let before = store.state().current_event().cloned();

        store.dispatch(&Action::AttendEvent).unwrap();
        store.dispatch(&Action::UnattendEvent).unwrap();

        prop_assert_eq!(store.state().current_event().cloned(), before);
    }

    /// Creating and deleting a comment restores the comment list.
    #[test]
    fn prop_comment_create_delete_round_trip(
        existing in prop::collection::vec("[a-z]{1,6}", 0..5),
        text in ".{0,40}",
    ) {
        let mut store = store_with_event();
        for (i, body) in existing.iter().enumerate() {
            let _ = store.dispatch(&Action::CreateComment {
                new_comment: Comment::new(format!("old{i}"), body.clone()),
            });
        }
        let before = store.state().current_event().map(|e| e.comments.clone());

        store
            .dispatch(&Action::CreateComment { new_comment: Comment::new("fresh", text) })
            .unwrap();
        store
            .dispatch(&Action::DeleteComment { comment_id: CommentId::from("fresh") })
            .unwrap();

        prop_assert_eq!(store.state().current_event().map(|e| e.comments.clone()), before);
    }

    /// A counterpart never sits in more than one of received, sent, accepted
    /// and ongoing at once, starting from incoming requests and letting the
    /// user send requests at any point.
    #[test]
    fn prop_hangout_stage_is_unique(actions in prop::collection::vec(hangout_action(), 0..60)) {
        let mut store = Store::default();
        let user = User {
            email: ME.to_string(),
            received_hangout_requests: (0u8..3).map(counterpart).collect(),
            ..User::default()
        };
        store.dispatch(&Action::SetUser { user }).unwrap();

        for action in actions {
            let _ = store.dispatch(&action);
            for i in 0u8..3 {
                let email = counterpart(i).email;
                let stages = store.state().hangout_stages(&email);
                prop_assert!(
                    stages.len() <= 1,
                    "{} in stages {:?} after {}", email, stages, action.kind()
                );
            }
        }
    }
}
