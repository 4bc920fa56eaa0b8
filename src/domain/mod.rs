//! Domain layer for the hangout client.
//!
//! This module contains the entity types the state store is built from,
//! independent of how actions arrive or how state is persisted.
//!
//! # Organization
//!
//! - [`collection`]: [`KeyedVec`], the insertion-ordered keyed list every relationship uses
//! - [`user`]: the logged-in [`User`], directory [`Profile`]s and [`UserSummary`]
//! - [`hangout`]: ongoing hangouts and hangout ids
//! - [`chat`]: chats and chat messages
//! - [`event`]: events and their comments
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use hangouts::domain::{Event, Result, UserSummary};
//!
//! fn first_attendee() -> Result<Event> {
//!     let mut event = Event::new("1", "Board games");
//!     event.attendees.insert_unique(UserSummary::new("lily@email.com", "Lily"));
//!     Ok(event)
//! }
//! ```

pub mod chat;
pub mod collection;
pub mod error;
pub mod event;
pub mod hangout;
pub mod user;

pub use chat::{Chat, ChatId, ChatMessage};
pub use collection::{Keyed, KeyedVec};
pub use error::{HangoutError, Result, SignupError};
pub use event::{Comment, CommentId, Event, EventId};
pub use hangout::{HangoutId, OngoingHangout};
pub use user::{HangoutRequest, NewUser, Profile, User, UserEvent, UserSummary, UserUpdate};
