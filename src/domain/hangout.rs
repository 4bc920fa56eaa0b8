//! Hangout lifecycle types.
//!
//! A hangout starts as a request (sent or received), becomes an accepted
//! hangout once both parties agree, then an [`OngoingHangout`] while it is in
//! progress. Requests and accepted hangouts are tracked by the counterpart's
//! [`UserSummary`](super::UserSummary); only ongoing hangouts carry their own id.

use super::collection::Keyed;
use super::user::UserSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the backend assigns to a started hangout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HangoutId(pub String);

impl HangoutId {
    /// Returns `true` for the empty placeholder id.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HangoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HangoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A hangout currently in progress.
///
/// `participants` holds the counterpart(s), not the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngoingHangout {
    pub hangout_id: HangoutId,
    #[serde(default)]
    pub participants: Vec<UserSummary>,
}

impl OngoingHangout {
    /// Returns `true` if `email` takes part in this hangout.
    #[must_use]
    pub fn involves(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p.email == email)
    }
}

impl Keyed for OngoingHangout {
    type Key = HangoutId;

    fn key(&self) -> &HangoutId {
        &self.hangout_id
    }
}
