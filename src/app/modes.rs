//! Screen and tab selection types.
//!
//! These enums replace the free-form strings the views switch on. The top-level
//! screen is an [`ActiveView`]; inside the results screen a [`ResultsTab`]
//! decides whether hangout candidates or events are listed.
//!
//! # Example
//!
//! ```rust
//! use hangouts::app::modes::{ActiveView, ResultsTab};
//!
//! assert_eq!(ActiveView::from("chats"), ActiveView::Chats);
//! assert_eq!(ResultsTab::Events.as_str(), "events");
//! ```

use serde::{Deserialize, Serialize};

/// Top-level screen shown by the app.
///
/// Serialized as its lowercase name. Screens this crate has no logic for are
/// carried through unchanged as [`ActiveView::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActiveView {
    /// Results screen with the hangouts/events switch.
    #[default]
    Results,

    /// Chat list. Forced after accepting a hangout request.
    Chats,

    /// The user's own profile.
    Profile,

    /// Any other screen name.
    Other(String),
}

impl ActiveView {
    /// Returns the wire name of the screen.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Results => "results",
            Self::Chats => "chats",
            Self::Profile => "profile",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ActiveView {
    fn from(value: String) -> Self {
        match value.as_str() {
            "results" => Self::Results,
            "chats" => Self::Chats,
            "profile" => Self::Profile,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ActiveView {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ActiveView> for String {
    fn from(value: ActiveView) -> Self {
        match value {
            ActiveView::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Which list the results screen shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultsTab {
    /// Users available for a one-on-one hangout.
    #[default]
    Hangouts,

    /// Upcoming events.
    Events,
}

impl ResultsTab {
    /// Every tab, in switch order.
    pub const ALL: [Self; 2] = [Self::Hangouts, Self::Events];

    /// Returns the wire value of the tab.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hangouts => "hangouts",
            Self::Events => "events",
        }
    }

    /// Returns the label shown on the switch.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hangouts => "Hangout",
            Self::Events => "Events",
        }
    }

    /// Parses a wire value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.as_str() == value)
    }
}
