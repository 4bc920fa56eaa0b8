//! View model types representing renderable screen state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) snapshots
//! and consumed by whatever widget layer draws them. They contain no business
//! logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use hangouts::ui::viewmodel::{DisplayItem, ResultsPanel, ResultsViewModel, SwitchOption};
//!
//! let vm = ResultsViewModel {
//!     options: vec![SwitchOption { label: "Hangout", value: "hangouts", is_selected: true }],
//!     selected_index: 0,
//!     panel: ResultsPanel::Hangouts(vec![DisplayItem {
//!         key: "lily@email.com".to_string(),
//!         title: "Lily".to_string(),
//!         subtitle: String::new(),
//!         highlight_ranges: vec![],
//!     }]),
//!     event_modal: None,
//! };
//! assert_eq!(vm.panel.items().len(), 1);
//! ```

use serde::Serialize;

/// Complete view model of the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsViewModel {
    /// Options of the hangouts/events switch, in display order.
    pub options: Vec<SwitchOption>,

    /// Index of the selected switch option.
    pub selected_index: usize,

    /// List shown below the switch.
    pub panel: ResultsPanel,

    /// Event detail modal, present while an event is shown.
    pub event_modal: Option<EventCard>,
}

/// One option of the results switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwitchOption {
    /// Label displayed on the switch.
    pub label: &'static str,

    /// Value dispatched when the option is pressed.
    pub value: &'static str,

    /// Whether this option is the active tab.
    pub is_selected: bool,
}

/// The list under the results switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tab", content = "items", rename_all = "lowercase")]
pub enum ResultsPanel {
    /// Users the logged-in user can hang out with.
    Hangouts(Vec<DisplayItem>),

    /// Known events.
    Events(Vec<DisplayItem>),
}

impl ResultsPanel {
    /// Items of whichever tab is shown.
    #[must_use]
    pub fn items(&self) -> &[DisplayItem] {
        match self {
            Self::Hangouts(items) | Self::Events(items) => items,
        }
    }
}

/// Display information for a single row.
///
/// Contains pre-computed highlight ranges for fuzzy match rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    /// Stable key of the row (user email or event id).
    pub key: String,

    /// Primary text.
    pub title: String,

    /// Secondary text (hangout status, event tags).
    pub subtitle: String,

    /// Character ranges of `title` to highlight for search matches.
    ///
    /// Each tuple is `(start_index, end_index)` with an exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Event detail modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub attendee_count: usize,

    /// Whether the logged-in user is on the attendee list.
    pub is_attending: bool,

    /// Whether the logged-in user created the event (edit/delete allowed).
    pub is_creator: bool,

    pub comments: Vec<CommentLine>,
}

/// One comment in the event modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentLine {
    pub id: String,
    pub author: String,
    pub text: String,
    pub time_ago: String,
}
