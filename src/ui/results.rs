//! Results screen: the hangouts/events switch and the list under it.
//!
//! The screen dispatches `TOGGLE_RESULTS_VIEW` when mounted (always starting
//! on the hangouts tab) and whenever a switch option is pressed. Everything it
//! shows is computed from the state by [`ResultsView::compute`].
//!
//! An optional search query narrows the list with fuzzy matching; matched
//! characters are reported as highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use hangouts::app::Store;
//! use hangouts::app::modes::ResultsTab;
//! use hangouts::ui::ResultsView;
//!
//! let mut store = Store::default();
//! ResultsView::mount(&mut store)?;
//! ResultsView::select(&mut store, "events")?;
//!
//! let vm = ResultsView::compute(store.state(), None);
//! assert_eq!(vm.selected_index, 1);
//! assert_eq!(store.state().results_switch, ResultsTab::Events);
//! # Ok::<(), hangouts::HangoutError>(())
//! ```

use crate::app::modes::ResultsTab;
use crate::app::{Action, AppState, Store};
use crate::domain::error::{HangoutError, Result};
use crate::domain::{Event, Profile};
use crate::ui::viewmodel::{
    CommentLine, DisplayItem, EventCard, ResultsPanel, ResultsViewModel, SwitchOption,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::sync::Arc;

/// The results screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultsView;

impl ResultsView {
    /// Resets the screen to the hangouts tab, as on first display.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub fn mount(store: &mut Store) -> Result<Arc<AppState>> {
        store.dispatch(&Action::ToggleResultsView {
            active_view: ResultsTab::Hangouts,
        })
    }

    /// Handles a press on the switch option with wire value `value`.
    ///
    /// # Errors
    ///
    /// Returns [`HangoutError::Validation`] for a value that names no tab.
    pub fn select(store: &mut Store, value: &str) -> Result<Arc<AppState>> {
        let tab = ResultsTab::parse(value)
            .ok_or_else(|| HangoutError::Validation(format!("unknown results tab: {value}")))?;
        store.dispatch(&Action::ToggleResultsView { active_view: tab })
    }

    /// Computes the screen from a state snapshot.
    ///
    /// # Parameters
    ///
    /// * `state` - State snapshot
    /// * `query` - Optional search text; every whitespace-separated token must
    ///   fuzzy-match a row's title for the row to be listed
    #[must_use]
    pub fn compute(state: &AppState, query: Option<&str>) -> ResultsViewModel {
        let _span = tracing::debug_span!("compute_results_view",
            tab = state.results_switch.as_str(),
            query_len = query.map_or(0, str::len)
        )
        .entered();

        let options = ResultsTab::ALL
            .into_iter()
            .map(|tab| SwitchOption {
                label: tab.label(),
                value: tab.as_str(),
                is_selected: tab == state.results_switch,
            })
            .collect();
        let selected_index = ResultsTab::ALL
            .iter()
            .position(|tab| *tab == state.results_switch)
            .unwrap_or(0);

        let search = Search::new(query);
        let panel = match state.results_switch {
            ResultsTab::Hangouts => ResultsPanel::Hangouts(
                hangout_candidates(state)
                    .filter_map(|profile| {
                        search.item(
                            &profile.email,
                            &display_name(profile),
                            hangout_status(state, &profile.email),
                        )
                    })
                    .collect(),
            ),
            ResultsTab::Events => ResultsPanel::Events(
                state
                    .all_events
                    .iter()
                    .filter_map(|event| {
                        search.item(&event.id.0, &event.name, event_subtitle(event))
                    })
                    .collect(),
            ),
        };

        let event_modal = if state.show_event {
            state.current_event().map(|event| event_card(state, event))
        } else {
            None
        };

        tracing::debug!(items = panel.items().len(), "results view computed");

        ResultsViewModel {
            options,
            selected_index,
            panel,
            event_modal,
        }
    }
}

/// Directory users that may be offered for a hangout: not the user, not blocked either way.
fn hangout_candidates(state: &AppState) -> impl Iterator<Item = &Profile> {
    state
        .all_users
        .iter()
        .filter(move |profile| {
            profile.email != state.user.email && !state.user.is_blocked(&profile.email)
        })
}

fn display_name(profile: &Profile) -> String {
    if profile.last_name.is_empty() {
        profile.first_name.clone()
    } else {
        format!("{} {}", profile.first_name, profile.last_name)
    }
}

fn hangout_status(state: &AppState, email: &str) -> String {
    match state.hangout_stages(email).first() {
        Some(&"received") => "wants to hang out".to_string(),
        Some(&"sent") => "request sent".to_string(),
        Some(&"accepted") => "hangout accepted".to_string(),
        Some(&"ongoing") => "hanging out now".to_string(),
        _ => String::new(),
    }
}

fn event_subtitle(event: &Event) -> String {
    let attendees = match event.attendees.len() {
        1 => "1 attendee".to_string(),
        n => format!("{n} attendees"),
    };
    if event.tags.is_empty() {
        attendees
    } else {
        format!("{} · {attendees}", event.tags.join(", "))
    }
}

fn event_card(state: &AppState, event: &Event) -> EventCard {
    let is_creator = state
        .user
        .events
        .get(&event.id)
        .is_some_and(|membership| membership.is_creator)
        || event.creator.as_deref() == Some(state.user.email.as_str());

    EventCard {
        id: event.id.0.clone(),
        name: event.name.clone(),
        description: event.description.clone(),
        tags: event.tags.clone(),
        attendee_count: event.attendees.len(),
        is_attending: event.is_attended_by(&state.user.email),
        is_creator,
        comments: event
            .comments
            .iter()
            .map(|comment| CommentLine {
                id: comment.id.0.clone(),
                author: comment
                    .author
                    .as_ref()
                    .map(|a| a.first_name.clone())
                    .unwrap_or_default(),
                text: comment.text.clone(),
                time_ago: comment.time_ago(),
            })
            .collect(),
    }
}

/// Tokenized fuzzy search over row titles.
struct Search {
    query: String,
    tokens: Vec<String>,
    matcher: Option<SkimMatcherV2>,
}

impl Search {
    fn new(query: Option<&str>) -> Self {
        let query = query.map(str::trim).unwrap_or_default().to_string();
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let matcher = if tokens.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };
        Self {
            query,
            tokens,
            matcher,
        }
    }

    /// Builds the row if `title` matches every token.
    fn item(&self, key: &str, title: &str, subtitle: String) -> Option<DisplayItem> {
        let highlight_ranges = match &self.matcher {
            None => Vec::new(),
            Some(matcher) => {
                let lower = title.to_lowercase();
                if !self.tokens.iter().all(|token| matcher.fuzzy_match(&lower, token).is_some()) {
                    return None;
                }
                highlight_ranges(matcher, title, &self.query)
            }
        };

        Some(DisplayItem {
            key: key.to_string(),
            title: title.to_string(),
            subtitle,
            highlight_ranges,
        })
    }
}

/// Coalesces the matcher's character indices into `(start, end)` runs.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut run: Option<(usize, usize)> = None;
    for idx in indices {
        run = match run {
            Some((start, prev)) if idx == prev + 1 => Some((start, idx)),
            Some((start, prev)) => {
                ranges.push((start, prev + 1));
                Some((idx, idx))
            }
            None => Some((idx, idx)),
        };
    }
    if let Some((start, prev)) = run {
        ranges.push((start, prev + 1));
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_ranges_coalesce_consecutive_matches() {
        let matcher = SkimMatcherV2::default();
        let ranges = highlight_ranges(&matcher, "board games", "board");
        assert_eq!(ranges, vec![(0, 5)]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let search = Search::new(Some("   "));
        assert!(search.item("1", "Anything", String::new()).is_some());
    }
}
