//! Application layer: state, actions, the reducer and the store.
//!
//! This module is the state-management core of the client. Views and network
//! handlers never write state; they build [`Action`]s and hand them to the
//! [`Store`].
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input / Network → Action → Store::dispatch → reduce(copy) → new snapshot → Views
//!                                                      ↓ error
//!                                              previous snapshot kept
//! ```
//!
//! # Modules
//!
//! - [`actions`]: The closed action vocabulary and its wire format
//! - [`handler`]: The reducer
//! - [`modes`]: Screen and results-tab enums
//! - [`state`]: The state aggregate and its derived accessors
//! - [`store`]: Snapshot ownership and dispatch
//!
//! # Example
//!
//! ```rust
//! use hangouts::app::{Action, Store};
//! use hangouts::app::modes::ResultsTab;
//!
//! let mut store = Store::default();
//! store.dispatch(&Action::ToggleResultsView { active_view: ResultsTab::Events })?;
//! assert_eq!(store.state().results_switch, ResultsTab::Events);
//! # Ok::<(), hangouts::HangoutError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod store;

pub use actions::Action;
pub use handler::reduce;
pub use modes::{ActiveView, ResultsTab};
pub use state::AppState;
pub use store::Store;
