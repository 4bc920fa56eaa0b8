//! Screen layer: view-model computation and dispatch wrappers.
//!
//! Screens never mutate state directly. They read a snapshot to compute a
//! view model and translate user gestures into [`Action`](crate::app::Action)s
//! dispatched through the [`Store`](crate::app::Store).
//!
//! # Architecture
//!
//! ```text
//! AppState → ResultsView::compute → ResultsViewModel → widget layer
//! gesture  → ResultsView::select  → TOGGLE_RESULTS_VIEW → Store
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types for the results screen
//! - [`results`]: The hangouts/events results screen
//! - [`signup`]: Signup form validation and the registration seam

pub mod results;
pub mod signup;
pub mod viewmodel;

pub use results::ResultsView;
pub use signup::{toggle_auth, Registrar, SignupForm};
pub use viewmodel::{DisplayItem, EventCard, ResultsPanel, ResultsViewModel, SwitchOption};
