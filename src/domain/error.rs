//! Error types for the hangout state store.
//!
//! This module defines the centralized error type [`HangoutError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! The reducer itself has no side channel: every rejected action surfaces here,
//! and the store keeps its previous state whenever an error is returned.

use thiserror::Error;

/// The main error type for hangout store operations.
///
/// Covers rejected actions (validation and lookup failures), signup form
/// failures, and the storage/configuration errors of the ambient layers.
///
/// # Examples
///
/// ```
/// use hangouts::domain::HangoutError;
///
/// fn check_chat_participants(count: usize) -> Result<(), HangoutError> {
///     if count == 0 {
///         return Err(HangoutError::Validation("chat has no participants".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(check_chat_participants(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum HangoutError {
    /// An action payload is malformed or would break a state invariant.
    ///
    /// Raised at the reducer boundary before any transition runs.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An action targets an entity that is not present in the state.
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Entity kind, e.g. `"event"` or `"hangout request"`.
        kind: &'static str,
        /// Key that was looked up.
        key: String,
    },

    /// The signup form failed client-side validation.
    #[error("Signup rejected: {0}")]
    Signup(#[from] SignupError),

    /// The registration client refused the new user.
    #[error("Registration failed: {0}")]
    Registration(String),

    /// Snapshot storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed outside of action parsing.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HangoutError {
    /// Builds a [`HangoutError::NotFound`] from any displayable key.
    pub fn not_found(kind: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}

/// Client-side signup validation failures.
///
/// Each variant carries the message shown to the user when the form is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignupError {
    /// The password and its confirmation differ.
    #[error("Passwords do not match. Please enter your passwords again.")]
    PasswordMismatch,

    /// The PIN has fewer than four characters.
    #[error("PIN must be at least four digits long.")]
    PinTooShort,

    /// The PIN contains a character other than `0-9`.
    #[error("PIN must consist only of digits.")]
    PinNotNumeric,

    /// The PIN does not fit the integer the backend stores.
    #[error("PIN is too long.")]
    PinOutOfRange,
}

/// A specialized `Result` type for hangout store operations.
pub type Result<T> = std::result::Result<T, HangoutError>;
