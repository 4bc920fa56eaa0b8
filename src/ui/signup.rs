//! Signup form with client-side validation.
//!
//! The form collects the new user's details and hands them to a
//! [`Registrar`] only after they pass validation. Checks run in a fixed order
//! and stop at the first failure, so the user sees one message at a time.

use crate::app::{Action, AppState, Store};
use crate::domain::error::{Result, SignupError};
use crate::domain::NewUser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Minimum number of characters in a PIN.
pub const MIN_PIN_LEN: usize = 4;

/// Registration client used by [`SignupForm::submit`].
///
/// Implemented by whatever talks to the account backend.
pub trait Registrar {
    /// Registers `user`.
    ///
    /// # Errors
    ///
    /// Returns [`HangoutError::Registration`](crate::HangoutError::Registration)
    /// or a transport error when the backend refuses the user.
    fn register(&mut self, user: NewUser) -> Result<()>;
}

/// Raw contents of the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub password: String,
    pub password2: String,
    pub pin: String,
}

impl SignupForm {
    /// Checks the form and converts the PIN to an integer.
    ///
    /// # Errors
    ///
    /// In order of precedence: [`SignupError::PasswordMismatch`],
    /// [`SignupError::PinTooShort`], [`SignupError::PinNotNumeric`], and
    /// [`SignupError::PinOutOfRange`] for a PIN that overflows `u32`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hangouts::domain::SignupError;
    /// use hangouts::ui::SignupForm;
    ///
    /// let form = SignupForm {
    ///     password: "hunter22".into(),
    ///     password2: "hunter22".into(),
    ///     pin: "12a4".into(),
    ///     ..SignupForm::default()
    /// };
    /// assert_eq!(form.validate(), Err(SignupError::PinNotNumeric));
    /// ```
    pub fn validate(&self) -> std::result::Result<NewUser, SignupError> {
        if self.password != self.password2 {
            return Err(SignupError::PasswordMismatch);
        }
        if self.pin.chars().count() < MIN_PIN_LEN {
            return Err(SignupError::PinTooShort);
        }
        if !self.pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(SignupError::PinNotNumeric);
        }
        let pin = self
            .pin
            .parse::<u32>()
            .map_err(|_| SignupError::PinOutOfRange)?;

        Ok(NewUser {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            password: self.password.clone(),
            pin,
        })
    }

    /// Validates the form and, only if it passes, registers the user.
    ///
    /// # Errors
    ///
    /// Returns [`HangoutError::Signup`](crate::HangoutError::Signup) without
    /// contacting the registrar when validation fails, otherwise whatever the
    /// registrar returns.
    pub fn submit(&self, registrar: &mut impl Registrar) -> Result<()> {
        let new_user = self.validate().map_err(|e| {
            tracing::debug!(error = %e, "signup form rejected");
            e
        })?;
        tracing::info!(email = %new_user.email, "registering new user");
        registrar.register(new_user)
    }
}

/// Switches between the login and signup screens.
///
/// # Errors
///
/// Propagates dispatch errors.
pub fn toggle_auth(store: &mut Store) -> Result<Arc<AppState>> {
    store.dispatch(&Action::ToggleAuth)
}
