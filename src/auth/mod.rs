//! Login and Registration Forms
//!
//! Form state plus the two halves of a submission: `validate` turns the form
//! into a request body (or blocks it with a notification before any network
//! call), and `complete` turns the API answer into a [`FormOutcome`] that the
//! driver applies (show notifications, schedule the redirect).

mod login;
mod register;

pub use login::LoginForm;
pub use register::{RegisterForm, RegisterRequest, RoleFields};

use std::time::Duration;

use crate::nav::Route;
use crate::notify::Notification;

/// Delay between a successful submission and the redirect
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Fallback shown when the API rejects a submission without a message
pub const GENERIC_FAILURE: &str = "Algo salió mal.";

/// Navigation scheduled after a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub delay: Duration,
}

/// Result of one submission attempt
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormOutcome {
    pub notifications: Vec<Notification>,
    pub redirect: Option<Redirect>,
}

impl FormOutcome {
    /// Submission blocked or failed; nothing to navigate to
    pub fn failed(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            redirect: None,
        }
    }

    pub fn succeeded(notification: Notification, route: Route, delay: Duration) -> Self {
        Self {
            notifications: vec![notification],
            redirect: Some(Redirect { route, delay }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.redirect.is_some()
    }
}

/// Block a blank required field, naming it by its form label
pub(crate) fn require(label: &str, value: &str) -> Result<(), Notification> {
    if value.trim().is_empty() {
        Err(Notification::error(format!("El campo {} es obligatorio", label)))
    } else {
        Ok(())
    }
}
