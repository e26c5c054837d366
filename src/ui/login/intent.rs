//! Intents for the login form.

use crate::ui::mvi::Intent;

/// Intents that can be dispatched to the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIntent {
    /// Email field edited.
    EmailChanged(String),

    /// Password field edited.
    PasswordChanged(String),

    /// Login button tapped (or submit invoked programmatically).
    SubmitTapped,

    /// The login call started under `generation` succeeded.
    LoginSucceeded {
        generation: u64,
        token: Option<String>,
    },

    /// The login call started under `generation` was rejected.
    LoginFailed { generation: u64, message: String },

    /// Clear the form and orphan any in-flight call.
    Reset,
}

impl Intent for LoginIntent {}
