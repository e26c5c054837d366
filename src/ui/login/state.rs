//! State for the login form.

use serde::Serialize;

use crate::ui::mvi::UiState;

/// Shown after a successful login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

/// How the password field treats long input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PasswordPolicy {
    /// Stored verbatim.
    #[default]
    Uncapped,
    /// Truncated to `max_chars` characters on every write.
    Capped { max_chars: usize },
}

/// Input rules for the form. Lengths are counted in `char`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormPolicy {
    pub email_max_chars: usize,
    pub min_email_chars: usize,
    pub min_password_chars: usize,
    pub password: PasswordPolicy,
}

impl Default for FormPolicy {
    fn default() -> Self {
        Self {
            email_max_chars: 25,
            min_email_chars: 6,
            min_password_chars: 8,
            password: PasswordPolicy::Uncapped,
        }
    }
}

impl FormPolicy {
    /// Policy with the password capped at `max_chars`.
    pub fn with_password_cap(mut self, max_chars: usize) -> Self {
        self.password = PasswordPolicy::Capped { max_chars };
        self
    }

    pub fn sanitize_email(&self, text: &str) -> String {
        truncate_chars(text, self.email_max_chars)
    }

    pub fn sanitize_password(&self, text: &str) -> String {
        match self.password {
            PasswordPolicy::Uncapped => text.to_string(),
            PasswordPolicy::Capped { max_chars } => truncate_chars(text, max_chars),
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// Snapshot of the login form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginState {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_submitting: bool,
    pub last_error: Option<String>,
    pub last_success_message: Option<String>,
    pub auth_token: Option<String>,
    /// Tag of the most recent submission or reset.
    pub generation: u64,
    #[serde(skip_serializing)]
    pub policy: FormPolicy,
}

impl UiState for LoginState {}

impl std::fmt::Debug for LoginState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginState")
            .field("email", &self.email)
            .field("password_chars", &self.password.chars().count())
            .field("is_submitting", &self.is_submitting)
            .field("last_error", &self.last_error)
            .field("last_success_message", &self.last_success_message)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "****"))
            .field("generation", &self.generation)
            .finish()
    }
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new(FormPolicy::default())
    }
}

impl LoginState {
    pub fn new(policy: FormPolicy) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            is_submitting: false,
            last_error: None,
            last_success_message: None,
            auth_token: None,
            generation: 0,
            policy,
        }
    }

    /// Whether the submit button should accept taps.
    pub fn is_button_enabled(&self) -> bool {
        self.email.contains('.')
            && self.email.chars().count() >= self.policy.min_email_chars
            && self.password.chars().count() >= self.policy.min_password_chars
            && !self.is_submitting
    }
}
