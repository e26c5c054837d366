//! Crate-level error taxonomy.

use thiserror::Error;

use crate::auth::LoginError;
use crate::config::ConfigError;

/// Errors surfaced by the crate's public API.
///
/// Login rejections normally never reach callers: the login view-model
/// folds them into `LoginState::last_error`. The variant exists for callers
/// that talk to a [`LoginService`](crate::auth::LoginService) directly.
#[derive(Debug, Error)]
pub enum Error {
    /// Construction-time contract violation (a programming mistake).
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The remote login attempt was rejected.
    #[error(transparent)]
    LoginFailed(#[from] LoginError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
