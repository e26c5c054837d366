//! Login capability consumed by the login view-model.
//!
//! The view-model never talks to a transport directly; it is handed an
//! `Arc<dyn LoginService>` at construction. [`MockLoginService`] is the
//! scripted implementation used by the demo binary and tests.

mod mock;

use async_trait::async_trait;
use thiserror::Error;

pub use mock::{MockLoginService, MockOutcome};

const REDACTED: &str = "****";

/// Credentials captured at the moment a submission starts.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Successful login outcome.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginResponse {
    /// Session token, when the remote side hands one out.
    pub token: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &self.token.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Rejected login. `message` is human-readable and shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoginError {
    pub message: String,
}

impl LoginError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Remote login capability.
///
/// Implementations must resolve each call exactly once. The view-model
/// performs at most one call at a time per instance.
#[async_trait]
pub trait LoginService: Send + Sync {
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, LoginError>;
}
