//! Scripted login service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::clock::Clock;
use crate::config::MockLoginConfig;

use super::{LoginError, LoginRequest, LoginResponse, LoginService};

/// What the mock answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOutcome {
    Succeed { token: Option<String> },
    Fail { message: String },
}

/// In-process stand-in for a remote login endpoint.
///
/// Records every request, optionally waits `latency` on the injected clock
/// before answering, then returns the scripted outcome.
pub struct MockLoginService {
    outcome: Mutex<MockOutcome>,
    latency: Option<(Duration, Arc<dyn Clock>)>,
    calls: AtomicUsize,
    last_request: Mutex<Option<LoginRequest>>,
}

impl MockLoginService {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            latency: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn succeeding(token: Option<&str>) -> Self {
        Self::new(MockOutcome::Succeed {
            token: token.map(str::to_string),
        })
    }

    pub fn failing(message: &str) -> Self {
        Self::new(MockOutcome::Fail {
            message: message.to_string(),
        })
    }

    /// Build from the `[mock_login]` config section.
    pub fn from_config(config: &MockLoginConfig, clock: Arc<dyn Clock>) -> Self {
        let outcome = match &config.fail_with {
            Some(message) => MockOutcome::Fail {
                message: message.clone(),
            },
            None => MockOutcome::Succeed {
                token: config.token.clone(),
            },
        };
        Self::new(outcome).with_latency(Duration::from_millis(config.latency_ms), clock)
    }

    /// Delay every answer by `latency`, measured on `clock`.
    pub fn with_latency(mut self, latency: Duration, clock: Arc<dyn Clock>) -> Self {
        self.latency = if latency.is_zero() {
            None
        } else {
            Some((latency, clock))
        };
        self
    }

    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.lock() = outcome;
    }

    /// Number of `login` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<LoginRequest> {
        self.last_request.lock().clone()
    }
}

#[async_trait]
impl LoginService for MockLoginService {
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, LoginError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            email_chars = request.email.chars().count(),
            "mock login called"
        );
        *self.last_request.lock() = Some(request);

        if let Some((latency, clock)) = &self.latency {
            clock.sleep(*latency).await;
        }

        let outcome = self.outcome.lock().clone();
        match outcome {
            MockOutcome::Succeed { token } => Ok(LoginResponse { token }),
            MockOutcome::Fail { message } => Err(LoginError { message }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;

    #[tokio::test]
    async fn succeeding_mock_returns_token_and_records_request() {
        let service = MockLoginService::succeeding(Some("TheToken"));
        let response = service
            .login(LoginRequest::new("j@j.dk", "12345678"))
            .await
            .unwrap();

        assert_eq!(response.token.as_deref(), Some("TheToken"));
        assert_eq!(service.calls(), 1);
        assert_eq!(service.last_request().unwrap().email, "j@j.dk");
    }

    #[tokio::test]
    async fn failing_mock_returns_message() {
        let service = MockLoginService::failing("ErrorText");
        let err = service
            .login(LoginRequest::new("j@j.dk", "12345678"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "ErrorText");
    }

    #[tokio::test]
    async fn outcome_can_be_swapped() {
        let service = MockLoginService::failing("nope");
        service.set_outcome(MockOutcome::Succeed { token: None });
        let response = service.login(LoginRequest::new("a", "b")).await.unwrap();
        assert_eq!(response.token, None);
    }

    #[tokio::test]
    async fn config_with_fail_with_builds_failing_mock() {
        let config = MockLoginConfig {
            latency_ms: 0,
            token: Some("ignored".to_string()),
            fail_with: Some("ErrorText".to_string()),
        };
        let service = MockLoginService::from_config(&config, Arc::new(VirtualClock::new()));
        let err = service.login(LoginRequest::new("a", "b")).await.unwrap_err();
        assert_eq!(err.message, "ErrorText");
    }

    #[tokio::test]
    async fn latency_waits_on_the_injected_clock() {
        let clock = Arc::new(VirtualClock::new());
        let service = Arc::new(
            MockLoginService::succeeding(Some("t"))
                .with_latency(Duration::from_millis(300), clock.clone()),
        );

        let task = tokio::spawn({
            let service = service.clone();
            async move { service.login(LoginRequest::new("a", "b")).await }
        });

        clock.advance(Duration::from_millis(299)).await;
        assert!(!task.is_finished());

        clock.advance(Duration::from_millis(1)).await;
        let response = task.await.unwrap().unwrap();
        assert_eq!(response.token.as_deref(), Some("t"));
    }
}
