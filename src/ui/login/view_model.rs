//! Login view-model: owns the form state and runs submissions.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use tokio::sync::watch;

use crate::auth::LoginService;
use crate::ui::mvi::Reducer;

use super::intent::LoginIntent;
use super::reducer::{LoginEffect, LoginReducer};
use super::state::{FormPolicy, LoginState};

/// A submitted login call that has not run yet.
///
/// The view-model never spawns: the caller decides where the outcome is
/// delivered, either by awaiting the task inline or by handing it to an
/// executor (`tokio::spawn(task)`).
#[must_use = "the login call only happens when the task is awaited or spawned"]
pub struct LoginTask {
    future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
}

impl Future for LoginTask {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.future.as_mut().poll(cx)
    }
}

impl std::fmt::Debug for LoginTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginTask").finish_non_exhaustive()
    }
}

/// View-model behind the login screen.
///
/// State is published through a `watch` channel: every mutation that changes
/// the state notifies all [`subscribe`](Self::subscribe)rs.
pub struct LoginViewModel {
    inner: Arc<LoginInner>,
}

struct LoginInner {
    state: watch::Sender<LoginState>,
    service: Arc<dyn LoginService>,
}

impl LoginInner {
    /// Run one intent through the reducer.
    ///
    /// Returns whether the state changed and the effect to run, if any. The
    /// reduce-and-store step is atomic with respect to other dispatches.
    fn dispatch(&self, intent: LoginIntent) -> (bool, Option<LoginEffect>) {
        let mut effect = None;
        let changed = self.state.send_if_modified(|state| {
            let (next, next_effect) = LoginReducer::reduce(state.clone(), intent);
            effect = next_effect;
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        });
        (changed, effect)
    }
}

impl LoginViewModel {
    pub fn new(service: Arc<dyn LoginService>, policy: FormPolicy) -> Self {
        let (state, _) = watch::channel(LoginState::new(policy));
        Self {
            inner: Arc::new(LoginInner { state, service }),
        }
    }

    pub fn set_email(&self, text: impl Into<String>) {
        self.inner.dispatch(LoginIntent::EmailChanged(text.into()));
    }

    pub fn set_password(&self, text: impl Into<String>) {
        self.inner.dispatch(LoginIntent::PasswordChanged(text.into()));
    }

    pub fn is_button_enabled(&self) -> bool {
        self.inner.state.borrow().is_button_enabled()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.state.borrow().is_submitting
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LoginState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.inner.state.subscribe()
    }

    /// Start a login with the credentials as they are right now.
    ///
    /// Returns `None` when a submission is already in flight. Otherwise the
    /// form is marked as submitting immediately and the returned task makes
    /// exactly one call to the login service, then folds the outcome back
    /// into the state. Outcomes that arrive after [`reset`](Self::reset) or
    /// after the view-model was dropped are discarded.
    pub fn submit(&self) -> Option<LoginTask> {
        let (_, effect) = self.inner.dispatch(LoginIntent::SubmitTapped);
        let Some(LoginEffect::Authenticate {
            generation,
            request,
        }) = effect
        else {
            tracing::debug!("submit ignored, login already in flight");
            return None;
        };

        tracing::info!(
            generation,
            email_chars = request.email.chars().count(),
            "login submitted"
        );
        let service = Arc::clone(&self.inner.service);
        let inner: Weak<LoginInner> = Arc::downgrade(&self.inner);

        let future = async move {
            let outcome = service.login(request).await;

            let Some(inner) = inner.upgrade() else {
                tracing::debug!(generation, "login finished after view-model was dropped");
                return;
            };

            let intent = match outcome {
                Ok(response) => {
                    tracing::info!(generation, has_token = response.token.is_some(), "login succeeded");
                    LoginIntent::LoginSucceeded {
                        generation,
                        token: response.token,
                    }
                }
                Err(err) => {
                    tracing::warn!(generation, error = %err, "login failed");
                    LoginIntent::LoginFailed {
                        generation,
                        message: err.message,
                    }
                }
            };

            let (applied, _) = inner.dispatch(intent);
            if !applied {
                tracing::debug!(generation, "discarded stale login result");
            }
        };

        Some(LoginTask {
            future: Box::pin(future),
        })
    }

    /// Clear the form. A login still in flight will not touch the new state.
    pub fn reset(&self) {
        self.inner.dispatch(LoginIntent::Reset);
    }
}

impl std::fmt::Debug for LoginViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginViewModel")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}
