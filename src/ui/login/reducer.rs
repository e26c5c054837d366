//! Reducer for the login form.

use crate::auth::LoginRequest;
use crate::ui::mvi::Reducer;

use super::intent::LoginIntent;
use super::state::{LoginState, LOGIN_SUCCESS_MESSAGE};

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEffect {
    /// Call the login service once with credentials captured now.
    Authenticate {
        generation: u64,
        request: LoginRequest,
    },
}

/// Reducer for login form state transitions.
pub struct LoginReducer;

impl Reducer for LoginReducer {
    type State = LoginState;
    type Intent = LoginIntent;
    type Effect = LoginEffect;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> (Self::State, Option<Self::Effect>) {
        match intent {
            LoginIntent::EmailChanged(text) => {
                state.email = state.policy.sanitize_email(&text);
                (state, None)
            }

            LoginIntent::PasswordChanged(text) => {
                state.password = state.policy.sanitize_password(&text);
                (state, None)
            }

            LoginIntent::SubmitTapped => {
                if state.is_submitting {
                    return (state, None);
                }
                state.is_submitting = true;
                state.generation = state.generation.wrapping_add(1);
                let effect = LoginEffect::Authenticate {
                    generation: state.generation,
                    request: LoginRequest::new(state.email.clone(), state.password.clone()),
                };
                (state, Some(effect))
            }

            LoginIntent::LoginSucceeded { generation, token } => {
                if !is_pending(&state, generation) {
                    return (state, None);
                }
                state.is_submitting = false;
                state.last_error = None;
                state.last_success_message = Some(LOGIN_SUCCESS_MESSAGE.to_string());
                if token.is_some() {
                    state.auth_token = token;
                }
                (state, None)
            }

            LoginIntent::LoginFailed {
                generation,
                message,
            } => {
                if !is_pending(&state, generation) {
                    return (state, None);
                }
                state.is_submitting = false;
                state.last_success_message = None;
                state.last_error = Some(message);
                (state, None)
            }

            LoginIntent::Reset => {
                let generation = state.generation.wrapping_add(1);
                (
                    LoginState {
                        generation,
                        ..LoginState::new(state.policy)
                    },
                    None,
                )
            }
        }
    }
}

/// A completion only applies to the submission that is still outstanding.
fn is_pending(state: &LoginState, generation: u64) -> bool {
    state.is_submitting && state.generation == generation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::login::FormPolicy;

    fn ready() -> LoginState {
        let (state, _) = LoginReducer::reduce(
            LoginState::default(),
            LoginIntent::EmailChanged("j@j.dk".into()),
        );
        let (state, _) = LoginReducer::reduce(state, LoginIntent::PasswordChanged("12345678".into()));
        state
    }

    fn submitting() -> (LoginState, u64) {
        let (state, effect) = LoginReducer::reduce(ready(), LoginIntent::SubmitTapped);
        match effect {
            Some(LoginEffect::Authenticate { generation, .. }) => (state, generation),
            None => panic!("expected Authenticate effect"),
        }
    }

    #[test]
    fn email_is_truncated_to_25_chars() {
        let (state, effect) = LoginReducer::reduce(
            LoginState::default(),
            LoginIntent::EmailChanged("abcdefghijklmnopqrstuvwxyz0123".into()),
        );
        assert_eq!(state.email, "abcdefghijklmnopqrstuvwxy");
        assert!(effect.is_none());
    }

    #[test]
    fn capped_password_variant_truncates_to_nine() {
        let state = LoginState::new(FormPolicy::default().with_password_cap(9));
        let (state, _) = LoginReducer::reduce(state, LoginIntent::PasswordChanged("0123456789".into()));
        assert_eq!(state.password, "012345678");
    }

    #[test]
    fn submit_captures_credentials_and_sets_submitting() {
        let (state, effect) = LoginReducer::reduce(ready(), LoginIntent::SubmitTapped);
        assert!(state.is_submitting);
        assert_eq!(
            effect,
            Some(LoginEffect::Authenticate {
                generation: 1,
                request: LoginRequest::new("j@j.dk", "12345678"),
            })
        );
    }

    #[test]
    fn submit_while_submitting_is_noop() {
        let (state, _) = submitting();
        let (next, effect) = LoginReducer::reduce(state.clone(), LoginIntent::SubmitTapped);
        assert_eq!(next, state);
        assert!(effect.is_none());
    }

    #[test]
    fn success_sets_message_and_token() {
        let (state, generation) = submitting();
        let (state, _) = LoginReducer::reduce(
            state,
            LoginIntent::LoginSucceeded {
                generation,
                token: Some("TheToken".into()),
            },
        );
        assert!(!state.is_submitting);
        assert_eq!(state.auth_token.as_deref(), Some("TheToken"));
        assert_eq!(state.last_success_message.as_deref(), Some(LOGIN_SUCCESS_MESSAGE));
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn success_without_token_keeps_previous_token() {
        let (mut state, generation) = submitting();
        state.auth_token = Some("old".into());
        let (state, _) = LoginReducer::reduce(
            state,
            LoginIntent::LoginSucceeded {
                generation,
                token: None,
            },
        );
        assert_eq!(state.auth_token.as_deref(), Some("old"));
    }

    #[test]
    fn failure_sets_error_and_leaves_token() {
        let (state, generation) = submitting();
        let (state, _) = LoginReducer::reduce(
            state,
            LoginIntent::LoginFailed {
                generation,
                message: "ErrorText".into(),
            },
        );
        assert!(!state.is_submitting);
        assert_eq!(state.last_error.as_deref(), Some("ErrorText"));
        assert_eq!(state.auth_token, None);
        assert_eq!(state.last_success_message, None);
        assert!(state.is_button_enabled());
    }

    #[test]
    fn failure_after_success_clears_success_message() {
        let (state, generation) = submitting();
        let (state, _) = LoginReducer::reduce(
            state,
            LoginIntent::LoginSucceeded {
                generation,
                token: None,
            },
        );
        let (state, effect) = LoginReducer::reduce(state, LoginIntent::SubmitTapped);
        let Some(LoginEffect::Authenticate { generation, .. }) = effect else {
            panic!("expected Authenticate effect");
        };
        let (state, _) = LoginReducer::reduce(
            state,
            LoginIntent::LoginFailed {
                generation,
                message: "ErrorText".into(),
            },
        );
        assert_eq!(state.last_success_message, None);
        assert_eq!(state.last_error.as_deref(), Some("ErrorText"));
    }

    #[test]
    fn stale_completion_is_ignored() {
        let (state, generation) = submitting();
        let (state, _) = LoginReducer::reduce(state, LoginIntent::Reset);
        let (after, _) = LoginReducer::reduce(
            state.clone(),
            LoginIntent::LoginSucceeded {
                generation,
                token: Some("late".into()),
            },
        );
        assert_eq!(after, state);
        assert_eq!(after.auth_token, None);
    }

    #[test]
    fn reset_clears_fields_but_keeps_policy() {
        let policy = FormPolicy::default().with_password_cap(9);
        let (state, _) = LoginReducer::reduce(LoginState::new(policy), LoginIntent::EmailChanged("a@b.cd".into()));
        let (state, _) = LoginReducer::reduce(state, LoginIntent::Reset);
        assert_eq!(state.email, "");
        assert_eq!(state.policy, policy);
        assert_eq!(state.generation, 1);
    }
}
