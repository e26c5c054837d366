//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen. It is a
/// pure function `(State, Intent) -> (State, Option<Effect>)`: the returned
/// effect tells the owning view-model what asynchronous work to start.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Work the view-model must perform after a transition.
    type Effect;

    /// Process an intent and return the new state plus an optional effect.
    fn reduce(state: Self::State, intent: Self::Intent) -> (Self::State, Option<Self::Effect>);
}
