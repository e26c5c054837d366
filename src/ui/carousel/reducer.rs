//! Reducer for the carousel.

use crate::ui::mvi::Reducer;

use super::intent::CarouselIntent;
use super::state::CarouselState;

/// Side effect requested by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEffect {
    /// Begin a fresh sleep/advance loop tagged with `generation`.
    Schedule { generation: u64 },
    /// Tear down the running loop.
    Cancel,
}

/// Reducer for carousel state transitions.
pub struct CarouselReducer;

impl Reducer for CarouselReducer {
    type State = CarouselState;
    type Intent = CarouselIntent;
    type Effect = CarouselEffect;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> (Self::State, Option<Self::Effect>) {
        match intent {
            CarouselIntent::Start => {
                if state.running {
                    return (state, None);
                }
                state.running = true;
                state.generation = state.generation.wrapping_add(1);
                let generation = state.generation;
                (state, Some(CarouselEffect::Schedule { generation }))
            }

            CarouselIntent::Stop => {
                if !state.running {
                    return (state, None);
                }
                state.running = false;
                state.generation = state.generation.wrapping_add(1);
                (state, Some(CarouselEffect::Cancel))
            }

            CarouselIntent::Tick { generation } => {
                if state.is_current(generation) {
                    state.advance();
                }
                (state, None)
            }
        }
    }
}
