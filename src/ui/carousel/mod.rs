//! Timed carousel feature module.
//!
//! A fixed list of cards whose current index advances once per interval
//! while running. Time comes exclusively from an injected
//! [`Clock`](crate::clock::Clock).

mod intent;
mod reducer;
mod state;
mod view_model;

pub use intent::CarouselIntent;
pub use reducer::{CarouselEffect, CarouselReducer};
pub use state::CarouselState;
pub use view_model::CarouselViewModel;
