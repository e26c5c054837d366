//! Model-View-Intent (MVI) primitives shared by the view-models.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ (State, Effect?) ──→ View
//!    ↑                          │
//!    └──── completion intent ◄──┘
//! ```
//!
//! - **State**: snapshot of everything a view needs to render
//! - **Intent**: user input or the completion of an effect
//! - **Reducer**: pure transition function; it never performs I/O, it only
//!   describes the effect the view-model should run next

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
