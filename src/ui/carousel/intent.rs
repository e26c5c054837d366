//! Intents for the carousel.

use crate::ui::mvi::Intent;

/// Intents that can be dispatched to the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselIntent {
    Start,
    Stop,
    /// One full interval elapsed in the loop started under `generation`.
    Tick { generation: u64 },
}

impl Intent for CarouselIntent {}
