//! State for the carousel.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ui::mvi::UiState;

/// Snapshot of the carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    items: Arc<[String]>,
    current_index: usize,
    pub running: bool,
    /// Tag of the current run; bumped on every effective start or stop.
    pub generation: u64,
}

impl UiState for CarouselState {}

impl CarouselState {
    /// Fails with [`Error::InvalidArgument`] when `items` is empty.
    pub fn new(items: Vec<String>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::invalid_argument(
                "carousel needs at least one item",
            ));
        }
        Ok(Self {
            items: items.into(),
            current_index: 0,
            running: false,
            generation: 0,
        })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_card(&self) -> &str {
        &self.items[self.current_index]
    }

    pub(super) fn advance(&mut self) {
        self.current_index = (self.current_index + 1) % self.items.len();
    }

    /// True while the loop started under `generation` is the live one.
    pub fn is_current(&self, generation: u64) -> bool {
        self.running && self.generation == generation
    }
}
