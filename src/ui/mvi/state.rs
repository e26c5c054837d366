//! Base trait for view state.

/// Marker trait for view-model state.
///
/// States are cloned out to subscribers on every change, so they must be
/// cheap to compare (`PartialEq` suppresses redundant notifications) and
/// fully self-contained.
pub trait UiState: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static {}
