//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are either user input (text edits, button taps, start/stop) or
/// the result of an effect coming back (a login response, a clock tick).
/// Effect results carry the generation they were issued under so reducers
/// can drop stale ones.
pub trait Intent: Send + 'static {}
