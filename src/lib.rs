//! View-models for a login screen: a validated login form with single-flight
//! submission and a timed card carousel.
//!
//! Both components follow the MVI layout in [`ui::mvi`]: intents are reduced
//! into new states, and side effects (the login call, the carousel's sleep
//! loop) run through capabilities injected at construction.

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;

pub use error::{Error, Result};
