//! View-models for the login screen.

pub mod carousel;
pub mod login;
pub mod mvi;
