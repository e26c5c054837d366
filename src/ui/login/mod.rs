//! Login form feature module.
//!
//! Email/password entry with sanitizing mutators, a derived submit-button
//! flag and single-flight submission through an injected
//! [`LoginService`](crate::auth::LoginService).

mod intent;
mod reducer;
mod state;
mod view_model;

pub use intent::LoginIntent;
pub use reducer::{LoginEffect, LoginReducer};
pub use state::{FormPolicy, LoginState, PasswordPolicy, LOGIN_SUCCESS_MESSAGE};
pub use view_model::{LoginTask, LoginViewModel};
