//! Session feature slice.
//!
//! `SessionManager` pairs the `SessionState` machine with the token store so
//! that `Authenticated` is never reachable without a stored token.

mod state;
mod update;

pub use state::{SessionManager, SessionState};
pub use update::{handle_login_result, handle_validation_result};
