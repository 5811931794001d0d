//! Headless Postboard application core.
//!
//! Elm-style split:
//! - `state`: everything the front end reads (`AppState`)
//! - `update`: the reducer; the only place state changes
//! - `effects`: backend calls the reducer asks for
//! - `runtime`: executes effects and feeds their results back as events

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod runtime;
pub mod state;
pub mod update;

pub use events::UiEvent;
pub use features::{gate, posts, session};
pub use overlays::{FormKind, Overlay};
pub use runtime::AppRuntime;
pub use state::{AppState, Notice, NoticeLevel};
