//! Post collection feature slice.
//!
//! The cache mirrors the backend feed and only changes in response to
//! confirmed backend results.

mod state;
mod update;

pub use state::{Insertion, PostCollection};
pub use update::{DeleteOutcome, handle_feed_loaded, handle_post_created, handle_post_deleted};
