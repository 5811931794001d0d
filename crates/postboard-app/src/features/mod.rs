//! Feature slices (state/update per slice).

pub mod gate;
pub mod posts;
pub mod session;
