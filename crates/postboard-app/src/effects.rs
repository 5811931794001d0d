//! UI effect types.
//!
//! Effects are backend calls returned by the reducer for the runtime to
//! execute. Each one reports back with exactly one `UiEvent`.

use postboard_core::api::{DraftCredentials, DraftPost, DraftRegistration, PostId};

use crate::common::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// `GET /session` with the stored token.
    ValidateSession { task: TaskId, token: String },
    Login {
        task: TaskId,
        credentials: DraftCredentials,
    },
    Register {
        task: TaskId,
        registration: DraftRegistration,
    },
    FetchFeed,
    CreatePost {
        task: TaskId,
        token: String,
        draft: DraftPost,
    },
    DeletePost { id: PostId, token: String },
}

impl UiEffect {
    /// Short name for logs (`Debug` would include the token).
    pub fn name(&self) -> &'static str {
        match self {
            UiEffect::ValidateSession { .. } => "validate_session",
            UiEffect::Login { .. } => "login",
            UiEffect::Register { .. } => "register",
            UiEffect::FetchFeed => "fetch_feed",
            UiEffect::CreatePost { .. } => "create_post",
            UiEffect::DeletePost { .. } => "delete_post",
        }
    }
}
