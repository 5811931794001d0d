//! UI events consumed by the reducer.
//!
//! Front-end intents and backend results share one type so that every state
//! change goes through `update`.

use postboard_core::api::{
    ApiResult, DeleteResponse, LoginResponse, Post, PostId, UserSummary,
};

use crate::common::TaskId;
use crate::features::gate::Target;
use crate::overlays::FormKind;

#[derive(Debug)]
pub enum UiEvent {
    /// Restore the session and load the feed. Idempotent.
    Startup,
    /// Re-fetch the feed.
    RefreshFeed,
    Navigate(Target),
    OpenForm(FormKind),
    SetField { name: String, value: String },
    SubmitForm,
    CancelForm,
    DeletePost(PostId),
    Logout,

    SessionValidated {
        task: TaskId,
        result: ApiResult<UserSummary>,
    },
    LoginFinished {
        task: TaskId,
        result: ApiResult<LoginResponse>,
    },
    RegisterFinished {
        task: TaskId,
        result: ApiResult<()>,
    },
    FeedLoaded {
        result: ApiResult<Vec<Post>>,
    },
    PostCreated {
        task: TaskId,
        result: ApiResult<Post>,
    },
    PostDeleted {
        id: PostId,
        result: ApiResult<DeleteResponse>,
    },
}

impl UiEvent {
    pub fn set_field(name: impl Into<String>, value: impl Into<String>) -> Self {
        UiEvent::SetField {
            name: name.into(),
            value: value.into(),
        }
    }
}
