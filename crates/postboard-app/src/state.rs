//! Application state.
//!
//! `AppState` is the single owner of session, cache, open form and task
//! bookkeeping. Only the reducer in `update.rs` mutates it.

use postboard_core::api::PostId;
use postboard_core::credentials::TokenStore;

use crate::common::{TaskSeq, Tasks};
use crate::features::gate::{self, Access, NavAction, Target};
use crate::features::posts::{DeleteOutcome, PostCollection};
use crate::features::session::{SessionManager, SessionState};
use crate::overlays::Overlay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line message for the front end (non-form outcomes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub session: SessionManager,
    pub posts: PostCollection,
    pub overlay: Option<Overlay>,
    /// Current view. Protected views requested before the session resolves
    /// stay here until the gate can decide.
    pub route: Target,
    pub notice: Option<Notice>,
    /// Most recent delete result, for front ends that report per request.
    pub last_delete: Option<(PostId, DeleteOutcome)>,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub(crate) initialized: bool,
}

impl AppState {
    pub fn new(store: TokenStore) -> Self {
        Self::with_route(store, Target::Home)
    }

    /// Creates state starting on `route` (e.g. a deep link to the feed).
    pub fn with_route(store: TokenStore, route: Target) -> Self {
        Self {
            session: SessionManager::new(store),
            posts: PostCollection::default(),
            overlay: None,
            route,
            notice: None,
            last_delete: None,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            initialized: false,
        }
    }

    pub fn session_state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn can_access(&self, target: Target) -> Access {
        gate::can_access(self.session.state(), target)
    }

    pub fn nav_actions(&self) -> &'static [NavAction] {
        gate::nav_actions(self.session.state())
    }

    pub fn post_actions_visible(&self) -> bool {
        gate::post_actions_visible(self.session.state())
    }

    /// True while the open form waits on the backend.
    pub fn is_form_pending(&self) -> bool {
        self.overlay
            .as_ref()
            .is_some_and(|o| self.tasks.state(o.kind().task_kind()).is_running())
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Takes the recorded outcome if it belongs to `id`.
    pub fn take_delete_outcome(&mut self, id: PostId) -> Option<DeleteOutcome> {
        match self.last_delete.take() {
            Some((deleted, outcome)) if deleted == id => Some(outcome),
            other => {
                self.last_delete = other;
                None
            }
        }
    }
}
