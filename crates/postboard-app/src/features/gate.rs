//! Access gate and navigation visibility.
//!
//! Everything here is a pure function of the current `SessionState` and is
//! re-evaluated on each call.

use crate::features::session::SessionState;

/// Views and actions whose reachability depends on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Home,
    Feed,
    SignIn,
    Register,
    CreatePost,
    DeletePost,
    Logout,
}

impl Target {
    /// True for navigable views, false for actions.
    pub fn is_route(self) -> bool {
        !matches!(self, Target::DeletePost | Target::Logout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Target),
    Deny,
}

/// Decides whether `target` is reachable in `session`.
///
/// Protected views stay `Deny` while the session is unresolved so that a
/// stored token is neither trusted nor bounced to sign-in before the check
/// completes.
pub fn can_access(session: &SessionState, target: Target) -> Access {
    match (target, session) {
        (Target::Home | Target::Logout, _)
        | (
            Target::Feed | Target::CreatePost | Target::DeletePost,
            SessionState::Authenticated(_),
        ) => Access::Allow,
        (Target::Feed | Target::CreatePost, SessionState::Unauthenticated) => {
            Access::Redirect(Target::SignIn)
        }
        (Target::Feed | Target::CreatePost | Target::DeletePost, _) => Access::Deny,
        (Target::SignIn | Target::Register, SessionState::Authenticated(_)) => {
            Access::Redirect(Target::Feed)
        }
        (Target::SignIn | Target::Register, _) => Access::Allow,
    }
}

/// Entries shown in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Login,
    Register,
    CreatePost,
    Logout,
}

impl NavAction {
    pub fn label(self) -> &'static str {
        match self {
            NavAction::Login => "Login",
            NavAction::Register => "Register",
            NavAction::CreatePost => "Create Post",
            NavAction::Logout => "Log Out",
        }
    }
}

pub fn nav_actions(session: &SessionState) -> &'static [NavAction] {
    if session.is_authenticated() {
        &[NavAction::CreatePost, NavAction::Logout]
    } else {
        &[NavAction::Login, NavAction::Register]
    }
}

/// Whether per-post actions (delete) are shown.
pub fn post_actions_visible(session: &SessionState) -> bool {
    session.is_authenticated()
}
