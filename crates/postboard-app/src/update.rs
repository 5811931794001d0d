//! Reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use postboard_core::api::{ApiResult, Post, PostId};

use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::gate::{Access, Target};
use crate::features::{posts, session};
use crate::overlays::{FormAction, FormKind, Overlay, OverlayExt};
use crate::state::{AppState, Notice};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let before = app.session.state().clone();
    let effects = match event {
        UiEvent::Startup => handle_startup(app),
        UiEvent::RefreshFeed => vec![UiEffect::FetchFeed],
        UiEvent::Navigate(target) => {
            navigate(app, target);
            vec![]
        }
        UiEvent::OpenForm(kind) => {
            open_form(app, kind);
            vec![]
        }
        UiEvent::SetField { name, value } => {
            match app.overlay.as_mut() {
                Some(overlay) => {
                    overlay.set_field(&name, value);
                }
                None => tracing::debug!(field = %name, "no open form"),
            }
            vec![]
        }
        UiEvent::SubmitForm => submit_form(app),
        UiEvent::CancelForm => {
            close_overlay(app);
            vec![]
        }
        UiEvent::DeletePost(id) => request_delete(app, id),
        UiEvent::Logout => {
            app.tasks.session_check.clear();
            app.session.logout();
            app.notice = Some(Notice::info("Logged out."));
            vec![]
        }
        UiEvent::SessionValidated { task, result } => {
            session::handle_validation_result(&mut app.session, &mut app.tasks, task, result);
            vec![]
        }
        UiEvent::LoginFinished { task, result } => {
            let succeeded = result.is_ok();
            let action =
                session::handle_login_result(&mut app.session, &mut app.tasks, task, result);
            if let Some(action) = action {
                app.overlay.apply(FormKind::Login, action);
            }
            if succeeded && let Some(user) = app.session.state().user() {
                app.notice = Some(Notice::info(format!(
                    "Logged in as {}.",
                    user.display_name()
                )));
            }
            vec![]
        }
        UiEvent::RegisterFinished { task, result } => {
            handle_register_result(app, task, result);
            vec![]
        }
        UiEvent::FeedLoaded { result } => {
            if let Some(message) = posts::handle_feed_loaded(&mut app.posts, result) {
                app.notice = Some(Notice::error(message));
            }
            vec![]
        }
        UiEvent::PostCreated { task, result } => {
            handle_create_result(app, task, result);
            vec![]
        }
        UiEvent::PostDeleted { id, result } => {
            let outcome = posts::handle_post_deleted(&mut app.posts, id, result);
            if let Some(message) = outcome.failure() {
                app.notice = Some(Notice::error(message));
            }
            app.last_delete = Some((id, outcome));
            vec![]
        }
    };
    if app.session.state() != &before {
        on_session_changed(app);
    }
    effects
}

fn handle_startup(app: &mut AppState) -> Vec<UiEffect> {
    if app.initialized {
        tracing::debug!("startup already ran");
        return vec![];
    }
    app.initialized = true;

    let mut effects = Vec::with_capacity(2);
    if let Some(token) = app.session.begin() {
        let task = app.task_seq.next_id();
        app.tasks.session_check.start(task);
        effects.push(UiEffect::ValidateSession { task, token });
    }
    effects.push(UiEffect::FetchFeed);
    effects
}

/// Re-checks the current view and open form against the gate.
fn on_session_changed(app: &mut AppState) {
    tracing::debug!(state = app.session.state().label(), "session changed");
    if let Access::Redirect(to) = app.can_access(app.route) {
        tracing::debug!(from = ?app.route, ?to, "redirecting");
        app.route = to;
    }
    if let Some(kind) = OverlayExt::kind(&app.overlay)
        && app.can_access(kind.target()) != Access::Allow
    {
        close_overlay(app);
    }
}

fn navigate(app: &mut AppState, target: Target) {
    if !target.is_route() {
        tracing::debug!(?target, "not a route");
        return;
    }
    match app.can_access(target) {
        Access::Allow => app.route = target,
        Access::Redirect(to) => {
            tracing::debug!(?target, ?to, "redirecting");
            app.route = to;
        }
        Access::Deny => {
            tracing::debug!(?target, "session unresolved, route pending");
            app.route = target;
        }
    }
}

fn open_form(app: &mut AppState, kind: FormKind) {
    match app.can_access(kind.target()) {
        Access::Allow => {}
        Access::Redirect(Target::SignIn) => {
            tracing::debug!(?kind, "sign in required");
            app.route = Target::SignIn;
            return open_form(app, FormKind::Login);
        }
        Access::Redirect(to) => {
            tracing::debug!(?kind, ?to, "form not available");
            app.route = to;
            return;
        }
        Access::Deny => {
            tracing::debug!(?kind, "form denied");
            return;
        }
    }
    if OverlayExt::kind(&app.overlay) == Some(kind) {
        return;
    }
    close_overlay(app);
    app.overlay = Some(Overlay::open(kind));
}

/// Drops the open form and abandons its outstanding submission, if any.
fn close_overlay(app: &mut AppState) {
    if let Some(overlay) = app.overlay.take() {
        app.tasks.state_mut(overlay.kind().task_kind()).clear();
    }
}

fn submit_form(app: &mut AppState) -> Vec<UiEffect> {
    let Some(overlay) = app.overlay.as_mut() else {
        tracing::debug!("submit with no open form");
        return vec![];
    };
    let kind = overlay.kind();
    if app.tasks.state(kind.task_kind()).is_running() {
        tracing::debug!(?kind, "submission already pending");
        return vec![];
    }
    if !overlay.is_submittable() {
        tracing::debug!(?kind, "form incomplete");
        return vec![];
    }

    let task = app.task_seq.next_id();
    let effect = match overlay {
        Overlay::Login(form) => form
            .take_submission()
            .map(|credentials| UiEffect::Login { task, credentials }),
        Overlay::Register(form) => form
            .take_submission()
            .map(|registration| UiEffect::Register { task, registration }),
        Overlay::CreatePost(form) => {
            let Some(token) = app.session.token() else {
                form.error = Some("Log in to create posts.".to_string());
                return vec![];
            };
            let token = token.to_string();
            form.take_submission()
                .map(|draft| UiEffect::CreatePost { task, token, draft })
        }
    };
    match effect {
        Some(effect) => {
            app.tasks.state_mut(kind.task_kind()).start(task);
            vec![effect]
        }
        None => vec![],
    }
}

fn request_delete(app: &mut AppState, id: PostId) -> Vec<UiEffect> {
    let token = match (app.can_access(Target::DeletePost), app.session.token()) {
        (Access::Allow, Some(token)) => token.to_string(),
        _ => {
            app.notice = Some(Notice::error("Log in to delete posts."));
            return vec![];
        }
    };
    if !app.posts.mark_delete_pending(id) {
        tracing::debug!(id, "delete already pending");
        return vec![];
    }
    app.last_delete = None;
    vec![UiEffect::DeletePost { id, token }]
}

fn handle_register_result(app: &mut AppState, task: TaskId, result: ApiResult<()>) {
    let current = app.tasks.register.finish_if_active(task);
    let action = match result {
        Ok(()) => {
            tracing::debug!("registered");
            app.notice = Some(Notice::info("Account created. Log in to continue."));
            FormAction::Close
        }
        Err(err) => {
            tracing::warn!(kind = %err.kind, "registration failed: {err}");
            FormAction::ShowError(err.message)
        }
    };
    apply_form_action(app, FormKind::Register, current, action);
}

fn handle_create_result(app: &mut AppState, task: TaskId, result: ApiResult<Post>) {
    let current = app.tasks.create_post.finish_if_active(task);
    let action = match result {
        Ok(post) => {
            posts::handle_post_created(&mut app.posts, post);
            FormAction::Close
        }
        Err(err) => {
            tracing::warn!(kind = %err.kind, "failed to create post: {err}");
            FormAction::ShowError(err.message)
        }
    };
    apply_form_action(app, FormKind::CreatePost, current, action);
}

/// Routes a result to its form, or to the notice line once the form is gone.
fn apply_form_action(app: &mut AppState, kind: FormKind, current: bool, action: FormAction) {
    if current {
        app.overlay.apply(kind, action);
    } else if let FormAction::ShowError(message) = action {
        app.notice = Some(Notice::error(message));
    }
}
