//! Session feature reducer.

use postboard_core::api::{ApiResult, LoginResponse, UserSummary};

use super::SessionManager;
use crate::common::{TaskId, Tasks};
use crate::overlays::FormAction;

/// Applies a `GET /session` result unless the check was superseded by a
/// logout or a login in the meantime. Returns true if the result was applied.
pub fn handle_validation_result(
    session: &mut SessionManager,
    tasks: &mut Tasks,
    task: TaskId,
    result: ApiResult<UserSummary>,
) -> bool {
    if !tasks.session_check.finish_if_active(task) {
        tracing::debug!(task = task.0, "discarding stale session check");
        return false;
    }
    session.resolve(result);
    true
}

/// Applies a login result.
///
/// A successful login authenticates even if the form was cancelled meanwhile,
/// since the backend has already issued the token. The returned action is
/// `None` when the submitting form is gone.
pub fn handle_login_result(
    session: &mut SessionManager,
    tasks: &mut Tasks,
    task: TaskId,
    result: ApiResult<LoginResponse>,
) -> Option<FormAction> {
    let current = tasks.login.finish_if_active(task);
    let action = match result {
        Ok(response) => {
            tasks.session_check.clear();
            session.authenticate(response);
            FormAction::Close
        }
        Err(err) => {
            tracing::warn!(kind = %err.kind, "login failed: {err}");
            FormAction::ShowError(err.message)
        }
    };
    current.then_some(action)
}
