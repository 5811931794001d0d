//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod posts;

use anyhow::Result;
use postboard_app::overlays::OverlayExt;
use postboard_app::{AppRuntime, FormKind, NoticeLevel, UiEvent};

/// Drives one form through open, fill and submit, then waits for the result.
///
/// Fails with the form's error if the backend rejected the submission.
async fn submit_form(app: &mut AppRuntime, kind: FormKind, fields: &[(&str, &str)]) -> Result<()> {
    app.dispatch(UiEvent::OpenForm(kind));
    if app.state.overlay.kind() != Some(kind) {
        anyhow::bail!("{} is not available in the current session", form_label(kind));
    }
    for (name, value) in fields {
        app.dispatch(UiEvent::set_field(*name, *value));
    }
    if !app.state.overlay.as_ref().is_some_and(|o| o.is_submittable()) {
        anyhow::bail!("All {} fields are required", form_label(kind));
    }

    app.run(UiEvent::SubmitForm).await;
    match &app.state.overlay {
        None => Ok(()),
        Some(overlay) => {
            let error = overlay.error().unwrap_or("no response from backend");
            anyhow::bail!("{} failed: {error}", form_label(kind))
        }
    }
}

fn form_label(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Login => "Login",
        FormKind::Register => "Registration",
        FormKind::CreatePost => "Create post",
    }
}

/// Prints and clears the pending notice. Error notices go to stderr.
fn print_notice(app: &mut AppRuntime) {
    if let Some(notice) = app.state.take_notice() {
        match notice.level {
            NoticeLevel::Info => println!("{}", notice.message),
            NoticeLevel::Error => eprintln!("{}", notice.message),
        }
    }
}
