//! Auth command handlers.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use postboard_app::session::SessionState;
use postboard_app::{AppRuntime, AppState, FormKind, UiEvent, update};
use postboard_core::credentials::{TokenStore, mask_token};

use super::{print_notice, submit_form};

pub async fn login(app: &mut AppRuntime, email: &str, password: Option<String>) -> Result<()> {
    if let Some(user) = app.state.session_state().user() {
        println!("Already logged in as {}.", user.display_name());
        println!("Run `postboard logout` first to switch accounts.");
        return Ok(());
    }

    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    submit_form(
        app,
        FormKind::Login,
        &[("email", email), ("password", password.as_str())],
    )
    .await?;

    let token = app.state.session.store().load().map(mask_token);
    print_notice(app);
    if let Some(token) = token {
        println!("  Token: {token}");
    }
    if let Some(path) = app.state.session.store().path() {
        println!("  Session saved to: {}", path.display());
    }
    Ok(())
}

pub async fn register(
    app: &mut AppRuntime,
    name: &str,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    submit_form(
        app,
        FormKind::Register,
        &[("name", name), ("email", email), ("password", password.as_str())],
    )
    .await?;
    print_notice(app);
    Ok(())
}

/// Clears the stored session. Never contacts the backend.
pub fn logout() {
    let mut state = AppState::new(TokenStore::open_default());
    let had_session = state.session.store().load().is_some();
    let path = state.session.store().path().map(Path::to_path_buf);

    update::update(&mut state, UiEvent::Logout);

    if had_session {
        println!("✓ Logged out");
        if let Some(path) = path {
            println!("  Session removed from: {}", path.display());
        }
    } else {
        println!("Not logged in (no session found).");
    }
}

pub fn whoami(app: &AppRuntime) {
    match app.state.session_state() {
        SessionState::Authenticated(user) => {
            println!("{}", user.display_name());
            if let Some(email) = &user.email {
                println!("  Email: {email}");
            }
            println!("  User id: {}", user.id);
        }
        _ if app.state.session.store().load().is_some() => {
            println!("Stored session is no longer valid. Run `postboard login` again.");
        }
        _ => println!("Not logged in."),
    }
}

/// Reads one line from stdin, keeping everything but the line terminator.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush()?;
    }
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    let password = line.trim_end_matches(['\n', '\r']).to_string();
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }
    Ok(password)
}
