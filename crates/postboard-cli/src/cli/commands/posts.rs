//! Post command handlers.

use anyhow::Result;
use postboard_app::posts::DeleteOutcome;
use postboard_app::{AppRuntime, FormKind, UiEvent};
use postboard_core::api::PostId;

use super::submit_form;

pub fn list(app: &mut AppRuntime) -> Result<()> {
    if !app.state.posts.is_loaded() {
        let reason = app
            .state
            .take_notice()
            .map_or_else(|| "no response from backend".to_string(), |n| n.message);
        anyhow::bail!("{reason}");
    }
    if app.state.posts.is_empty() {
        println!("No posts yet.");
        return Ok(());
    }

    let show_actions = app.state.post_actions_visible();
    for post in app.state.posts.iter() {
        println!("#{} {}", post.id, post.title);
        println!("    {}", post.body);
        println!("    {}", post.image);
        if show_actions {
            println!("    delete: postboard posts delete {}", post.id);
        }
    }
    Ok(())
}

pub async fn create(app: &mut AppRuntime, title: &str, body: &str, image: &str) -> Result<()> {
    require_login(app)?;
    let before = app.state.posts.ids();
    submit_form(
        app,
        FormKind::CreatePost,
        &[("title", title), ("body", body), ("image", image)],
    )
    .await?;

    match app.state.posts.iter().find(|p| !before.contains(&p.id)) {
        Some(post) => println!("✓ Created post #{}", post.id),
        None => println!("✓ Post created"),
    }
    Ok(())
}

pub async fn delete(app: &mut AppRuntime, id: PostId) -> Result<()> {
    require_login(app)?;
    if let Some(stale) = app.state.take_notice() {
        tracing::debug!(notice = %stale.message, "dropping startup notice");
    }

    app.run(UiEvent::DeletePost(id)).await;

    match app.state.take_delete_outcome(id) {
        Some(DeleteOutcome::Deleted) => println!("✓ Deleted post #{id}"),
        Some(DeleteOutcome::AlreadyGone) => println!("Post #{id} was already deleted."),
        Some(DeleteOutcome::Failed(message)) => anyhow::bail!("{message}"),
        None => anyhow::bail!("Delete of post #{id} did not complete"),
    }
    Ok(())
}

fn require_login(app: &AppRuntime) -> Result<()> {
    if !app.state.session_state().is_authenticated() {
        anyhow::bail!("Not logged in. Run `postboard login` first.");
    }
    Ok(())
}
