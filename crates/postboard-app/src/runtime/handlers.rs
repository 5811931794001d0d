//! Effect handlers.
//!
//! Pure async functions: perform one backend call and return the `UiEvent`
//! carrying its result. They never touch `AppState`.

use postboard_core::api::{ApiClient, DraftCredentials, DraftPost, DraftRegistration, PostId};

use crate::common::TaskId;
use crate::events::UiEvent;

pub async fn validate_session(client: ApiClient, task: TaskId, token: String) -> UiEvent {
    let result = client.session(&token).await;
    UiEvent::SessionValidated { task, result }
}

pub async fn login(client: ApiClient, task: TaskId, credentials: DraftCredentials) -> UiEvent {
    let result = client.login(&credentials).await;
    UiEvent::LoginFinished { task, result }
}

pub async fn register(
    client: ApiClient,
    task: TaskId,
    registration: DraftRegistration,
) -> UiEvent {
    let result = client.register(&registration).await;
    UiEvent::RegisterFinished { task, result }
}

pub async fn fetch_feed(client: ApiClient) -> UiEvent {
    let result = client.list_posts().await;
    UiEvent::FeedLoaded { result }
}

pub async fn create_post(
    client: ApiClient,
    task: TaskId,
    token: String,
    draft: DraftPost,
) -> UiEvent {
    let result = client.create_post(&token, &draft).await;
    UiEvent::PostCreated { task, result }
}

pub async fn delete_post(client: ApiClient, id: PostId, token: String) -> UiEvent {
    let result = client.delete_post(&token, id).await;
    UiEvent::PostDeleted { id, result }
}
