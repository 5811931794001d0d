//! Application runtime: executes effects and feeds results back.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers run as spawned tokio tasks and send their `UiEvent` to `inbox_tx`
//! - A handler that panics sends `None` so it is still counted as finished
//! - `settle` drains `inbox_rx` until no spawned effect is outstanding
//! - Each drained event goes back through `update`, possibly spawning more
//!
//! The runtime must be driven from inside a tokio runtime.

mod handlers;

use std::future::Future;

use postboard_core::api::ApiClient;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::update;

pub struct AppRuntime {
    /// Application state.
    pub state: AppState,
    client: ApiClient,
    /// Inbox sender - handlers send events here.
    inbox_tx: mpsc::UnboundedSender<Option<UiEvent>>,
    /// Inbox receiver - drained by `settle`.
    inbox_rx: mpsc::UnboundedReceiver<Option<UiEvent>>,
    /// Spawned effects whose event has not been received yet.
    in_flight: usize,
}

impl AppRuntime {
    pub fn new(state: AppState, client: ApiClient) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state,
            client,
            inbox_tx,
            inbox_rx,
            in_flight: 0,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Number of backend calls still running.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Runs `event` through the reducer and starts the resulting effects.
    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Processes results until every spawned effect has reported back.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(outcome) = self.inbox_rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            if let Some(event) = outcome {
                self.dispatch(event);
            }
        }
    }

    /// `dispatch` followed by `settle`.
    pub async fn run(&mut self, event: UiEvent) {
        self.dispatch(event);
        self.settle().await;
    }

    /// Spawns an async effect and routes its result event to the inbox.
    fn spawn_effect<F, Fut>(&mut self, f: F)
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let client = self.client.clone();
        self.in_flight += 1;
        let handle = tokio::spawn(f(client));
        tokio::spawn(async move {
            let outcome = match handle.await {
                Ok(event) => Some(event),
                Err(err) => {
                    tracing::error!("effect task failed: {err}");
                    None
                }
            };
            let _ = tx.send(outcome);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        tracing::debug!(effect = effect.name(), "executing effect");
        match effect {
            UiEffect::ValidateSession { task, token } => {
                self.spawn_effect(move |client| handlers::validate_session(client, task, token));
            }
            UiEffect::Login { task, credentials } => {
                self.spawn_effect(move |client| handlers::login(client, task, credentials));
            }
            UiEffect::Register { task, registration } => {
                self.spawn_effect(move |client| handlers::register(client, task, registration));
            }
            UiEffect::FetchFeed => {
                self.spawn_effect(handlers::fetch_feed);
            }
            UiEffect::CreatePost { task, token, draft } => {
                self.spawn_effect(move |client| handlers::create_post(client, task, token, draft));
            }
            UiEffect::DeletePost { id, token } => {
                self.spawn_effect(move |client| handlers::delete_post(client, id, token));
            }
        }
    }
}
