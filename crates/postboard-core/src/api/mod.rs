//! HTTP client for the posts backend.
//!
//! Endpoints (relative to the configured base URL):
//! - `POST /auth/login`, `POST /auth/register`
//! - `GET /session` (bearer)
//! - `GET /posts`, `POST /posts` (bearer), `DELETE /posts/:id` (bearer)

mod error;
mod types;

pub use error::{ApiError, ApiErrorKind, ApiResult};
use serde::de::DeserializeOwned;
pub use types::{
    DeleteResponse, DraftCredentials, DraftPost, DraftRegistration, LoginResponse, PayloadId,
    Post, PostId, SessionResponse, UserSummary,
};

/// Standard User-Agent header for postboard API requests.
pub const USER_AGENT: &str = concat!("postboard/", env!("CARGO_PKG_VERSION"));

/// Posts backend client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url` (no trailing slash expected).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("User-Agent", USER_AGENT)
    }

    fn authed(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
    ) -> reqwest::RequestBuilder {
        self.request(method, path)
            .header("Authorization", format!("Bearer {token}"))
    }

    /// Exchanges credentials for a session token and user.
    ///
    /// # Errors
    /// Returns a classified error on transport failure or a non-2xx status.
    pub async fn login(&self, credentials: &DraftCredentials) -> ApiResult<LoginResponse> {
        let builder = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(credentials);
        send_json(builder).await
    }

    /// Registers a new account. No token is issued.
    ///
    /// # Errors
    /// Returns a classified error on transport failure or a non-2xx status.
    pub async fn register(&self, registration: &DraftRegistration) -> ApiResult<()> {
        let builder = self
            .request(reqwest::Method::POST, "/auth/register")
            .json(registration);
        send(builder).await.map(|_| ())
    }

    /// Validates `token` and returns the user it belongs to.
    ///
    /// # Errors
    /// Returns `Unauthorized` for a rejected token, or another classified error.
    pub async fn session(&self, token: &str) -> ApiResult<UserSummary> {
        let builder = self.authed(reqwest::Method::GET, "/session", token);
        let response: SessionResponse = send_json(builder).await?;
        Ok(response.user)
    }

    /// Fetches the full public post feed.
    ///
    /// # Errors
    /// Returns a classified error on transport failure or a non-2xx status.
    pub async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        send_json(self.request(reqwest::Method::GET, "/posts")).await
    }

    /// Creates a post and returns it with its backend-assigned id.
    ///
    /// # Errors
    /// Returns a classified error on transport failure or a non-2xx status.
    pub async fn create_post(&self, token: &str, draft: &DraftPost) -> ApiResult<Post> {
        let builder = self
            .authed(reqwest::Method::POST, "/posts", token)
            .json(draft);
        send_json(builder).await
    }

    /// Deletes a post by id.
    ///
    /// # Errors
    /// Returns `NotFound` when the backend no longer has the post, or another classified error.
    pub async fn delete_post(&self, token: &str, id: PostId) -> ApiResult<DeleteResponse> {
        let path = format!("/posts/{id}");
        send_json(self.authed(reqwest::Method::DELETE, &path, token)).await
    }
}

async fn send(builder: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
    let response = builder.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::http_status(status.as_u16(), &body));
    }
    Ok(response)
}

async fn send_json<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> ApiResult<T> {
    let response = send(builder).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::decode(format!("Failed to parse response: {e}")))
}
