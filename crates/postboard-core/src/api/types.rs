//! Wire types for the posts backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned post identifier.
pub type PostId = i64;

/// A post as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub image: String,
}

/// Minimal identity attached to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserSummary {
    /// Name for display: name, then email, then `user #<id>`.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .filter(|s| !s.is_empty())
            .map_or_else(|| format!("user #{}", self.id), ToString::to_string)
    }
}

/// Login form input, sent as the `POST /auth/login` body.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for DraftCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Register form input, sent as the `POST /auth/register` body.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for DraftRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftRegistration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Create-post form input, sent as the `POST /posts` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftPost {
    pub title: String,
    pub body: String,
    pub image: String,
}

/// `POST /auth/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

/// `GET /session` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub user: UserSummary,
}

/// Id echoed back by `DELETE /posts/:id`, either as a number or a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PayloadId {
    Number(PostId),
    Text(String),
}

impl PayloadId {
    /// Exact integer value of the payload. Strings must be plain decimal integers.
    pub fn as_post_id(&self) -> Option<PostId> {
        match self {
            PayloadId::Number(id) => Some(*id),
            PayloadId::Text(text) => {
                let digits = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
                if digits { text.parse().ok() } else { None }
            }
        }
    }
}

/// `DELETE /posts/:id` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub payload: Option<PayloadId>,
}
