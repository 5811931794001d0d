//! Post collection reducer.
//!
//! Handlers return a message for the notice line when something the user
//! should see went wrong.

use postboard_core::api::{ApiResult, DeleteResponse, Post, PostId};

use super::{Insertion, PostCollection};

/// Replaces the cache with a fetched feed. On failure the cache is untouched.
pub fn handle_feed_loaded(
    posts: &mut PostCollection,
    result: ApiResult<Vec<Post>>,
) -> Option<String> {
    match result {
        Ok(feed) => {
            let dropped = posts.replace_all(feed);
            if dropped > 0 {
                tracing::warn!(dropped, "feed contained duplicate post ids");
            }
            tracing::debug!(count = posts.len(), "feed loaded");
            None
        }
        Err(err) => {
            tracing::warn!(kind = %err.kind, "failed to load feed: {err}");
            Some(format!("Could not load posts: {err}"))
        }
    }
}

/// Adds a confirmed post to the cache.
pub fn handle_post_created(posts: &mut PostCollection, post: Post) {
    let id = post.id;
    if posts.append(post) == Insertion::Replaced {
        tracing::debug!(id, "created post already present, replaced");
    } else {
        tracing::debug!(id, "post created");
    }
}

/// What a delete request ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend confirmed the delete.
    Deleted,
    /// The backend no longer knows the post.
    AlreadyGone,
    /// Notice line message.
    Failed(String),
}

impl DeleteOutcome {
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Removes a confirmed deletion from the cache.
///
/// The payload id identifies the removed entry; an unparseable payload falls
/// back to the requested id. A not-found failure means the post is already
/// gone and is only logged.
pub fn handle_post_deleted(
    posts: &mut PostCollection,
    requested: PostId,
    result: ApiResult<DeleteResponse>,
) -> DeleteOutcome {
    posts.finish_delete(requested);
    match result {
        Ok(response) => {
            let confirmed = match response.payload.as_ref().map(|p| (p, p.as_post_id())) {
                Some((_, Some(id))) => id,
                Some((payload, None)) => {
                    tracing::warn!(requested, ?payload, "unparseable delete payload");
                    requested
                }
                None => requested,
            };
            if confirmed != requested {
                tracing::warn!(requested, confirmed, "delete payload id differs from request");
            }
            if posts.remove(confirmed).is_none() {
                tracing::debug!(id = confirmed, "deleted post was not cached");
            }
            DeleteOutcome::Deleted
        }
        Err(err) if err.is_not_found() => {
            tracing::warn!(id = requested, "post already deleted: {err}");
            DeleteOutcome::AlreadyGone
        }
        Err(err) => {
            tracing::warn!(id = requested, kind = %err.kind, "failed to delete post: {err}");
            DeleteOutcome::Failed(format!("Could not delete post {requested}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use postboard_core::api::{ApiError, ApiErrorKind, PayloadId};

    use super::*;

    fn post(id: PostId) -> Post {
        Post {
            id,
            title: format!("t{id}"),
            body: "b".to_string(),
            image: "i".to_string(),
        }
    }

    fn loaded(ids: &[PostId]) -> PostCollection {
        let mut posts = PostCollection::default();
        posts.replace_all(ids.iter().copied().map(post).collect());
        posts
    }

    fn deleted(payload: Option<PayloadId>) -> ApiResult<DeleteResponse> {
        Ok(DeleteResponse { payload })
    }

    #[test]
    fn test_failed_feed_keeps_cache() {
        let mut posts = loaded(&[1, 2]);
        let notice = handle_feed_loaded(
            &mut posts,
            Err(ApiError::new(ApiErrorKind::Network, "offline")),
        );
        assert!(notice.is_some());
        assert_eq!(posts.ids(), vec![1, 2]);
    }

    #[test]
    fn test_feed_then_create_appends() {
        let mut posts = PostCollection::default();
        assert!(handle_feed_loaded(&mut posts, Ok(vec![post(1), post(2)])).is_none());
        handle_post_created(&mut posts, post(3));
        assert_eq!(posts.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_delete_uses_payload_id() {
        let mut posts = loaded(&[1, 2, 3]);
        posts.mark_delete_pending(2);
        let payload = Some(PayloadId::Text("2".into()));
        let outcome = handle_post_deleted(&mut posts, 2, deleted(payload));
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(posts.ids(), vec![1, 3]);
        assert!(!posts.is_delete_pending(2));
    }

    #[test]
    fn test_delete_of_uncached_post_still_deleted() {
        let mut posts = PostCollection::default();
        let outcome = handle_post_deleted(&mut posts, 2, deleted(Some(PayloadId::Number(2))));
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(posts.is_empty());
    }

    #[test]
    fn test_delete_falls_back_to_requested_id() {
        let mut posts = loaded(&[1, 2]);
        handle_post_deleted(&mut posts, 1, deleted(Some(PayloadId::Text("one".into()))));
        assert_eq!(posts.ids(), vec![2]);

        let mut posts = loaded(&[1, 2]);
        handle_post_deleted(&mut posts, 2, deleted(None));
        assert_eq!(posts.ids(), vec![1]);
    }

    #[test]
    fn test_delete_not_found_is_silent() {
        let mut posts = loaded(&[1]);
        let outcome = handle_post_deleted(&mut posts, 7, Err(ApiError::http_status(404, "")));
        assert_eq!(outcome, DeleteOutcome::AlreadyGone);
        assert_eq!(posts.ids(), vec![1]);
    }

    #[test]
    fn test_delete_failure_keeps_cache() {
        let mut posts = loaded(&[1]);
        let outcome = handle_post_deleted(&mut posts, 1, Err(ApiError::http_status(500, "")));
        assert!(outcome.failure().is_some());
        assert_eq!(posts.ids(), vec![1]);
    }
}
