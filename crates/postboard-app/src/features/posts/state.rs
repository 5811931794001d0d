use std::collections::HashSet;

use postboard_core::api::{Post, PostId};

/// How `PostCollection::append` placed a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Appended,
    Replaced,
}

/// Ordered, id-unique list of posts in feed order.
#[derive(Debug, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
    loaded: bool,
    pending_deletes: HashSet<PostId>,
}

impl PostCollection {
    /// Replaces the whole collection. Duplicate ids keep their first
    /// occurrence; returns how many were dropped.
    pub fn replace_all(&mut self, posts: Vec<Post>) -> usize {
        let mut seen = HashSet::with_capacity(posts.len());
        let total = posts.len();
        self.posts = posts.into_iter().filter(|p| seen.insert(p.id)).collect();
        self.loaded = true;
        total - self.posts.len()
    }

    /// Appends `post`, or replaces the entry with the same id in place.
    pub fn append(&mut self, post: Post) -> Insertion {
        if let Some(existing) = self.posts.iter_mut().find(|p| p.id == post.id) {
            *existing = post;
            Insertion::Replaced
        } else {
            self.posts.push(post);
            Insertion::Appended
        }
    }

    /// Removes the post with exactly this id.
    pub fn remove(&mut self, id: PostId) -> Option<Post> {
        let index = self.posts.iter().position(|p| p.id == id)?;
        Some(self.posts.remove(index))
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PostId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    pub fn ids(&self) -> Vec<PostId> {
        self.posts.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// True once a feed response has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_delete_pending(&self, id: PostId) -> bool {
        self.pending_deletes.contains(&id)
    }

    /// Marks a delete for `id` as in flight. False if one already is.
    pub fn mark_delete_pending(&mut self, id: PostId) -> bool {
        self.pending_deletes.insert(id)
    }

    pub fn finish_delete(&mut self, id: PostId) {
        self.pending_deletes.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: PostId, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            body: "body".to_string(),
            image: "https://img.example/x.png".to_string(),
        }
    }

    #[test]
    fn test_replace_all_drops_duplicate_ids() {
        let mut posts = PostCollection::default();
        assert!(!posts.is_loaded());

        let dropped = posts.replace_all(vec![post(1, "a"), post(2, "b"), post(1, "again")]);
        assert_eq!(dropped, 1);
        assert_eq!(posts.ids(), vec![1, 2]);
        assert_eq!(posts.get(1).map(|p| p.title.as_str()), Some("a"));
        assert!(posts.is_loaded());
    }

    #[test]
    fn test_append_keeps_ids_unique() {
        let mut posts = PostCollection::default();
        posts.replace_all(vec![post(1, "a"), post(2, "b")]);

        assert_eq!(posts.append(post(3, "c")), Insertion::Appended);
        assert_eq!(posts.append(post(2, "b2")), Insertion::Replaced);
        assert_eq!(posts.ids(), vec![1, 2, 3]);
        assert_eq!(posts.get(2).map(|p| p.title.as_str()), Some("b2"));
    }

    #[test]
    fn test_remove_exact_id() {
        let mut posts = PostCollection::default();
        posts.replace_all(vec![post(1, "a"), post(12, "b")]);

        assert!(posts.remove(2).is_none());
        assert_eq!(posts.remove(12).map(|p| p.id), Some(12));
        assert!(posts.remove(12).is_none());
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_pending_delete_guard() {
        let mut posts = PostCollection::default();
        assert!(posts.mark_delete_pending(4));
        assert!(!posts.mark_delete_pending(4));
        assert!(posts.is_delete_pending(4));
        posts.finish_delete(4);
        assert!(!posts.is_delete_pending(4));
        assert!(posts.mark_delete_pending(4));
    }
}
