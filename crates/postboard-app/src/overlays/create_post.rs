use postboard_core::api::DraftPost;

use super::{FormDraft, FormState};

pub type CreatePostForm = FormState<DraftPost>;

impl FormDraft for DraftPost {
    const REQUIRED: &'static [&'static str] = &["title", "body", "image"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "body" => Some(&self.body),
            "image" => Some(&self.image),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "title" => Some(&mut self.title),
            "body" => Some(&mut self.body),
            "image" => Some(&mut self.image),
            _ => None,
        }
    }
}
