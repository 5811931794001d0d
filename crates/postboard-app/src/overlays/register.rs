use postboard_core::api::DraftRegistration;

use super::{FormDraft, FormState};

pub type RegisterForm = FormState<DraftRegistration>;

impl FormDraft for DraftRegistration {
    const REQUIRED: &'static [&'static str] = &["name", "email", "password"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "email" => Some(&mut self.email),
            "password" => Some(&mut self.password),
            _ => None,
        }
    }
}
