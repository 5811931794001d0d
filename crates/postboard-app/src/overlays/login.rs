use postboard_core::api::DraftCredentials;

use super::{FormDraft, FormState};

pub type LoginForm = FormState<DraftCredentials>;

impl FormDraft for DraftCredentials {
    const REQUIRED: &'static [&'static str] = &["email", "password"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "email" => Some(&mut self.email),
            "password" => Some(&mut self.password),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_email_and_password() {
        let mut form = LoginForm::default();
        assert!(!form.is_submittable());
        form.set_field("email", "jane@mail.com");
        assert!(!form.is_submittable());
        form.set_field("password", "pw");
        assert!(form.is_submittable());
        form.set_field("email", "");
        assert!(!form.is_submittable());
        assert!(form.take_submission().is_none());
    }

    #[test]
    fn test_unknown_field_ignored() {
        let mut form = LoginForm::default();
        assert!(!form.set_field("name", "Jane"));
        assert_eq!(form.draft, DraftCredentials::default());
    }
}
