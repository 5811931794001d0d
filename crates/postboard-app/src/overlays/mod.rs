//! Modal forms.
//!
//! At most one form is open at a time (`AppState::overlay`). Each form owns a
//! draft, a display error and nothing else; whether it is waiting on the
//! backend is tracked in `Tasks` under the form's `TaskKind`.
//!
//! - `login.rs`: email + password
//! - `register.rs`: name + email + password
//! - `create_post.rs`: title + body + image

pub mod create_post;
pub mod login;
pub mod register;

pub use create_post::CreatePostForm;
pub use login::LoginForm;
pub use register::RegisterForm;

use crate::common::TaskKind;
use crate::features::gate::Target;

/// Field access for a form draft.
pub trait FormDraft: Clone + Default {
    /// Fields that must be non-empty before submitting.
    const REQUIRED: &'static [&'static str];

    fn field(&self, name: &str) -> Option<&str>;

    fn field_mut(&mut self, name: &str) -> Option<&mut String>;
}

/// Draft plus display error for one open form.
#[derive(Debug, Clone, Default)]
pub struct FormState<D> {
    pub draft: D,
    pub error: Option<String>,
}

impl<D: FormDraft> FormState<D> {
    /// Sets a field. Unknown names are ignored; returns whether a field was set.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        if let Some(slot) = self.draft.field_mut(name) {
            *slot = value.into();
            true
        } else {
            tracing::debug!(field = name, "ignoring unknown form field");
            false
        }
    }

    /// Every required field is non-empty. Whitespace counts as content.
    pub fn is_submittable(&self) -> bool {
        D::REQUIRED
            .iter()
            .all(|name| self.draft.field(name).is_some_and(|v| !v.is_empty()))
    }

    /// Draft to send, clearing any previous error. `None` if not submittable.
    pub fn take_submission(&mut self) -> Option<D> {
        if !self.is_submittable() {
            return None;
        }
        self.error = None;
        Some(self.draft.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Login,
    Register,
    CreatePost,
}

impl FormKind {
    /// Route the form lives on, for the access gate.
    pub fn target(self) -> Target {
        match self {
            FormKind::Login => Target::SignIn,
            FormKind::Register => Target::Register,
            FormKind::CreatePost => Target::CreatePost,
        }
    }

    pub fn task_kind(self) -> TaskKind {
        match self {
            FormKind::Login => TaskKind::Login,
            FormKind::Register => TaskKind::Register,
            FormKind::CreatePost => TaskKind::CreatePost,
        }
    }
}

/// What the form that submitted a request should do with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Close,
    ShowError(String),
}

#[derive(Debug, Clone)]
pub enum Overlay {
    Login(LoginForm),
    Register(RegisterForm),
    CreatePost(CreatePostForm),
}

impl Overlay {
    /// Opens an empty form.
    pub fn open(kind: FormKind) -> Self {
        match kind {
            FormKind::Login => Overlay::Login(LoginForm::default()),
            FormKind::Register => Overlay::Register(RegisterForm::default()),
            FormKind::CreatePost => Overlay::CreatePost(CreatePostForm::default()),
        }
    }

    pub fn kind(&self) -> FormKind {
        match self {
            Overlay::Login(_) => FormKind::Login,
            Overlay::Register(_) => FormKind::Register,
            Overlay::CreatePost(_) => FormKind::CreatePost,
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self {
            Overlay::Login(f) => f.set_field(name, value),
            Overlay::Register(f) => f.set_field(name, value),
            Overlay::CreatePost(f) => f.set_field(name, value),
        }
    }

    pub fn is_submittable(&self) -> bool {
        match self {
            Overlay::Login(f) => f.is_submittable(),
            Overlay::Register(f) => f.is_submittable(),
            Overlay::CreatePost(f) => f.is_submittable(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Overlay::Login(f) => f.error.as_deref(),
            Overlay::Register(f) => f.error.as_deref(),
            Overlay::CreatePost(f) => f.error.as_deref(),
        }
    }

    pub fn set_error(&mut self, error: String) {
        match self {
            Overlay::Login(f) => f.error = Some(error),
            Overlay::Register(f) => f.error = Some(error),
            Overlay::CreatePost(f) => f.error = Some(error),
        }
    }
}

/// Convenience methods for `Option<Overlay>`.
pub trait OverlayExt {
    fn kind(&self) -> Option<FormKind>;

    /// Applies a backend outcome if the open form is of `kind`.
    fn apply(&mut self, kind: FormKind, action: FormAction);
}

impl OverlayExt for Option<Overlay> {
    fn kind(&self) -> Option<FormKind> {
        self.as_ref().map(Overlay::kind)
    }

    fn apply(&mut self, kind: FormKind, action: FormAction) {
        if OverlayExt::kind(self) != Some(kind) {
            return;
        }
        match action {
            FormAction::Close => *self = None,
            FormAction::ShowError(error) => {
                if let Some(overlay) = self.as_mut() {
                    overlay.set_error(error);
                }
            }
        }
    }
}
