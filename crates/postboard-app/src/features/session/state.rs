use postboard_core::api::{ApiResult, LoginResponse, UserSummary};
use postboard_core::credentials::{TokenStore, mask_token};

/// Authentication lifecycle.
///
/// `Uninitialized -> Checking -> {Authenticated, Unauthenticated}`; login and
/// logout move between the two resolved states afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Checking,
    Unauthenticated,
    Authenticated(UserSummary),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// True once the startup check has produced an answer.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            SessionState::Authenticated(_) | SessionState::Unauthenticated
        )
    }

    pub fn user(&self) -> Option<&UserSummary> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Checking => "checking",
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Authenticated(_) => "authenticated",
        }
    }
}

#[derive(Debug)]
pub struct SessionManager {
    state: SessionState,
    store: TokenStore,
}

impl SessionManager {
    pub fn new(store: TokenStore) -> Self {
        Self {
            state: SessionState::Uninitialized,
            store,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Token for authenticated backend calls. `None` unless authenticated.
    pub fn token(&self) -> Option<&str> {
        if self.state.is_authenticated() {
            self.store.load()
        } else {
            None
        }
    }

    /// Leaves `Uninitialized`. Returns the token to validate when one is stored;
    /// with no token the session resolves to `Unauthenticated` immediately.
    ///
    /// Does nothing outside `Uninitialized`.
    pub fn begin(&mut self) -> Option<String> {
        if self.state != SessionState::Uninitialized {
            return None;
        }
        match self.store.load() {
            Some(token) => {
                tracing::debug!(token = %mask_token(token), "validating stored session");
                let token = token.to_string();
                self.state = SessionState::Checking;
                Some(token)
            }
            None => {
                tracing::debug!("no stored session");
                self.state = SessionState::Unauthenticated;
                None
            }
        }
    }

    /// Applies the `GET /session` outcome. Ignored unless `Checking`.
    ///
    /// A failed check leaves the stored token in place.
    pub fn resolve(&mut self, result: ApiResult<UserSummary>) {
        if self.state != SessionState::Checking {
            tracing::debug!(state = self.state.label(), "ignoring session check result");
            return;
        }
        self.state = match result {
            Ok(user) if self.store.load().is_some() => {
                tracing::debug!(user = %user.display_name(), "session validated");
                SessionState::Authenticated(user)
            }
            Ok(_) => SessionState::Unauthenticated,
            Err(err) => {
                tracing::warn!(kind = %err.kind, "session check failed: {err}");
                SessionState::Unauthenticated
            }
        };
    }

    /// Stores the issued token, then authenticates with the returned user.
    pub fn authenticate(&mut self, response: LoginResponse) {
        self.store.save(&response.token);
        tracing::debug!(
            token = %mask_token(&response.token),
            user = %response.user.display_name(),
            "logged in"
        );
        self.state = SessionState::Authenticated(response.user);
    }

    /// Clears the stored token. Always ends `Unauthenticated`.
    pub fn logout(&mut self) {
        let had_token = self.store.clear();
        tracing::debug!(had_token, "logged out");
        self.state = SessionState::Unauthenticated;
    }
}

#[cfg(test)]
mod tests {
    use postboard_core::api::{ApiError, ApiErrorKind};

    use super::*;

    fn user(id: i64) -> UserSummary {
        UserSummary {
            id,
            name: None,
            email: Some(format!("u{id}@mail.com")),
        }
    }

    fn store_with(token: &str) -> TokenStore {
        let mut store = TokenStore::in_memory();
        store.save(token);
        store
    }

    #[test]
    fn test_begin_without_token_skips_check() {
        let mut session = SessionManager::new(TokenStore::in_memory());
        assert_eq!(session.begin(), None);
        assert_eq!(session.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn test_begin_with_token_enters_checking_once() {
        let mut session = SessionManager::new(store_with("tok"));
        assert_eq!(session.begin().as_deref(), Some("tok"));
        assert_eq!(session.state(), &SessionState::Checking);
        assert_eq!(session.token(), None);
        assert_eq!(session.begin(), None);
    }

    #[test]
    fn test_rejected_token_stays_stored() {
        let mut session = SessionManager::new(store_with("stale"));
        session.begin();
        session.resolve(Err(ApiError::http_status(401, "")));
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert_eq!(session.store().load(), Some("stale"));
    }

    #[test]
    fn test_network_failure_is_unauthenticated() {
        let mut session = SessionManager::new(store_with("tok"));
        session.begin();
        session.resolve(Err(ApiError::new(ApiErrorKind::Network, "offline")));
        assert!(!session.state().is_authenticated());
        assert!(session.state().is_resolved());
    }

    #[test]
    fn test_resolve_after_logout_is_ignored() {
        let mut session = SessionManager::new(store_with("tok"));
        session.begin();
        session.logout();
        session.resolve(Ok(user(1)));
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert_eq!(session.store().load(), None);
    }

    #[test]
    fn test_authenticate_stores_token() {
        let mut session = SessionManager::new(TokenStore::in_memory());
        session.begin();
        session.authenticate(LoginResponse {
            token: "fresh".to_string(),
            user: user(2),
        });
        assert_eq!(session.state().user().map(|u| u.id), Some(2));
        assert_eq!(session.token(), Some("fresh"));
    }

    #[test]
    fn test_logout_is_idempotent() {
        let mut session = SessionManager::new(store_with("tok"));
        session.begin();
        session.resolve(Ok(user(1)));
        assert!(session.state().is_authenticated());

        session.logout();
        session.logout();
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert_eq!(session.store().load(), None);
        assert_eq!(session.token(), None);
    }
}
