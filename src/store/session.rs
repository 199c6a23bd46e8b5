use tracing::info;

use crate::model::session::{SessionResponse, SessionUser};

/// Transient login state for the running process. Never persisted.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    is_authenticated: bool,
    user: Option<SessionUser>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts any non-empty email/password pair. The password is never inspected.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        if email.is_empty() || password.is_empty() {
            return false;
        }

        self.is_authenticated = true;
        self.user = Some(SessionUser {
            email: email.to_string(),
        });
        info!(email, "Session started");
        true
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(email = %user.email, "Session ended");
        }
        self.is_authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn snapshot(&self) -> SessionResponse {
        SessionResponse {
            is_authenticated: self.is_authenticated,
            user: self.user.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_credentials_do_not_authenticate() {
        let mut session = SessionState::new();
        assert!(!session.login("", ""));
        assert!(!session.login("a@b.com", ""));
        assert!(!session.login("", "x"));
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn any_password_is_accepted() {
        let mut session = SessionState::new();
        assert!(session.login("a@b.com", "x"));
        assert!(session.is_authenticated());
        assert_eq!(session.current_user().unwrap().email, "a@b.com");
    }

    #[test]
    fn logout_clears_both_fields() {
        let mut session = SessionState::new();
        session.login("a@b.com", "x");
        session.logout();

        let snapshot = session.snapshot();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
    }

    #[test]
    fn failed_login_keeps_existing_session() {
        let mut session = SessionState::new();
        session.login("a@b.com", "x");
        assert!(!session.login("", ""));
        assert_eq!(session.current_user().unwrap().email, "a@b.com");
    }
}
