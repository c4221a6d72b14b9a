//! Shared credential and authorization state.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Staff roles recognized by the oversight unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Supervisor,
    Centinela,
    Validator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Centinela => "centinela",
            Role::Validator => "validator",
        }
    }
}

/// An authenticated identity as returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub username: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct AuthInner {
    token: Option<String>,
    username: Option<String>,
    role: Option<Role>,
}

/// Process-wide auth state, shared between the API client (which signs
/// requests with the token) and the session monitor (which clears it).
///
/// The token and the role/username flags are cleared by separate calls
/// because session teardown treats them as distinct steps; both calls
/// are idempotent.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    inner: Arc<RwLock<AuthInner>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly issued credential after login.
    pub fn install(&self, credential: Credential) {
        let mut inner = self.write();
        inner.token = Some(credential.token);
        inner.username = Some(credential.username);
        inner.role = Some(credential.role);
    }

    /// Token for signing outgoing requests, if one is held.
    pub fn bearer_token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn username(&self) -> Option<String> {
        self.read().username.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.read().role
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Remove the bearer token so subsequent requests are unsigned.
    pub fn clear_token(&self) {
        self.write().token = None;
    }

    /// Drop cached role/username flags.
    pub fn clear_authorization(&self) {
        let mut inner = self.write();
        inner.username = None;
        inner.role = None;
    }

    // A poisoned lock must not make the clears panic; session teardown
    // has to complete even if some writer panicked mid-update.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, AuthInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, AuthInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential {
            token: "tok-123".to_string(),
            username: "vigilante01".to_string(),
            role: Role::Centinela,
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn test_install_and_read() {
        let auth = AuthState::new();
        assert!(!auth.is_authenticated());

        auth.install(credential());
        assert!(auth.is_authenticated());
        assert_eq!(auth.bearer_token().as_deref(), Some("tok-123"));
        assert_eq!(auth.username().as_deref(), Some("vigilante01"));
        assert_eq!(auth.role(), Some(Role::Centinela));
    }

    #[test]
    fn test_clear_token_keeps_authorization_flags() {
        let auth = AuthState::new();
        auth.install(credential());

        auth.clear_token();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.role(), Some(Role::Centinela));

        auth.clear_authorization();
        assert_eq!(auth.role(), None);
        assert_eq!(auth.username(), None);
    }

    #[test]
    fn test_clears_are_idempotent() {
        let auth = AuthState::new();
        auth.install(credential());

        auth.clear_token();
        auth.clear_token();
        auth.clear_authorization();
        auth.clear_authorization();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.role(), None);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Validator.as_str(), "validator");
        let role: Role = serde_json::from_str(r#""supervisor""#).expect("Failed to parse role");
        assert_eq!(role, Role::Supervisor);
    }

    #[test]
    fn test_clears_survive_poisoned_lock() {
        let auth = AuthState::new();
        auth.install(credential());

        // Poison the lock from a panicking writer
        let poisoner = auth.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.write();
            panic!("writer died mid-update");
        })
        .join();

        auth.clear_token();
        auth.clear_authorization();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.role(), None);
    }

    #[test]
    fn test_shared_across_clones() {
        let auth = AuthState::new();
        let view = auth.clone();
        auth.install(credential());
        assert!(view.is_authenticated());
        view.clear_token();
        assert!(!auth.is_authenticated());
    }
}
