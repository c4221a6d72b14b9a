//! Collaborator boundary consumed during session termination.

use async_trait::async_trait;

use crate::api::{ApiClient, ApiError};
use crate::auth::AuthState;

/// The four collaborator calls the monitor runs, in order, when a
/// session ends: advisory backend notification, credential removal,
/// authorization reset, redirect to the login entry point.
///
/// The clear/navigate calls must be idempotent; the monitor may be torn
/// down from more than one path.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Tell the backend the session ended. Advisory only: attempted
    /// once, and failure never blocks local teardown.
    async fn logout_remote(&self) -> Result<(), ApiError>;

    /// Remove the bearer token so outgoing requests stop presenting it.
    fn clear_local_credential(&self);

    /// Drop cached role/username flags from shared client state.
    fn clear_authorization_state(&self);

    /// Send the user to the unauthenticated entry point. The navigator
    /// is expected to replace history so "back" cannot return to an
    /// authenticated view.
    fn navigate_to_login(&self);
}

/// Production gateway: REST client + shared auth state + a navigation
/// hook supplied by the embedding shell.
pub struct HttpGateway {
    api: ApiClient,
    auth: AuthState,
    navigator: Box<dyn Fn() + Send + Sync>,
}

impl HttpGateway {
    pub fn new(
        api: ApiClient,
        auth: AuthState,
        navigator: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            api,
            auth,
            navigator: Box::new(navigator),
        }
    }
}

#[async_trait]
impl SessionGateway for HttpGateway {
    async fn logout_remote(&self) -> Result<(), ApiError> {
        self.api.logout().await
    }

    fn clear_local_credential(&self) {
        self.auth.clear_token();
    }

    fn clear_authorization_state(&self) {
        self.auth.clear_authorization();
    }

    fn navigate_to_login(&self) {
        (self.navigator)();
    }
}
