//! Session termination path.
//!
//! One best-effort remote call, then unconditional local teardown. The
//! executor runs at most once per session no matter how many paths
//! reach it (hard expiry, "log out now", a logout button elsewhere in
//! the app).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::gateway::SessionGateway;

pub struct LogoutExecutor {
    gateway: Arc<dyn SessionGateway>,
    fired: AtomicBool,
}

impl LogoutExecutor {
    pub fn new(gateway: Arc<dyn SessionGateway>) -> Self {
        Self {
            gateway,
            fired: AtomicBool::new(false),
        }
    }

    /// Run the four termination steps in order. Returns true if this
    /// call performed the teardown, false if a previous call already
    /// did (the racing caller sees a no-op, never a double navigation).
    pub async fn execute(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            debug!("Logout already executed, skipping");
            return false;
        }

        // Step 1 is advisory: the outcome is awaited only to log it
        match self.gateway.logout_remote().await {
            Ok(()) => debug!("Backend acknowledged logout"),
            Err(e) => warn!(error = %e, "Advisory logout call failed, continuing local teardown"),
        }

        self.gateway.clear_local_credential();
        self.gateway.clear_authorization_state();
        self.gateway.navigate_to_login();
        info!("Session terminated");
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubGateway {
        fail_remote: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl SessionGateway for StubGateway {
        async fn logout_remote(&self) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push("remote");
            if self.fail_remote {
                Err(ApiError::InvalidResponse("backend unreachable".to_string()))
            } else {
                Ok(())
            }
        }

        fn clear_local_credential(&self) {
            self.calls.lock().unwrap().push("credential");
        }

        fn clear_authorization_state(&self) {
            self.calls.lock().unwrap().push("authorization");
        }

        fn navigate_to_login(&self) {
            self.calls.lock().unwrap().push("navigate");
        }
    }

    #[tokio::test]
    async fn test_steps_run_in_order() {
        let gateway = Arc::new(StubGateway::default());
        let executor = LogoutExecutor::new(gateway.clone());

        assert!(executor.execute().await);
        assert_eq!(
            *gateway.calls.lock().unwrap(),
            vec!["remote", "credential", "authorization", "navigate"]
        );
    }

    #[tokio::test]
    async fn test_remote_failure_does_not_block_teardown() {
        let gateway = Arc::new(StubGateway {
            fail_remote: true,
            ..Default::default()
        });
        let executor = LogoutExecutor::new(gateway.clone());

        assert!(executor.execute().await);
        assert_eq!(
            *gateway.calls.lock().unwrap(),
            vec!["remote", "credential", "authorization", "navigate"]
        );
    }

    #[tokio::test]
    async fn test_second_call_is_a_noop() {
        let gateway = Arc::new(StubGateway::default());
        let executor = LogoutExecutor::new(gateway.clone());

        assert!(executor.execute().await);
        assert!(!executor.execute().await);
        assert_eq!(gateway.calls.lock().unwrap().len(), 4);
        assert!(executor.has_fired());
    }
}
