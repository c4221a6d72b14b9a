//! Client-side session layer for the CENTINELA oversight dashboard.
//!
//! The core of the crate is the [`monitor`] module: an inactivity
//! watchdog that tracks user interaction in the authenticated area,
//! warns shortly before idle expiry, and forces a consistent logout
//! (advisory backend call, credential removal, authorization reset,
//! redirect to login) when the session goes silent for too long.
//!
//! Supporting modules hold the pieces the monitor collaborates with:
//! [`auth`] for the shared credential/role state, [`api`] for the REST
//! client, and [`config`] for thresholds and the activity-event table.
//!
//! ```no_run
//! use std::sync::Arc;
//! use centinela_session::{
//!     ActivityKind, ApiClient, AuthState, HttpGateway, IdleMonitor, MonitorConfig,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = MonitorConfig::load()?;
//! let auth = AuthState::new();
//! let api = ApiClient::new(config.api_base_url.clone(), auth.clone())?;
//! let gateway = HttpGateway::new(api, auth, || {
//!     // shell-specific: route to the login view, replacing history
//! });
//!
//! let monitor = IdleMonitor::spawn(&config, Arc::new(gateway))?;
//! monitor.record_activity(ActivityKind::KeyDown);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod monitor;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthState, Credential, Role};
pub use config::MonitorConfig;
pub use monitor::{
    ActivityKind, HttpGateway, IdleMonitor, SessionGateway, SessionPhase,
};
