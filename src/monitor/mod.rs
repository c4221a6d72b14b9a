//! Session inactivity monitor.
//!
//! Tracks user presence for the authenticated area of the dashboard and
//! forces logout after a period of silence, warning the user shortly
//! before expiry. The session moves `Active -> Warning -> Expired`;
//! activity (or an explicit "stay connected") returns `Warning` to
//! `Active`, and `Expired` is terminal.
//!
//! [`IdleMonitor::spawn`] starts a poll task on the tokio runtime and
//! hands back a handle. Interaction events are fed in through
//! [`IdleMonitor::record_activity`]; a warning presenter subscribes to
//! the phase via [`IdleMonitor::subscribe`] and is visible exactly
//! while it reads [`SessionPhase::Warning`]. Dropping the handle (or
//! calling [`IdleMonitor::shutdown`]) cancels the poll task on every
//! exit path, so no transition or logout can fire after unmount.

pub mod activity;
pub mod gateway;
pub mod logout;
pub mod state;

pub use activity::ActivityKind;
pub use gateway::{HttpGateway, SessionGateway};
pub use logout::LogoutExecutor;
pub use state::{IdleState, SessionPhase, Thresholds, Transition};

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;

/// Shared between the handle and the poll task. `IdleState` sits behind
/// a mutex because activity intake and the poll tick may run on
/// different runtime threads.
struct Shared {
    state: Mutex<IdleState>,
    phase_tx: watch::Sender<SessionPhase>,
    executor: LogoutExecutor,
    accepted: Vec<ActivityKind>,
}

impl Shared {
    // Poison recovery: a panicked holder must not take the poll task
    // (and with it the logout path) down with it
    fn lock_state(&self) -> std::sync::MutexGuard<'_, IdleState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Handle to a running inactivity monitor. Owns the poll task; dropping
/// the handle cancels it.
pub struct IdleMonitor {
    shared: Arc<Shared>,
    phase_rx: watch::Receiver<SessionPhase>,
    poll_task: JoinHandle<()>,
}

impl IdleMonitor {
    /// Validate the thresholds and start the poll task. Fails fast on a
    /// config whose warning window would never open.
    pub fn spawn(config: &MonitorConfig, gateway: Arc<dyn SessionGateway>) -> Result<Self> {
        config.validate()?;
        if config.activity_events.is_empty() {
            warn!("No activity events configured; only stay_connected resets the idle clock");
        }

        let thresholds = Thresholds {
            warning: config.warning_threshold(),
            hard_expiry: config.hard_expiry_threshold(),
        };
        let (phase_tx, phase_rx) = watch::channel(SessionPhase::Active);
        let shared = Arc::new(Shared {
            state: Mutex::new(IdleState::new(Instant::now())),
            phase_tx,
            executor: LogoutExecutor::new(gateway),
            accepted: config.activity_events.clone(),
        });

        let poll_task = tokio::spawn(Self::poll_loop(
            Arc::clone(&shared),
            thresholds,
            config.poll_interval(),
        ));

        info!(
            warning_ms = config.warning_threshold_ms,
            hard_expiry_ms = config.hard_expiry_threshold_ms,
            poll_ms = config.poll_interval_ms,
            "Inactivity monitor started"
        );

        Ok(Self {
            shared,
            phase_rx,
            poll_task,
        })
    }

    async fn poll_loop(shared: Arc<Shared>, thresholds: Thresholds, every: Duration) {
        let mut ticker = time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let transition = shared.lock_state().evaluate(Instant::now(), &thresholds);
            match transition {
                Transition::Warn => {
                    debug!("Idle warning threshold crossed");
                    let _ = shared.phase_tx.send(SessionPhase::Warning);
                }
                Transition::Expire => {
                    info!("Hard expiry threshold crossed, forcing logout");
                    let _ = shared.phase_tx.send(SessionPhase::Expired);
                    shared.executor.execute().await;
                    return;
                }
                Transition::None => {
                    // A manual logout_now marks the state expired; stop polling
                    if shared.lock_state().phase() == SessionPhase::Expired {
                        return;
                    }
                }
            }
        }
    }

    /// Feed one interaction event into the monitor. Kinds outside the
    /// configured table are ignored.
    pub fn record_activity(&self, kind: ActivityKind) {
        if !self.shared.accepted.contains(&kind) {
            return;
        }
        if self.reset_idle() {
            debug!(event = %kind, "Activity dismissed idle warning");
        }
    }

    /// "Stay connected" choice from the warning prompt. Same reset path
    /// as activity, but not subject to the configured event table.
    pub fn stay_connected(&self) {
        if self.reset_idle() {
            debug!("User chose to stay connected");
        }
    }

    fn reset_idle(&self) -> bool {
        let dismissed = self.shared.lock_state().record_activity(Instant::now());
        if dismissed {
            let _ = self.shared.phase_tx.send(SessionPhase::Active);
        }
        dismissed
    }

    /// "Log out now" choice from the warning prompt: terminate
    /// immediately, bypassing the remaining grace period. Safe to race
    /// against the hard-expiry tick; teardown runs once.
    pub async fn logout_now(&self) {
        if self.shared.lock_state().force_expire() {
            let _ = self.shared.phase_tx.send(SessionPhase::Expired);
        }
        self.shared.executor.execute().await;
    }

    /// Current session phase.
    pub fn phase(&self) -> SessionPhase {
        *self.phase_rx.borrow()
    }

    /// Whether a warning prompt should currently be on screen.
    pub fn warning_visible(&self) -> bool {
        self.phase() == SessionPhase::Warning
    }

    /// Subscribe to phase changes (for a warning presenter or shell).
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase_rx.clone()
    }

    /// True once the logout path has run (from any trigger).
    pub fn logout_executed(&self) -> bool {
        self.shared.executor.has_fired()
    }

    /// Time since the last recognized interaction.
    pub fn idle_for(&self) -> Duration {
        self.shared.lock_state().idle_for(Instant::now())
    }

    /// Cancel the poll task. Called automatically on drop; exposed for
    /// explicit unmount paths.
    pub fn shutdown(&self) {
        self.poll_task.abort();
        debug!("Inactivity monitor stopped");
    }
}

impl Drop for IdleMonitor {
    fn drop(&mut self) {
        self.poll_task.abort();
    }
}
