//! Idle-session state machine.
//!
//! Pure transition logic, kept free of timers and channels so it can be
//! driven directly in tests. The async runtime around it lives in
//! [`super::IdleMonitor`].

use std::time::Duration;

use tokio::time::Instant;

/// Lifecycle phase of the monitored session.
///
/// `Expired` is terminal; `Warning` returns to `Active` on user activity
/// or an explicit "stay connected" choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Warning,
    Expired,
}

/// Outcome of a single poll evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Warn,
    Expire,
}

/// Idle durations after which the session warns and then terminates.
/// Construction-time validation lives in `MonitorConfig::validate`.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub warning: Duration,
    pub hard_expiry: Duration,
}

/// Mutable idle-tracking state shared between activity intake and the
/// poll task.
#[derive(Debug)]
pub struct IdleState {
    last_activity_at: Instant,
    warning_shown: bool,
    phase: SessionPhase,
}

impl IdleState {
    pub fn new(now: Instant) -> Self {
        Self {
            last_activity_at: now,
            warning_shown: false,
            phase: SessionPhase::Active,
        }
    }

    /// Record user activity: reset the idle clock and dismiss a pending
    /// warning. Returns true if a warning was dismissed (the caller
    /// publishes the phase change). Ignored once expired.
    pub fn record_activity(&mut self, now: Instant) -> bool {
        if self.phase == SessionPhase::Expired {
            return false;
        }
        self.last_activity_at = now;
        if self.warning_shown {
            self.warning_shown = false;
            self.phase = SessionPhase::Active;
            true
        } else {
            false
        }
    }

    /// Evaluate the idle clock against the thresholds. Called once per
    /// poll tick.
    pub fn evaluate(&mut self, now: Instant, thresholds: &Thresholds) -> Transition {
        if self.phase == SessionPhase::Expired {
            return Transition::None;
        }
        let elapsed = now.duration_since(self.last_activity_at);
        if elapsed >= thresholds.hard_expiry {
            self.phase = SessionPhase::Expired;
            self.warning_shown = false;
            Transition::Expire
        } else if elapsed >= thresholds.warning && self.phase == SessionPhase::Active {
            self.phase = SessionPhase::Warning;
            self.warning_shown = true;
            Transition::Warn
        } else {
            Transition::None
        }
    }

    /// Terminate immediately ("log out now", bypassing the grace period).
    /// Returns false if the session was already expired.
    pub fn force_expire(&mut self) -> bool {
        if self.phase == SessionPhase::Expired {
            return false;
        }
        self.phase = SessionPhase::Expired;
        self.warning_shown = false;
        true
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn warning_shown(&self) -> bool {
        self.warning_shown
    }

    /// Time since the last recognized interaction.
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.duration_since(self.last_activity_at)
    }
}
