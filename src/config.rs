//! Monitor configuration management.
//!
//! Thresholds, poll cadence, and the activity-event table are loaded
//! from `~/.config/centinela-session/config.json` when present, with
//! `CENTINELA_*` environment variables overriding individual values.
//!
//! The shipped defaults (30 s warning / 60 s expiry) mirror the
//! reference dashboard and look like test values rather than a
//! production policy; deployments are expected to override them.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::monitor::ActivityKind;

/// Application name used for the config directory path
const APP_NAME: &str = "centinela-session";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Reference idle duration before the expiry warning is shown
const DEFAULT_WARNING_MS: u64 = 30_000;

/// Reference idle duration before the session is forcibly terminated
const DEFAULT_HARD_EXPIRY_MS: u64 = 60_000;

/// Poll cadence for the expiry checker
const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub warning_threshold_ms: u64,
    pub hard_expiry_threshold_ms: u64,
    pub poll_interval_ms: u64,
    /// Interaction kinds that reset the idle clock, by DOM event name.
    pub activity_events: Vec<ActivityKind>,
    /// Base URL of the CENTINELA REST API, if not the built-in default.
    pub api_base_url: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            warning_threshold_ms: DEFAULT_WARNING_MS,
            hard_expiry_threshold_ms: DEFAULT_HARD_EXPIRY_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            activity_events: ActivityKind::ALL.to_vec(),
            api_base_url: None,
        }
    }
}

impl MonitorConfig {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read config file")?;
            serde_json::from_str(&contents).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(ms) = env_ms("CENTINELA_WARNING_MS") {
            self.warning_threshold_ms = ms;
        }
        if let Some(ms) = env_ms("CENTINELA_HARD_EXPIRY_MS") {
            self.hard_expiry_threshold_ms = ms;
        }
        if let Some(ms) = env_ms("CENTINELA_POLL_INTERVAL_MS") {
            self.poll_interval_ms = ms;
        }
        if let Ok(url) = std::env::var("CENTINELA_API_URL") {
            if !url.is_empty() {
                self.api_base_url = Some(url);
            }
        }
    }

    /// Startup invariant check: a monitor whose warning window never
    /// opens, or whose checker never ticks, is a misconfiguration.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        if self.warning_threshold_ms >= self.hard_expiry_threshold_ms {
            bail!(
                "warning threshold ({} ms) must be below hard expiry ({} ms)",
                self.warning_threshold_ms,
                self.hard_expiry_threshold_ms
            );
        }
        Ok(())
    }

    pub fn warning_threshold(&self) -> Duration {
        Duration::from_millis(self.warning_threshold_ms)
    }

    pub fn hard_expiry_threshold(&self) -> Duration {
        Duration::from_millis(self.hard_expiry_threshold_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

fn env_ms(var: &str) -> Option<u64> {
    std::env::var(var).ok().and_then(|v| v.parse().ok())
}
