//! Interactive demo for the CENTINELA session monitor.
//!
//! Terminal keypresses, mouse movement, and scrolling stand in for the
//! dashboard's interaction events. Stay idle long enough and the
//! warning prompt appears; keep ignoring it and the session is torn
//! down and "redirected" to the login entry point.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use centinela_session::{
    ActivityKind, ApiClient, AuthState, Credential, HttpGateway, IdleMonitor, MonitorConfig,
    Role, SessionPhase,
};

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g. RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn role_from_env() -> Role {
    match std::env::var("CENTINELA_ROLE").unwrap_or_default().as_str() {
        "admin" => Role::Admin,
        "supervisor" => Role::Supervisor,
        "validator" => Role::Validator,
        _ => Role::Centinela,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("CENTINELA session monitor demo starting");

    let config = MonitorConfig::load()?;

    let auth = AuthState::new();
    if let Ok(token) = std::env::var("CENTINELA_TOKEN") {
        auth.install(Credential {
            token,
            username: std::env::var("CENTINELA_USERNAME").unwrap_or_else(|_| "demo".to_string()),
            role: role_from_env(),
            issued_at: chrono::Utc::now(),
        });
    }

    let api = ApiClient::new(config.api_base_url.clone(), auth.clone())?;

    // Navigation hook: a real shell would replace the history entry;
    // the demo just remembers that the redirect happened.
    let redirected = Arc::new(AtomicBool::new(false));
    let redirect_flag = Arc::clone(&redirected);
    let gateway = HttpGateway::new(api, auth, move || {
        redirect_flag.store(true, Ordering::SeqCst);
    });

    let monitor = IdleMonitor::spawn(&config, Arc::new(gateway))?;

    enable_raw_mode()?;
    execute!(io::stdout(), EnableMouseCapture)?;

    println!(
        "Session monitor running: warning at {}s, expiry at {}s. Press Ctrl+C to unmount.\r",
        config.warning_threshold_ms / 1000,
        config.hard_expiry_threshold_ms / 1000
    );

    let result = run_demo(&monitor).await;

    execute!(io::stdout(), DisableMouseCapture)?;
    disable_raw_mode()?;
    monitor.shutdown();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    if redirected.load(Ordering::SeqCst) {
        println!("Session closed - you are back at the login entry point.");
    } else {
        println!("Monitor unmounted with the session still live.");
    }

    info!("Demo shutting down");
    Ok(())
}

async fn run_demo(monitor: &IdleMonitor) -> Result<()> {
    let mut last_phase = monitor.phase();

    loop {
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    // Ctrl+C unmounts without logging out
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    if monitor.warning_visible() {
                        match key.code {
                            KeyCode::Char('s') => {
                                monitor.stay_connected();
                                continue;
                            }
                            KeyCode::Char('l') => {
                                monitor.logout_now().await;
                                continue;
                            }
                            _ => {}
                        }
                    }
                    monitor.record_activity(ActivityKind::KeyDown);
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        monitor.record_activity(ActivityKind::PointerMove);
                    }
                    MouseEventKind::Down(_) => {
                        monitor.record_activity(ActivityKind::PointerDown);
                    }
                    MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                        monitor.record_activity(ActivityKind::Scroll);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        let phase = monitor.phase();
        if phase != last_phase {
            match phase {
                SessionPhase::Warning => {
                    println!(
                        "Your session is about to expire ({}s idle). [s]tay connected / [l]og out now\r",
                        monitor.idle_for().as_secs()
                    );
                }
                SessionPhase::Active => {
                    println!("Welcome back, session extended.\r");
                }
                SessionPhase::Expired => return Ok(()),
            }
            last_phase = phase;
        }

        if monitor.logout_executed() {
            return Ok(());
        }
    }
}
