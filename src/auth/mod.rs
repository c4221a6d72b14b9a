//! Authentication state for the dashboard client.
//!
//! This module provides:
//! - `Credential`: the bearer token plus role/username returned by login
//! - `AuthState`: the shared store the API client signs requests from
//!   and the inactivity monitor clears on session termination
//!
//! The monitor never manages storage policy; it only clears what is
//! held here, through its gateway.

pub mod credential;

pub use credential::{AuthState, Credential, Role};
