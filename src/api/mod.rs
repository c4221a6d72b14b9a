//! REST client for the CENTINELA backend.
//!
//! Only the auth surface lives here: login issues a credential, logout
//! is the advisory call the inactivity monitor fires during teardown.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
