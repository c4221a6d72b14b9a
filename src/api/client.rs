//! HTTP client for the CENTINELA REST API auth endpoints.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{AuthState, Credential, Role};

use super::ApiError;

/// Default base URL for the CENTINELA backend (development deployment)
const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    username: String,
    role: Role,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: AuthState,
}

impl ApiClient {
    /// Build a client signing requests from the shared auth state.
    /// `base_url` falls back to the development deployment when `None`.
    pub fn new(base_url: Option<String>, auth: AuthState) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            auth,
        })
    }

    /// Authenticate and install the issued credential in the shared
    /// auth state.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(%username, "Authenticating");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Bad login payload: {}", e)))?;

        let credential = Credential {
            token: body.token,
            username: body.username,
            role: body.role,
            issued_at: Utc::now(),
        };
        self.auth.install(credential.clone());
        debug!(role = credential.role.as_str(), "Login accepted");
        Ok(credential)
    }

    /// Advisory logout notification. One attempt; callers log the
    /// outcome and proceed with local teardown regardless.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = format!("{}/auth/logout", self.base_url);
        let mut request = self.client.post(&url);
        if let Some(token) = self.auth.bearer_token() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Self::check_response(response).await?;
        debug!("Backend notified of logout");
        Ok(())
    }

    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"token": "eyJhbGciOi.header.sig", "username": "mgarcia", "role": "supervisor"}"#;
        let resp: LoginResponse =
            serde_json::from_str(json).expect("Failed to parse login test JSON");
        assert_eq!(resp.username, "mgarcia");
        assert_eq!(resp.role, Role::Supervisor);
        assert!(resp.token.starts_with("eyJ"));
    }

    #[test]
    fn test_default_base_url_applied() {
        let client = ApiClient::new(None, AuthState::new()).expect("Failed to build client");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);

        let client = ApiClient::new(Some("https://centinela.example/api".to_string()), AuthState::new())
            .expect("Failed to build client");
        assert_eq!(client.base_url, "https://centinela.example/api");
    }
}
