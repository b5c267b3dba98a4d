//! HTTP client for the authentication API.
//!
//! Every call returns an explicit result the caller feeds into a navigation
//! decision; the service keeps no callbacks and no mutable session state.

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::utils::session_store;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub nickname: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email_or_nick: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub verified: bool,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    detail: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("network error")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Server(String),
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("an unknown error occurred")]
    Unknown,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    http: reqwest::Client,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Register a new account. `Ok(())` means the account exists but awaits
    /// email verification; the caller routes to the code-entry screen.
    pub async fn register(&self, req: &RegisterRequest) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(format!("{}/register", self.base_url))
            .json(req)
            .send()
            .await?;
        match resp.status().as_u16() {
            200 => Ok(()),
            400 => Err(AuthError::Server(
                Self::detail(resp, "Registration failed").await,
            )),
            _ => Err(AuthError::Unknown),
        }
    }

    /// Confirm the emailed verification code.
    pub async fn verify_email(&self, token: &str) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(format!("{}/verify", self.base_url))
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await?;
        if resp.status().as_u16() == 200 {
            Ok(())
        } else {
            Err(AuthError::Server(
                Self::detail(resp, "Verification failed").await,
            ))
        }
    }

    /// Log in with an email address or nickname. On success the access token
    /// is persisted under the fixed session key before the response is
    /// returned; a persistence failure is logged, not surfaced.
    pub async fn login(&self, req: &LoginRequest) -> Result<TokenResponse, AuthError> {
        let resp = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(req)
            .send()
            .await?;
        match resp.status().as_u16() {
            200 => {
                let token: TokenResponse =
                    resp.json().await.map_err(|_| AuthError::Unknown)?;
                if let Err(e) = session_store::save_access_token(&token.access_token) {
                    warn!("could not persist access token: {}", e);
                }
                Ok(token)
            }
            400 | 403 => Err(AuthError::Server(Self::detail(resp, "Login failed").await)),
            _ => Err(AuthError::Unknown),
        }
    }

    /// Fetch the profile behind `token`. Any non-200 answer means the token
    /// is missing, expired or invalid.
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, AuthError> {
        let resp = self
            .http
            .get(format!("{}/me", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        if resp.status().as_u16() == 200 {
            resp.json().await.map_err(|_| AuthError::Unknown)
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }

    async fn detail(resp: reqwest::Response, fallback: &str) -> String {
        match resp.json::<ApiError>().await {
            Ok(e) => e.detail,
            Err(_) => fallback.to_string(),
        }
    }
}
