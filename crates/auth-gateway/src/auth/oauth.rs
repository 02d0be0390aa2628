//! Google OAuth authorization-code exchange.
//!
//! A login attempt moves through three stages: waiting for the code,
//! trading the code for tokens, and reading the user's profile. Each
//! attempt is independent and is never retried; the first failure ends it
//! with an [`ExchangeError`] naming the failing step.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::GoogleConfig;

use super::types::VerifiedIdentity;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Scopes requested at login: email and basic profile.
pub const LOGIN_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
];

/// Step of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeStage {
    AwaitingCode,
    ExchangingCode,
    FetchingProfile,
}

impl fmt::Display for ExchangeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            ExchangeStage::AwaitingCode => "awaiting authorization code",
            ExchangeStage::ExchangingCode => "exchanging authorization code",
            ExchangeStage::FetchingProfile => "fetching user profile",
        };
        f.write_str(stage)
    }
}

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("authorization code missing")]
    MissingCode,

    #[error("token request failed: {0}")]
    TokenRequest(#[source] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    TokenRejected { status: StatusCode, body: String },

    #[error("user info request failed: {0}")]
    ProfileRequest(#[source] reqwest::Error),

    #[error("user info endpoint returned {status}: {body}")]
    ProfileRejected { status: StatusCode, body: String },

    #[error("user info response has no email")]
    MissingEmail,
}

impl ExchangeError {
    /// The step the attempt was in when it failed.
    pub fn stage(&self) -> ExchangeStage {
        match self {
            ExchangeError::MissingCode => ExchangeStage::AwaitingCode,
            ExchangeError::TokenRequest(_) | ExchangeError::TokenRejected { .. } => {
                ExchangeStage::ExchangingCode
            }
            ExchangeError::ProfileRequest(_)
            | ExchangeError::ProfileRejected { .. }
            | ExchangeError::MissingEmail => ExchangeStage::FetchingProfile,
        }
    }
}

/// External identity provider that turns authorization codes into emails.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the user is sent to for consent.
    fn authorization_url(&self) -> String;

    /// Resolve an authorization code to a verified identity.
    async fn exchange_code(&self, code: &str) -> Result<VerifiedIdentity, ExchangeError>;
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    email: Option<String>,
    name: Option<String>,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'a str,
}

pub struct GoogleProvider {
    config: GoogleConfig,
    client: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn request_tokens(&self, code: &str) -> Result<GoogleTokenResponse, ExchangeError> {
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&TokenRequest {
                code,
                client_id: &self.config.client_id,
                client_secret: &self.config.client_secret,
                redirect_uri: &self.config.redirect_uri,
                grant_type: "authorization_code",
            })
            .send()
            .await
            .map_err(ExchangeError::TokenRequest)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Token exchange failed: {} - {}", status, body);
            return Err(ExchangeError::TokenRejected { status, body });
        }

        let tokens: GoogleTokenResponse =
            response.json().await.map_err(ExchangeError::TokenRequest)?;

        tracing::debug!(
            "Token exchange succeeded (refresh token: {}, expires in: {:?}s)",
            tokens.refresh_token.is_some(),
            tokens.expires_in
        );

        Ok(tokens)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<VerifiedIdentity, ExchangeError> {
        let response = self
            .client
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(ExchangeError::ProfileRequest)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("User info request failed: {} - {}", status, body);
            return Err(ExchangeError::ProfileRejected { status, body });
        }

        let user_info: GoogleUserInfo = response
            .json()
            .await
            .map_err(ExchangeError::ProfileRequest)?;

        let email = user_info.email.ok_or(ExchangeError::MissingEmail)?;

        Ok(VerifiedIdentity {
            email,
            name: user_info.name,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn authorization_url(&self) -> String {
        format!(
            "{}?\
             access_type=offline&\
             prompt=consent&\
             scope={}&\
             response_type=code&\
             client_id={}&\
             redirect_uri={}",
            self.config.auth_url,
            urlencoding::encode(&LOGIN_SCOPES.join(" ")),
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<VerifiedIdentity, ExchangeError> {
        if code.is_empty() {
            return Err(ExchangeError::MissingCode);
        }

        let tokens = self.request_tokens(code).await?;
        self.fetch_profile(&tokens.access_token).await
    }
}
