//! Google OAuth login gateway.
//!
//! Trades an authorization code for a verified email, checks it against a
//! static allowlist and hands the frontend a short-lived signed session token.

use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod cors;
pub mod error;
pub mod routes;

use auth::{GoogleProvider, IdentityProvider, SessionKeys};
use config::GatewayConfig;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub provider: Arc<dyn IdentityProvider>,
    pub sessions: Arc<SessionKeys>,
}

impl AppState {
    /// Build state talking to Google with the configured client.
    pub fn new(config: GatewayConfig) -> Self {
        let provider = Arc::new(GoogleProvider::new(config.google.clone()));
        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: GatewayConfig, provider: Arc<dyn IdentityProvider>) -> Self {
        let sessions = Arc::new(SessionKeys::from_secret(config.jwt_secret.as_bytes()));
        Self {
            config: Arc::new(config),
            provider,
            sessions,
        }
    }
}
