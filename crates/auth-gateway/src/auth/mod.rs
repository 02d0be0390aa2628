//! Authentication module for Google OAuth login and JWT session tokens.
//!
//! This module provides:
//! - Google authorization URL and code exchange
//! - Email allowlist validation
//! - Session token issuance and verification
//! - The `/login`, `/login-google` and `/authenticate` handlers

pub mod allowlist;
mod handlers;
pub mod oauth;
pub mod session;
pub mod types;

pub use allowlist::EmailAllowlist;
pub use handlers::{authenticate, login, login_google};
pub use oauth::{ExchangeError, ExchangeStage, GoogleProvider, IdentityProvider};
pub use session::{SessionError, SessionKeys, SESSION_TTL_SECONDS};
