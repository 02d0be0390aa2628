//! Auth-related types.

use serde::{Deserialize, Serialize};

// Re-export wire types for convenience
pub use shared_types::{AuthenticateResponse, LoginUrlResponse};

/// JWT claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Allowlisted email the token was issued for
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Identity resolved from an authorization code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub name: Option<String>,
}

/// Query parameters of the provider redirect to `/login-google`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginCallbackParams {
    pub code: Option<String>,
}

/// Query parameters of `/authenticate`.
#[derive(Debug, Default, Deserialize)]
pub struct AuthenticateParams {
    pub token: Option<String>,
}
