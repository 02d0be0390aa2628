//! Process-wide configuration, read once at startup.

use anyhow::{bail, Context, Result};
use std::fmt;

use crate::auth::oauth::{GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL, GOOGLE_USERINFO_URL};
use crate::auth::EmailAllowlist;
use crate::cors::DEFAULT_ALLOWED_ORIGIN;

/// OAuth client registration and provider endpoints.
#[derive(Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("userinfo_url", &self.userinfo_url)
            .finish()
    }
}

#[derive(Clone)]
pub struct GatewayConfig {
    pub google: GoogleConfig,
    pub allowed_emails: EmailAllowlist,
    pub allowed_origins: Vec<String>,
    pub jwt_secret: String,
    /// Frontend base URL, without a trailing slash
    pub frontend_url: String,
    pub port: u16,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("google", &self.google)
            .field("allowed_emails", &self.allowed_emails)
            .field("allowed_origins", &self.allowed_origins)
            .field("jwt_secret", &"<redacted>")
            .field("frontend_url", &self.frontend_url)
            .field("port", &self.port)
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `GOOGLE_CLIENT_ID`: Google OAuth client ID
    /// - `GOOGLE_CLIENT_SECRET`: Google OAuth client secret
    /// - `GOOGLE_API_REDIRECT`: OAuth callback URI (the `/login-google` route)
    /// - `ALLOWED_EMAILS`: Comma-separated list of allowed email addresses
    /// - `JWT_SECRET`: Secret key for signing session tokens
    /// - `FRONTEND_URL`: Base URL tokens are handed to
    ///
    /// Optional: `PORT` (default 8080), `CORS_ALLOWED_ORIGINS`,
    /// `GOOGLE_AUTH_URL`, `GOOGLE_TOKEN_URL`, `GOOGLE_USERINFO_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key).with_context(|| format!("{} must be set", key))
        };

        let allowed_emails = EmailAllowlist::parse(&required("ALLOWED_EMAILS")?);
        if allowed_emails.is_empty() {
            bail!("ALLOWED_EMAILS cannot be empty");
        }

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET cannot be empty");
        }

        let allowed_origins: Vec<String> = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let allowed_origins = if allowed_origins.is_empty() {
            vec![DEFAULT_ALLOWED_ORIGIN.to_string()]
        } else {
            allowed_origins
        };

        Ok(Self {
            google: GoogleConfig {
                client_id: required("GOOGLE_CLIENT_ID")?,
                client_secret: required("GOOGLE_CLIENT_SECRET")?,
                redirect_uri: required("GOOGLE_API_REDIRECT")?,
                auth_url: lookup("GOOGLE_AUTH_URL").unwrap_or_else(|| GOOGLE_AUTH_URL.to_string()),
                token_url: lookup("GOOGLE_TOKEN_URL")
                    .unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
                userinfo_url: lookup("GOOGLE_USERINFO_URL")
                    .unwrap_or_else(|| GOOGLE_USERINFO_URL.to_string()),
            },
            allowed_emails,
            allowed_origins,
            jwt_secret,
            frontend_url: required("FRONTEND_URL")?
                .trim_end_matches('/')
                .to_string(),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, String> {
        [
            ("GOOGLE_CLIENT_ID", "client-id"),
            ("GOOGLE_CLIENT_SECRET", "client-secret"),
            ("GOOGLE_API_REDIRECT", "http://localhost:8080/login-google"),
            ("ALLOWED_EMAILS", "alice@example.com,bob@example.com"),
            ("JWT_SECRET", "jwt-secret"),
            ("FRONTEND_URL", "http://localhost:3000/"),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect()
    }

    fn load(vars: &HashMap<&'static str, String>) -> Result<GatewayConfig> {
        GatewayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_loads_with_defaults() {
        let config = load(&base_vars()).unwrap();

        assert_eq!(
            config.allowed_emails.emails(),
            ["alice@example.com", "bob@example.com"]
        );
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert_eq!(config.port, 8080);
        assert_eq!(config.google.token_url, GOOGLE_TOKEN_URL);
        assert_eq!(config.google.userinfo_url, GOOGLE_USERINFO_URL);
    }

    #[test]
    fn test_missing_allowed_emails_is_fatal() {
        let mut vars = base_vars();
        vars.remove("ALLOWED_EMAILS");

        let err = load(&vars).unwrap_err();
        assert_eq!(err.to_string(), "ALLOWED_EMAILS must be set");
    }

    #[test]
    fn test_blank_allowed_emails_is_fatal() {
        let mut vars = base_vars();
        vars.insert("ALLOWED_EMAILS", " , ".to_string());

        let err = load(&vars).unwrap_err();
        assert_eq!(err.to_string(), "ALLOWED_EMAILS cannot be empty");
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        for key in ["JWT_SECRET", "GOOGLE_CLIENT_SECRET", "FRONTEND_URL"] {
            let mut vars = base_vars();
            vars.remove(key);
            assert!(load(&vars).is_err(), "{} should be required", key);
        }
    }

    #[test]
    fn test_port_and_origins_override() {
        let mut vars = base_vars();
        vars.insert("PORT", "9000".to_string());
        vars.insert(
            "CORS_ALLOWED_ORIGINS",
            "https://app.example.com, https://admin.example.com".to_string(),
        );

        let config = load(&vars).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.allowed_origins,
            vec!["https://app.example.com", "https://admin.example.com"]
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut vars = base_vars();
        vars.insert("PORT", "eighty".to_string());
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&base_vars()).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("jwt-secret"));
        assert!(!printed.contains("client-secret"));
        assert!(printed.contains("client-id"));
    }
}
