//! Session token issuance and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use super::types::SessionClaims;

/// Lifetime of an issued session token.
pub const SESSION_TTL_SECONDS: i64 = 60 * 60;

/// Why a presented session token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for SessionError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => SessionError::InvalidSignature,
            ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::Malformed,
        }
    }
}

/// Signing and verification keys derived once from the process-wide secret.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against the caller's clock, with no leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `email`, valid for [`SESSION_TTL_SECONDS`] from now.
    pub fn issue(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(email, Utc::now())
    }

    pub fn issue_at(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let exp = now + Duration::seconds(SESSION_TTL_SECONDS);

        let claims = SessionClaims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Validate a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, SessionError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding, &self.validation)?;

        if now.timestamp() > token_data.claims.exp {
            return Err(SessionError::Expired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> SessionKeys {
        SessionKeys::from_secret(b"test-secret-key-for-testing-only")
    }

    #[test]
    fn test_issue_and_verify_token() {
        let keys = test_keys();
        let token = keys.issue("test@example.com").expect("should create token");

        let claims = keys.verify(&token).expect("should validate token");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECONDS);
    }

    #[test]
    fn test_expiry_boundary() {
        let keys = test_keys();
        let issued_at = Utc::now();
        let token = keys
            .issue_at("test@example.com", issued_at)
            .expect("should create token");

        assert!(keys
            .verify_at(&token, issued_at + Duration::seconds(3599))
            .is_ok());
        assert!(keys
            .verify_at(&token, issued_at + Duration::seconds(3600))
            .is_ok());
        assert_eq!(
            keys.verify_at(&token, issued_at + Duration::seconds(3601)),
            Err(SessionError::Expired)
        );
    }

    #[test]
    fn test_invalid_token_rejected() {
        let keys = test_keys();
        assert_eq!(keys.verify("invalid-token"), Err(SessionError::Malformed));
        assert_eq!(keys.verify(""), Err(SessionError::Malformed));
        assert_eq!(keys.verify("a.b.c"), Err(SessionError::Malformed));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = test_keys()
            .issue("test@example.com")
            .expect("should create token");

        let wrong_keys = SessionKeys::from_secret(b"wrong-secret");
        assert_eq!(
            wrong_keys.verify(&token),
            Err(SessionError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_secret_rejected_even_when_expired() {
        let issued_at = Utc::now() - Duration::hours(5);
        let token = test_keys()
            .issue_at("test@example.com", issued_at)
            .expect("should create token");

        let wrong_keys = SessionKeys::from_secret(b"wrong-secret");
        assert_eq!(
            wrong_keys.verify(&token),
            Err(SessionError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let keys = test_keys();
        let token = keys.issue("test@example.com").expect("should create token");
        let forged = keys.issue("mallory@example.com").expect("should create token");

        // Splice the forged payload onto the original signature.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(keys.verify(&spliced), Err(SessionError::InvalidSignature));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let claims = SessionClaims {
            email: "test@example.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + SESSION_TTL_SECONDS,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-for-testing-only"),
        )
        .expect("should create token");

        assert_eq!(test_keys().verify(&token), Err(SessionError::Malformed));
    }
}
