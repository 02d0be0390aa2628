//! Static email allowlist gating session issuance.

/// Emails permitted to obtain a session token.
///
/// Matching is exact and case-sensitive; entries are only trimmed of
/// surrounding whitespace when loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAllowlist {
    emails: Vec<String>,
}

impl EmailAllowlist {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|s| {
                    let email: String = s.into();
                    email.trim().to_string()
                })
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated list such as `ALLOWED_EMAILS`.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.iter().any(|allowed| allowed == email)
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    /// Message returned to a user whose email is not on the list.
    pub fn rejection_message(&self) -> String {
        format!("Only {} has access to this project.", self.emails.join(", "))
    }
}
