//! Cross-origin policy for browser clients.

use std::sync::Arc;

use axum::http::{header, request::Parts, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Origin of the local frontend dev server.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Decides which request origins get permissive CORS headers.
///
/// Unknown origins are not blocked here; the response simply carries no
/// `Access-Control-Allow-Origin`, so the browser refuses it.
#[derive(Debug, Clone)]
pub struct OriginGuard {
    origins: Arc<[String]>,
}

impl OriginGuard {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origins: origins.into_iter().map(Into::<String>::into).collect(),
        }
    }

    /// Exact match against the allowed origins. A missing origin is never permitted.
    pub fn permits(&self, origin: Option<&str>) -> bool {
        match origin {
            Some(origin) => self.origins.iter().any(|allowed| allowed == origin),
            None => false,
        }
    }

    /// Build a CORS layer that reflects permitted origins.
    pub fn layer(&self) -> CorsLayer {
        tracing::info!("CORS configured for origins: {:?}", self.origins);

        let guard = self.clone();
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _request: &Parts| guard.permits(origin.to_str().ok()),
            ))
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_frontend_only() {
        let guard = OriginGuard::new([DEFAULT_ALLOWED_ORIGIN]);
        assert!(guard.permits(Some("http://localhost:3000")));
        assert!(!guard.permits(Some("http://localhost:3001")));
        assert!(!guard.permits(Some("https://localhost:3000")));
        assert!(!guard.permits(Some("http://localhost:3000/")));
        assert!(!guard.permits(Some("null")));
        assert!(!guard.permits(None));
    }

    #[test]
    fn test_custom_origins() {
        let guard = OriginGuard::new(vec![
            "https://app.example.com".to_string(),
            "https://admin.example.com".to_string(),
        ]);
        assert!(guard.permits(Some("https://admin.example.com")));
        assert!(!guard.permits(Some(DEFAULT_ALLOWED_ORIGIN)));
    }
}
