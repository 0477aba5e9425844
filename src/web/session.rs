//! Anonymous per-browser sessions.
//!
//! Every request passes through [`session_layer`]. A request without a
//! valid `sid` cookie gets a fresh UUID v4, which is handed to the handler
//! through the request extensions and set on the response.

use axum::extract::{FromRequestParts, Request};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::convert::Infallible;
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Session identifier carried in the `sid` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a random session id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses a cookie value, accepting only UUIDs.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(|id| Self(id.to_string()))
    }

    /// Reads the session id from a `Cookie` header set.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Self::parse(value))
    }

    /// The id as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value for this id.
    #[must_use]
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Middleware that guarantees every request has a [`SessionId`].
pub async fn session_layer(mut request: Request, next: Next) -> Response {
    let existing = SessionId::from_headers(request.headers());
    let is_new = existing.is_none();
    let session = existing.unwrap_or_else(SessionId::generate);
    if is_new {
        debug!(sid = %session, "new session");
    }
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;
    if is_new {
        match HeaderValue::from_str(&session.cookie()) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => warn!(%err, "could not encode session cookie"),
        }
    }
    response
}

impl<S: Send + Sync> FromRequestParts<S> for SessionId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Self>()
            .cloned()
            .or_else(|| Self::from_headers(&parts.headers))
            .unwrap_or_else(Self::generate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_uuid() {
        let id = SessionId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, SessionId::generate());
    }

    #[test]
    fn test_parse_rejects_non_uuid() {
        assert!(SessionId::parse("not-a-uuid").is_none());
        assert!(SessionId::parse("").is_none());
        assert!(SessionId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").is_some());
    }

    #[test]
    fn test_from_headers_finds_sid_among_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; sid=67e55044-10b1-426f-9247-bb680e5fe0c8; x=1"),
        );
        let id = SessionId::from_headers(&headers).unwrap();
        assert_eq!(id.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_from_headers_ignores_invalid_sid() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("sid=forged"));
        assert!(SessionId::from_headers(&headers).is_none());
        assert!(SessionId::from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_cookie_attributes() {
        let id = SessionId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(
            id.cookie(),
            "sid=67e55044-10b1-426f-9247-bb680e5fe0c8; Path=/; HttpOnly; SameSite=Lax"
        );
    }
}
