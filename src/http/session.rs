//! Session cookie extraction.
//!
//! The session id travels in a `sid` cookie. The extractor never rejects: a
//! request without the cookie gets a freshly generated id, and handlers that
//! touch the cart echo the id back with `Set-Cookie` so the client keeps it.

use crate::{http::AppState, session::SessionId};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::{convert::Infallible, sync::Arc};

/// Name of the session cookie.
const SESSION_COOKIE: &str = "sid";

/// The calling client's session, resolved from the request cookies.
pub struct ClientSession {
    /// Session id, existing or freshly generated
    pub id: SessionId,
}

impl ClientSession {
    /// The `Set-Cookie` header pair that pins this session on the client.
    #[must_use]
    pub fn set_cookie(&self) -> (header::HeaderName, String) {
        (
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id),
        )
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for ClientSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(read_session_cookie);

        let id = existing.map_or_else(SessionId::generate, SessionId::new);
        Ok(Self { id })
    }
}

fn read_session_cookie(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_session_cookie() {
        assert_eq!(
            read_session_cookie("sid=abc123").as_deref(),
            Some("abc123")
        );
        assert_eq!(
            read_session_cookie("theme=dark; sid=abc123; lang=en").as_deref(),
            Some("abc123")
        );
        assert_eq!(read_session_cookie("theme=dark"), None);
        assert_eq!(read_session_cookie(""), None);
    }
}
