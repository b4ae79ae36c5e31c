//! Session extractor for admin API handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::auth::session::session_token;
use crate::error::AppError;
use crate::state::AppState;

/// A valid admin session, read from the `admin_session` cookie (or a Bearer
/// token).
///
/// Every admin API handler takes this regardless of the gate mode, so a
/// missing session answers 401 with a redirect hint instead of running the
/// handler.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// The token's `jti`.
    pub session_id: String,
    /// Expiry as a UTC Unix timestamp.
    pub expires_at: i64,
}

impl AdminSession {
    pub fn from_headers(headers: &HeaderMap, jwt: &JwtConfig) -> Option<Self> {
        let token = session_token(headers)?;
        let claims = validate_token(&token, jwt).ok()?;
        Some(AdminSession {
            session_id: claims.jti,
            expires_at: claims.exp,
        })
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AdminSession::from_headers(&parts.headers, &state.config.jwt)
            .ok_or_else(|| AppError::Unauthenticated("Admin session required".into()))
    }
}
