//! Handlers for the admin session (login, logout, status).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use outreach_core::error::CoreError;
use outreach_core::gate::LOGIN_PATH;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_session_token;
use crate::auth::password::verify_password;
use crate::auth::session::{cleared_cookie, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::session::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    /// Expiry of the current session (UTC Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

/// POST /admin/login
///
/// Verify the shared admin password and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let valid = verify_password(&input.password, &state.config.admin_password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::warn!("Admin login rejected");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid password".into(),
        )));
    }

    let (token, claims) = generate_session_token(&state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    tracing::info!(session_id = %claims.jti, "Admin logged in");

    let cookie = session_cookie(
        &token,
        state.config.jwt.session_max_age_secs(),
        state.config.secure_cookies,
    );
    let body = DataResponse {
        data: SessionStatus {
            authenticated: true,
            expires_at: Some(claims.exp),
        },
    };
    Ok(([(SET_COOKIE, cookie)], Json(body)))
}

/// POST /admin/logout
///
/// Clear the session marker and go back to the login page. Tokens are not
/// tracked server-side, so nothing else is invalidated.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("Admin logged out");
    (
        [(SET_COOKIE, cleared_cookie(state.config.secure_cookies))],
        Redirect::to(LOGIN_PATH),
    )
}

/// GET /api/v1/admin/session
///
/// Lets the admin page shell check its session after mount (client gate).
pub async fn status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<DataResponse<SessionStatus>> {
    let session = AdminSession::from_headers(&headers, &state.config.jwt);
    Json(DataResponse {
        data: SessionStatus {
            authenticated: session.is_some(),
            expires_at: session.map(|s| s.expires_at),
        },
    })
}
