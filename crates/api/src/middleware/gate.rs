//! The admin page gate.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use outreach_core::gate::{decide, GateDecision, LOGIN_PATH};

use crate::middleware::session::AdminSession;
use crate::state::AppState;

/// Redirect admin page requests without a valid session to the login page.
///
/// In client mode the page shell is always served and the page checks
/// `/api/v1/admin/session` itself.
pub async fn admin_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let has_marker = AdminSession::from_headers(request.headers(), &state.config.jwt).is_some();
    let path = request.uri().path().to_owned();

    match decide(&path, has_marker, state.config.gate_mode) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::RedirectToLogin => {
            tracing::debug!(%path, "Admin page requested without a session");
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}
