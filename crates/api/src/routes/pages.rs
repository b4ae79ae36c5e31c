//! Login/logout and the static site, behind the admin page gate.

use axum::middleware;
use axum::routing::{get_service, post};
use axum::Router;
use outreach_core::gate::LOGIN_PATH;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::ServerConfig;
use crate::handlers::session;
use crate::middleware::gate::admin_gate;
use crate::state::AppState;

/// ```text
/// GET  /admin/login    login page
/// POST /admin/login    login
/// POST /admin/logout   logout
/// GET  /*              static assets; `/admin/*` gated
/// ```
pub fn router(state: AppState, config: &ServerConfig) -> Router<AppState> {
    let login_page = ServeFile::new(config.assets_dir.join("admin").join("login.html"));
    let assets = ServeDir::new(&config.assets_dir).append_index_html_on_directories(true);

    Router::new()
        .route(LOGIN_PATH, get_service(login_page).post(session::login))
        .route("/admin/logout", post(session::logout))
        .fallback_service(assets)
        .layer(middleware::from_fn_with_state(state, admin_gate))
}
