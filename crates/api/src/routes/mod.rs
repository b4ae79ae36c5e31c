pub mod content;
pub mod health;
pub mod pages;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /services, /impact, /support, /resources     public lists (GET)
///
/// /admin/session                               session status (GET)
/// /admin/{collection}                          create (POST, admin)
/// /admin/{collection}/{id}                     get, update (GET, PUT, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    let admin = content::admin_router().route("/session", get(handlers::session::status));

    Router::new()
        .merge(content::public_router())
        .nest("/admin", admin)
}
