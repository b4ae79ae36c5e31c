//! Route definitions for the four content collections.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;
use crate::workflow::{FormKind, ImpactForm, ResourceForm, ServiceForm, SupportForm};

/// Public list routes, one per collection.
///
/// ```text
/// GET /services
/// GET /impact
/// GET /support
/// GET /resources
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .merge(public::<ServiceForm>())
        .merge(public::<ImpactForm>())
        .merge(public::<SupportForm>())
        .merge(public::<ResourceForm>())
}

/// Admin form routes, one set per collection.
///
/// ```text
/// POST /{collection}        create (multipart)
/// GET  /{collection}/{id}   fetch for editing
/// PUT  /{collection}/{id}   update (multipart)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .merge(admin::<ServiceForm>())
        .merge(admin::<ImpactForm>())
        .merge(admin::<SupportForm>())
        .merge(admin::<ResourceForm>())
}

fn public<K: FormKind>() -> Router<AppState> {
    let slug = K::COLLECTION.slug();
    Router::new().route(&format!("/{slug}"), get(content::list::<K>))
}

fn admin<K: FormKind>() -> Router<AppState> {
    let slug = K::COLLECTION.slug();
    Router::new()
        .route(&format!("/{slug}"), post(content::create::<K>))
        .route(
            &format!("/{slug}/{{id}}"),
            get(content::find::<K>).put(content::update::<K>),
        )
}
