//! HTTP route handlers.
//!
//! Routes are organized by entity family:
//! - `sys`: health
//! - `settings`: site settings (read public, update admin)
//! - `content`: catalogue, projects, media, solutions (read-only, public)
//! - `enquiries`: submit (public), list/show/update (admin)
//! - `admin`: session login/logout and dashboard counters

pub mod admin;
pub mod content;
pub mod enquiries;
pub mod settings;
pub mod sys;

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/v1/health", sys::router())
        .nest("/v1/settings", settings::router())
        .nest("/v1/catalogue", content::catalogue_router())
        .nest("/v1/projects", content::projects_router())
        .nest("/v1/media", content::media_router())
        .nest("/v1/solutions", content::solutions_router())
        .nest("/v1/enquiries", enquiries::router())
        .nest("/v1/admin", admin::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
