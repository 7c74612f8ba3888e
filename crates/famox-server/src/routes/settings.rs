//! Site settings routes.
//!
//! Reading settings is public, the footer and contact page need them.
//! Updating them requires an admin session.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use famox_core::model::{SiteSettings, SiteSettingsPatch};

use crate::error::AppError;
use crate::extract::ApiJson;
use crate::middleware::AdminGuard;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(show).patch(update))
}

async fn show(State(state): State<Arc<AppState>>) -> Result<Json<SiteSettings>, AppError> {
    Ok(Json(state.provider.settings().await?))
}

async fn update(
    _admin: AdminGuard,
    State(state): State<Arc<AppState>>,
    ApiJson(patch): ApiJson<SiteSettingsPatch>,
) -> Result<Json<SiteSettings>, AppError> {
    let settings = state.provider.update_settings(&patch).await?;
    tracing::info!("site settings updated");
    Ok(Json(settings))
}
