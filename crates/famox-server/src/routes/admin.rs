//! Admin session and dashboard routes.
//!
//! There is a single admin session per provider, not per client. Logging
//! in from one client makes every client an admin until logout.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use famox_core::api::{LoginRequest, SessionStatus};
use famox_core::dashboard::DashboardStats;

use crate::error::AppError;
use crate::extract::ApiJson;
use crate::middleware::AdminGuard;
use crate::state::AppState;

/// Build the admin router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/session", get(session))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/dashboard", get(dashboard))
}

async fn session(State(state): State<Arc<AppState>>) -> Result<Json<SessionStatus>, AppError> {
    let authed = state.provider.is_admin_authed().await?;
    Ok(Json(SessionStatus { authed }))
}

async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<SessionStatus>, AppError> {
    if state.provider.admin_login(&body.password).await? {
        tracing::info!("admin logged in");
        Ok(Json(SessionStatus { authed: true }))
    } else {
        tracing::warn!("admin login failed");
        Err(AppError::Unauthorized("invalid password".to_owned()))
    }
}

async fn logout(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    state.provider.admin_logout().await?;
    tracing::info!("admin logged out");
    Ok(StatusCode::NO_CONTENT)
}

async fn dashboard(
    _admin: AdminGuard,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.provider.dashboard(Utc::now()).await?))
}
