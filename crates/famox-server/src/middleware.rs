//! Admin gate for HTTP handlers.
//!
//! Admin-only handlers take an [`AdminGuard`] argument. Extraction asks the
//! provider whether an admin session is active and rejects the request with
//! `401` when it is not, before the handler body runs.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request passed the admin gate.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

impl FromRequestParts<Arc<AppState>> for AdminGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if state.provider.is_admin_authed().await? {
            return Ok(Self);
        }
        tracing::debug!(path = %parts.uri.path(), "admin route rejected, no session");
        Err(AppError::Unauthorized("admin login required".to_owned()))
    }
}
