//! Enquiry routes.
//!
//! Submitting an enquiry is public (contact and quote forms). Listing,
//! reading, and updating enquiries is the admin inbox and needs a session.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use famox_core::filter::EnquiryFilter;
use famox_core::model::{Enquiry, EnquiryCreateInput, EnquiryPatch};

use crate::error::AppError;
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::AdminGuard;
use crate::state::AppState;

/// Build the enquiries router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(submit))
        .route("/{id}", get(show).patch(update))
}

async fn submit(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<EnquiryCreateInput>,
) -> Result<(StatusCode, Json<Enquiry>), AppError> {
    let enquiry = state.provider.create_enquiry(input).await?;
    tracing::info!(
        id = %enquiry.id,
        enquiry_type = %enquiry.enquiry_type,
        "enquiry submitted"
    );
    Ok((StatusCode::CREATED, Json(enquiry)))
}

async fn list(
    _admin: AdminGuard,
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<EnquiryFilter>,
) -> Result<Json<Vec<Enquiry>>, AppError> {
    let enquiries = state.provider.list_enquiries().await?;
    Ok(Json(filter.apply(enquiries)))
}

async fn show(
    _admin: AdminGuard,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Enquiry>, AppError> {
    state
        .provider
        .enquiry(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("enquiry", &id))
}

async fn update(
    _admin: AdminGuard,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<EnquiryPatch>,
) -> Result<Json<Enquiry>, AppError> {
    let enquiry = state
        .provider
        .update_enquiry(&id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("enquiry", &id))?;
    tracing::info!(id = %enquiry.id, status = %enquiry.status, "enquiry updated");
    Ok(Json(enquiry))
}
