//! Read-only content routes: catalogue, projects, media, solutions.
//!
//! Each family exposes a list at `/` and a slug lookup at `/{slug}`.
//! The catalogue list also accepts the catalogue page filters as query
//! parameters.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use famox_core::filter::CatalogueFilter;
use famox_core::model::{CatalogueItem, MediaPost, Project, Solution};

use crate::error::AppError;
use crate::extract::ApiQuery;
use crate::state::AppState;

pub fn catalogue_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_catalogue))
        .route("/{slug}", get(show_catalogue_item))
}

pub fn projects_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_projects))
        .route("/{slug}", get(show_project))
}

pub fn media_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_media))
        .route("/{slug}", get(show_media_post))
}

pub fn solutions_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_solutions))
        .route("/{slug}", get(show_solution))
}

// ── Catalogue ────────────────────────────────────────────────────────

async fn list_catalogue(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<CatalogueFilter>,
) -> Result<Json<Vec<CatalogueItem>>, AppError> {
    let items = state.provider.list_catalogue().await?;
    Ok(Json(filter.apply(items)))
}

async fn show_catalogue_item(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<CatalogueItem>, AppError> {
    state
        .provider
        .catalogue_item(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("catalogue item", &slug))
}

// ── Projects ─────────────────────────────────────────────────────────

async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.provider.list_projects().await?))
}

async fn show_project(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Project>, AppError> {
    state
        .provider
        .project(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("project", &slug))
}

// ── Media ────────────────────────────────────────────────────────────

async fn list_media(State(state): State<Arc<AppState>>) -> Result<Json<Vec<MediaPost>>, AppError> {
    Ok(Json(state.provider.list_media().await?))
}

async fn show_media_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<MediaPost>, AppError> {
    state
        .provider
        .media_post(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("media post", &slug))
}

// ── Solutions ────────────────────────────────────────────────────────

async fn list_solutions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Solution>>, AppError> {
    Ok(Json(state.provider.list_solutions().await?))
}

async fn show_solution(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Solution>, AppError> {
    state
        .provider
        .solution(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("solution", &slug))
}
