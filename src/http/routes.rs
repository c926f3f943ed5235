//! Route handlers and envelope rendering.

use crate::models::{CategoryListResponse, PromptDetailResponse, PromptListResponse};
use crate::services::{CatalogService, ListParams};
use crate::Error;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The catalog query service.
    pub catalog: Arc<CatalogService>,
}

/// Builds the API router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/prompts", get(list_prompts))
        .route("/api/v1/prompts/{id}", get(get_prompt))
        .route("/api/v1/categories", get(list_categories))
        .route("/", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Raw listing query parameters.
///
/// `page` and `limit` arrive as strings so that unparseable values fall back
/// to defaults instead of rejecting the request.
#[derive(Debug, Deserialize, Default)]
struct ListQuery {
    category: Option<String>,
    search: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

impl ListQuery {
    fn into_params(self) -> ListParams {
        ListParams {
            category: self.category,
            search: self.search,
            page: self.page.and_then(|p| p.parse().ok()),
            limit: self.limit.and_then(|l| l.parse().ok()),
        }
    }
}

/// Maps an error to the response status its kind calls for.
const fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::InvalidId(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::OperationFailed { .. } | Error::Timeout { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn list_prompts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> (StatusCode, Json<PromptListResponse>) {
    match state.catalog.list(&query.into_params()).await {
        Ok(page) => (
            StatusCode::OK,
            Json(PromptListResponse::ok(
                "Prompt list retrieved",
                page.prompts,
                page.total,
            )),
        ),
        Err(e) => (
            error_status(&e),
            Json(PromptListResponse::failure(format!(
                "Failed to list prompts: {e}"
            ))),
        ),
    }
}

async fn get_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<PromptDetailResponse>) {
    match state.catalog.get(&id).await {
        Ok(prompt) => (
            StatusCode::OK,
            Json(PromptDetailResponse::ok("Prompt detail retrieved", prompt)),
        ),
        Err(e @ Error::InvalidId(_)) => (
            error_status(&e),
            Json(PromptDetailResponse::failure("Invalid prompt id")),
        ),
        Err(e @ Error::NotFound(_)) => (
            error_status(&e),
            Json(PromptDetailResponse::failure("Prompt not found")),
        ),
        Err(e) => (
            error_status(&e),
            Json(PromptDetailResponse::failure(format!(
                "Failed to fetch prompt: {e}"
            ))),
        ),
    }
}

async fn list_categories(
    State(state): State<AppState>,
) -> (StatusCode, Json<CategoryListResponse>) {
    match state.catalog.categories().await {
        Ok(categories) => (
            StatusCode::OK,
            Json(CategoryListResponse::ok("Categories retrieved", categories)),
        ),
        Err(e) => (
            error_status(&e),
            Json(CategoryListResponse::failure(format!(
                "Failed to list categories: {e}"
            ))),
        ),
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "message": "promptdex API server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}
