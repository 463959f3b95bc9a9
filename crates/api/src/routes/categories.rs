//! Category management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::error_json};
use mizan_db::repositories::category::{CategoryError, CategoryRepository};

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories", post(create_category))
        .route("/categories/{category_id}", delete(delete_category))
}

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Category name, unique per company.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

async fn list_categories(State(state): State<AppState>, user: AuthUser) -> Response {
    let repo = CategoryRepository::new(state.conn());
    match repo.list_categories(user.company_id()).await {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => category_error(&e),
    }
}

async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateCategoryRequest>,
) -> Response {
    let repo = CategoryRepository::new(state.conn());
    match repo
        .create_category(user.company_id(), body.name, body.description)
        .await
    {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => category_error(&e),
    }
}

async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(category_id): Path<Uuid>,
) -> Response {
    let repo = CategoryRepository::new(state.conn());
    match repo.delete_category(user.company_id(), category_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => category_error(&e),
    }
}

fn category_error(e: &CategoryError) -> Response {
    let status = match e {
        CategoryError::NotFound(_) => 404,
        CategoryError::Database(_) => 500,
    };
    error_json(status, "CATEGORY_ERROR", &e.to_string())
}
