//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod categories;
pub mod health;
pub mod partners;
pub mod products;
pub mod sales;
pub mod transactions;

/// Creates the API router: public health check plus JWT-protected resources.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(products::routes())
        .merge(categories::routes())
        .merge(transactions::routes())
        .merge(sales::routes())
        .merge(partners::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new().merge(health::routes()).merge(protected_routes)
}

/// Serializes a module error into the standard error envelope.
pub(crate) fn error_json(status: u16, code: &str, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({ "error": code, "message": message })),
    )
        .into_response()
}
