//! Partner (merchant/representative) routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::error_json};
use mizan_db::repositories::user::{UserError, UserRepository};

/// Creates the partner routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/partners", get(list_partners))
        .route("/partners/{user_id}/reconcile", post(reconcile_balances))
}

async fn list_partners(State(state): State<AppState>, user: AuthUser) -> Response {
    let repo = UserRepository::new(state.conn());
    match repo.list_partners(user.company_id()).await {
        Ok(partners) => Json(partners).into_response(),
        Err(e) => user_error(&e),
    }
}

/// Recomputes a partner's cached debt and products-held from the approved
/// transaction history and returns the refreshed row.
async fn reconcile_balances(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Response {
    let repo = UserRepository::new(state.conn());
    match repo.reconcile_balances(user.company_id(), user_id).await {
        Ok(partner) => Json(partner).into_response(),
        Err(e) => user_error(&e),
    }
}

fn user_error(e: &UserError) -> Response {
    let status = match e {
        UserError::NotFound(_) => 404,
        UserError::Database(_) => 500,
    };
    error_json(status, "USER_ERROR", &e.to_string())
}
