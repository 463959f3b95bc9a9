//! Transaction ledger routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::error_json, routes::products::ledger_error};
use mizan_core::inventory::{CreateTransactionInput, ItemInput, TransactionType};
use mizan_core::workflow::WorkflowError;
use mizan_db::entities::{transaction_items, transactions};
use mizan_db::repositories::transaction::{
    TransactionFilter, TransactionRepository, TransactionWithItems, core_type_to_db,
};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{transaction_id}", get(get_transaction))
        .route("/transactions/{transaction_id}", delete(delete_transaction))
        .route("/transactions/{transaction_id}/approve", post(approve_transaction))
        .route("/transactions/{transaction_id}/reject", post(reject_transaction))
        .route("/transactions/{transaction_id}/items", post(add_item))
        .route("/transaction-items/{item_id}", patch(update_item))
        .route("/transaction-items/{item_id}", delete(delete_item))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by transaction type.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Filter by owning partner.
    pub user: Option<Uuid>,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Transaction type: take, restore, payment, or fees.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Owning partner; required for everything but fees.
    pub user_id: Option<Uuid>,
    /// Amount for payment/fees; ignored for item-backed types.
    pub amount: Option<Decimal>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Requested lines for take/restore.
    #[serde(default)]
    pub items: Vec<CreateItemRequest>,
}

/// One requested line.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    /// Product to move.
    pub product_id: Uuid,
    /// Units requested.
    pub quantity: i32,
}

/// Request body for updating a line's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    /// New quantity.
    pub quantity: i32,
}

/// Response for a transaction with its lines.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction header.
    #[serde(flatten)]
    pub transaction: transactions::Model,
    /// Line items.
    pub items: Vec<transaction_items::Model>,
}

impl From<TransactionWithItems> for TransactionResponse {
    fn from(value: TransactionWithItems) -> Self {
        Self {
            transaction: value.transaction,
            items: value.items,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Response {
    use mizan_core::inventory::TransactionStatus;

    let mut filter = TransactionFilter {
        user_id: query.user,
        ..TransactionFilter::default()
    };
    if let Some(status) = query.status {
        match TransactionStatus::parse(&status) {
            Some(parsed) => {
                filter.status = Some(match parsed {
                    TransactionStatus::Pending => {
                        mizan_db::entities::sea_orm_active_enums::TransactionStatus::Pending
                    }
                    TransactionStatus::Approved => {
                        mizan_db::entities::sea_orm_active_enums::TransactionStatus::Approved
                    }
                    TransactionStatus::Rejected => {
                        mizan_db::entities::sea_orm_active_enums::TransactionStatus::Rejected
                    }
                });
            }
            None => return error_json(400, "INVALID_STATUS", &format!("Unknown status: {status}")),
        }
    }
    if let Some(tx_type) = query.transaction_type {
        match TransactionType::parse(&tx_type) {
            Some(parsed) => filter.transaction_type = Some(core_type_to_db(parsed)),
            None => return error_json(400, "INVALID_TYPE", &format!("Unknown type: {tx_type}")),
        }
    }

    let repo = TransactionRepository::new(state.conn());
    match repo.list_transactions(user.company_id(), filter).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn get_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> Response {
    let repo = TransactionRepository::new(state.conn());
    match repo.get_transaction(user.company_id(), transaction_id).await {
        Ok(tx) => Json(TransactionResponse::from(tx)).into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateTransactionRequest>,
) -> Response {
    let Some(transaction_type) = TransactionType::parse(&body.transaction_type) else {
        return error_json(
            400,
            "INVALID_TYPE",
            &format!("Unknown type: {}", body.transaction_type),
        );
    };

    let input = CreateTransactionInput {
        user_id: body.user_id,
        transaction_type,
        amount: body.amount,
        notes: body.notes,
        items: body
            .items
            .into_iter()
            .map(|i| ItemInput {
                product_id: i.product_id,
                quantity: i.quantity,
            })
            .collect(),
    };

    let repo = TransactionRepository::new(state.conn());
    match repo.create_transaction(user.company_id(), input).await {
        Ok(tx) => (StatusCode::CREATED, Json(TransactionResponse::from(tx))).into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn delete_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> Response {
    let repo = TransactionRepository::new(state.conn());
    match repo.delete_transaction(user.company_id(), transaction_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn approve_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> Response {
    let repo = TransactionRepository::new(state.conn());
    match repo
        .approve_transaction(user.company_id(), transaction_id, user.user_id())
        .await
    {
        Ok(tx) => Json(json!({ "success": true, "transaction": tx })).into_response(),
        Err(e) => workflow_error(&e),
    }
}

async fn reject_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> Response {
    let repo = TransactionRepository::new(state.conn());
    match repo
        .reject_transaction(user.company_id(), transaction_id, user.user_id())
        .await
    {
        Ok(tx) => Json(json!({ "success": true, "transaction": tx })).into_response(),
        Err(e) => workflow_error(&e),
    }
}

async fn add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<Uuid>,
    Json(body): Json<CreateItemRequest>,
) -> Response {
    let repo = TransactionRepository::new(state.conn());
    match repo
        .add_item(user.company_id(), transaction_id, body.product_id, body.quantity)
        .await
    {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
    Json(body): Json<UpdateItemRequest>,
) -> Response {
    let repo = TransactionRepository::new(state.conn());
    match repo.update_item(user.company_id(), item_id, body.quantity).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
) -> Response {
    let repo = TransactionRepository::new(state.conn());
    match repo.delete_item(user.company_id(), item_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ledger_error(&e),
    }
}

fn workflow_error(e: &WorkflowError) -> Response {
    error_json(e.status_code(), e.error_code(), &e.to_string())
}
