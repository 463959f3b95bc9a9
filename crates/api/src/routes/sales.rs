//! Point-of-sale routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::error_json};
use mizan_core::pos::{CartLine, PaymentMethod, PosError};
use mizan_db::entities::{sale_items, sales};
use mizan_db::repositories::sale::{CheckoutInput, SaleRepository, SaleWithItems};

/// Creates the sale routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales))
        .route("/sales/checkout", post(checkout))
        .route("/sales/{sale_id}", get(get_sale))
        .route("/sales/{sale_id}/refund", post(refund_sale))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for a checkout.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Cart lines.
    pub items: Vec<CheckoutItemRequest>,
    /// Optional walk-in customer name.
    pub customer_name: Option<String>,
    /// Optional customer phone.
    pub customer_phone: Option<String>,
    /// Flat discount.
    #[serde(default)]
    pub discount: Decimal,
    /// Percentage discount; takes precedence over the flat discount.
    #[serde(default)]
    pub discount_percentage: Decimal,
    /// Payment method: cash, card, or transfer.
    pub payment_method: String,
    /// Amount tendered.
    pub amount_paid: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// One requested cart line.
#[derive(Debug, Deserialize)]
pub struct CheckoutItemRequest {
    /// Product to sell.
    pub product_id: Uuid,
    /// Units requested.
    pub quantity: i32,
}

/// Response for a sale with its lines.
#[derive(Debug, Serialize)]
pub struct SaleResponse {
    /// Sale header.
    #[serde(flatten)]
    pub sale: sales::Model,
    /// Line items.
    pub items: Vec<sale_items::Model>,
}

impl From<SaleWithItems> for SaleResponse {
    fn from(value: SaleWithItems) -> Self {
        Self {
            sale: value.sale,
            items: value.items,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CheckoutRequest>,
) -> Response {
    let Some(payment_method) = PaymentMethod::parse(&body.payment_method) else {
        return error_json(
            400,
            "INVALID_PAYMENT_METHOD",
            &format!("Unknown payment method: {}", body.payment_method),
        );
    };

    let input = CheckoutInput {
        lines: body
            .items
            .into_iter()
            .map(|i| CartLine {
                product_id: i.product_id,
                quantity: i.quantity,
            })
            .collect(),
        customer_name: body.customer_name,
        customer_phone: body.customer_phone,
        discount: body.discount,
        discount_percentage: body.discount_percentage,
        payment_method,
        amount_paid: body.amount_paid,
        notes: body.notes,
    };

    let repo = SaleRepository::new(state.conn());
    match repo.checkout(user.company_id(), user.user_id(), input).await {
        Ok(sale) => (StatusCode::CREATED, Json(SaleResponse::from(sale))).into_response(),
        Err(e) => pos_error(&e),
    }
}

async fn list_sales(State(state): State<AppState>, user: AuthUser) -> Response {
    let repo = SaleRepository::new(state.conn());
    match repo.list_sales(user.company_id(), None).await {
        Ok(sales) => Json(sales).into_response(),
        Err(e) => pos_error(&e),
    }
}

async fn get_sale(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sale_id): Path<Uuid>,
) -> Response {
    let repo = SaleRepository::new(state.conn());
    match repo.get_sale(user.company_id(), sale_id).await {
        Ok(sale) => Json(SaleResponse::from(sale)).into_response(),
        Err(e) => pos_error(&e),
    }
}

async fn refund_sale(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sale_id): Path<Uuid>,
) -> Response {
    let repo = SaleRepository::new(state.conn());
    match repo.refund_sale(user.company_id(), sale_id).await {
        Ok(sale) => Json(json!({ "success": true, "sale": sale })).into_response(),
        Err(e) => pos_error(&e),
    }
}

fn pos_error(e: &PosError) -> Response {
    error_json(e.http_status_code(), e.error_code(), &e.to_string())
}
