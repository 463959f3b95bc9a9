//! Product catalog routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::error_json};
use mizan_core::inventory::LedgerError;
use mizan_db::repositories::product::{
    CreateProductInput, ProductFilter, ProductRepository, UpdateProductInput,
};
use mizan_db::repositories::subscription::SubscriptionRepository;

/// Creates the product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products", post(create_product))
        .route("/products/low-stock", get(list_low_stock))
        .route("/products/{product_id}", get(get_product))
        .route("/products/{product_id}", patch(update_product))
        .route("/products/{product_id}", delete(delete_product))
}

/// Query parameters for listing products.
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    /// Filter by category.
    pub category: Option<Uuid>,
    /// Name/SKU/barcode search.
    pub search: Option<String>,
    /// Filter by active flag.
    pub active: Option<bool>,
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Product name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Sale price.
    pub price: Decimal,
    /// Unit cost.
    #[serde(default)]
    pub cost: Decimal,
    /// Opening stock.
    #[serde(default)]
    pub stock: i32,
    /// Low-stock threshold.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
    /// Optional SKU.
    pub sku: Option<String>,
    /// Optional barcode.
    pub barcode: Option<String>,
}

fn default_low_stock_threshold() -> i32 {
    10
}

/// Request body for updating a product.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateProductRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<Decimal>,
    /// New cost.
    pub cost: Option<Decimal>,
    /// New low-stock threshold.
    pub low_stock_threshold: Option<i32>,
    /// New SKU.
    pub sku: Option<String>,
    /// New barcode.
    pub barcode: Option<String>,
    /// Activate/deactivate.
    pub is_active: Option<bool>,
}

async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListProductsQuery>,
) -> Response {
    let repo = ProductRepository::new(state.conn());
    let filter = ProductFilter {
        category_id: query.category,
        search: query.search,
        is_active: query.active,
    };
    match repo.list_products(user.company_id(), filter).await {
        Ok(products) => Json(products).into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn list_low_stock(State(state): State<AppState>, user: AuthUser) -> Response {
    let repo = ProductRepository::new(state.conn());
    match repo.list_low_stock(user.company_id()).await {
        Ok(products) => Json(products).into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn get_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
) -> Response {
    let repo = ProductRepository::new(state.conn());
    match repo.get_product(user.company_id(), product_id).await {
        Ok(product) => Json(product).into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateProductRequest>,
) -> Response {
    // Plan limit gate.
    let subscriptions = SubscriptionRepository::new(state.conn());
    match subscriptions.check_product_limit(user.company_id()).await {
        Ok(limit) if !limit.allowed => {
            return error_json(
                422,
                "PLAN_LIMIT_REACHED",
                &format!(
                    "Product limit reached: {} of {} allowed by the plan",
                    limit.current, limit.max
                ),
            );
        }
        Ok(_) => {}
        Err(e) => return error_json(500, "SUBSCRIPTION_ERROR", &e.to_string()),
    }

    let repo = ProductRepository::new(state.conn());
    let input = CreateProductInput {
        name: body.name,
        description: body.description,
        category_id: body.category_id,
        price: body.price,
        cost: body.cost,
        stock: body.stock,
        low_stock_threshold: body.low_stock_threshold,
        sku: body.sku,
        barcode: body.barcode,
    };
    match repo.create_product(user.company_id(), input).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
    Json(body): Json<UpdateProductRequest>,
) -> Response {
    let repo = ProductRepository::new(state.conn());
    let input = UpdateProductInput {
        name: body.name,
        description: body.description,
        category_id: None,
        price: body.price,
        cost: body.cost,
        low_stock_threshold: body.low_stock_threshold,
        sku: body.sku,
        barcode: body.barcode,
        is_active: body.is_active,
    };
    match repo.update_product(user.company_id(), product_id, input).await {
        Ok(product) => Json(product).into_response(),
        Err(e) => ledger_error(&e),
    }
}

async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
) -> Response {
    let repo = ProductRepository::new(state.conn());
    match repo.delete_product(user.company_id(), product_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ledger_error(&e),
    }
}

pub(crate) fn ledger_error(e: &LedgerError) -> Response {
    error_json(e.http_status_code(), e.error_code(), &e.to_string())
}
