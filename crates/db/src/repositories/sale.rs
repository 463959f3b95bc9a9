//! Sale repository for point-of-sale database operations.
//!
//! Checkout is single-pass: the whole cart is validated against locked
//! product rows, the sale and its snapshot lines are created, totals are
//! computed, and stock is decremented, all inside one database transaction
//! so a failing line leaves nothing behind.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

use mizan_core::inventory::StockDelta;
use mizan_core::pos::{
    CartLine, PaymentMethod as CorePaymentMethod, PosError, PosService, ProductInfo,
    SaleStatus as CoreSaleStatus, SaleTotals, generate_receipt_number,
};

use crate::entities::{
    companies, products, sale_items, sales,
    sea_orm_active_enums::{PaymentMethod, SaleStatus},
};

use super::transaction::apply_stock_delta;

/// Input for a checkout.
#[derive(Debug, Clone)]
pub struct CheckoutInput {
    /// Cart lines; every line must be satisfiable or the checkout aborts.
    pub lines: Vec<CartLine>,
    /// Optional walk-in customer name.
    pub customer_name: Option<String>,
    /// Optional customer phone.
    pub customer_phone: Option<String>,
    /// Flat discount; overridden by a positive percentage.
    pub discount: Decimal,
    /// Percentage discount on the subtotal.
    pub discount_percentage: Decimal,
    /// How the customer paid.
    pub payment_method: CorePaymentMethod,
    /// Amount tendered.
    pub amount_paid: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Sale with its line items.
#[derive(Debug, Clone)]
pub struct SaleWithItems {
    /// Sale header.
    pub sale: sales::Model,
    /// Line items with price/cost snapshots.
    pub items: Vec<sale_items::Model>,
}

/// Sale repository for checkout and refunds.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db: DatabaseConnection,
}

impl SaleRepository {
    /// Creates a new sale repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Runs a checkout: validates every line against current stock
    /// (all-or-nothing), creates the sale with price/cost snapshots,
    /// computes totals from the company tax rate, and decrements stock.
    ///
    /// # Errors
    ///
    /// Returns `PosError::InsufficientStock` (or another validation error)
    /// without creating a sale or moving any stock.
    pub async fn checkout(
        &self,
        company_id: Uuid,
        cashier_id: Uuid,
        input: CheckoutInput,
    ) -> Result<SaleWithItems, PosError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let company = companies::Entity::find_by_id(company_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(PosError::CompanyNotFound(company_id))?;

        // Lock every product in the cart; concurrent checkouts on the same
        // products serialize here.
        let product_ids: Vec<Uuid> = input.lines.iter().map(|l| l.product_id).collect();
        let product_rows = products::Entity::find()
            .filter(products::Column::CompanyId.eq(company_id))
            .filter(products::Column::Id.is_in(product_ids))
            .lock_exclusive()
            .all(&txn)
            .await
            .map_err(db_err)?;

        PosService::validate_cart(&input.lines, |id| {
            product_rows.iter().find(|p| p.id == id).map(|p| ProductInfo {
                price: p.price,
                cost: p.cost,
                stock: p.stock,
                is_active: p.is_active,
            })
        })?;

        let subtotal: Decimal = input
            .lines
            .iter()
            .filter_map(|line| {
                product_rows
                    .iter()
                    .find(|p| p.id == line.product_id)
                    .map(|p| p.price * Decimal::from(line.quantity))
            })
            .sum();

        let totals = SaleTotals::calculate(
            subtotal,
            input.discount,
            input.discount_percentage,
            company.tax_rate,
            input.amount_paid,
        );

        let now = Utc::now().into();
        let sale_id = Uuid::new_v4();

        let sale = sales::ActiveModel {
            id: Set(sale_id),
            company_id: Set(company_id),
            cashier_id: Set(Some(cashier_id)),
            receipt_number: Set(generate_receipt_number()),
            customer_name: Set(input.customer_name),
            customer_phone: Set(input.customer_phone),
            subtotal: Set(totals.subtotal),
            discount: Set(totals.discount),
            discount_percentage: Set(input.discount_percentage),
            tax_amount: Set(totals.tax_amount),
            total: Set(totals.total),
            payment_method: Set(core_payment_to_db(input.payment_method)),
            amount_paid: Set(input.amount_paid),
            change: Set(totals.change),
            status: Set(SaleStatus::Completed),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let sale = sale.insert(&txn).await.map_err(db_err)?;

        let mut items = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            // validate_cart guarantees the product is present.
            let Some(product) = product_rows.iter().find(|p| p.id == line.product_id) else {
                continue;
            };
            let item = sale_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                sale_id: Set(sale_id),
                product_id: Set(Some(product.id)),
                quantity: Set(line.quantity),
                price: Set(product.price),
                cost: Set(product.cost),
                total: Set(product.price * Decimal::from(line.quantity)),
                created_at: Set(now),
            };
            items.push(item.insert(&txn).await.map_err(db_err)?);
        }

        // Only after the sale and totals are in place does stock move.
        for line in &input.lines {
            apply_stock_delta(
                &txn,
                company_id,
                StockDelta {
                    product_id: line.product_id,
                    delta: -line.quantity,
                },
                "checkout",
            )
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        Ok(SaleWithItems { sale, items })
    }

    /// Refunds a completed sale, handing every line's stock back.
    ///
    /// Refunding a non-completed sale is a benign failure and changes
    /// nothing, so a double refund can never hand stock back twice.
    ///
    /// # Errors
    ///
    /// Returns `PosError::CannotRefund` if the sale is not completed.
    pub async fn refund_sale(
        &self,
        company_id: Uuid,
        sale_id: Uuid,
    ) -> Result<sales::Model, PosError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let sale = sales::Entity::find_by_id(sale_id)
            .filter(sales::Column::CompanyId.eq(company_id))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(PosError::SaleNotFound(sale_id))?;

        let new_status = PosService::validate_refund(db_sale_status_to_core(&sale.status))?;

        let items = sale_items::Entity::find()
            .filter(sale_items::Column::SaleId.eq(sale_id))
            .all(&txn)
            .await
            .map_err(db_err)?;

        for item in &items {
            match item.product_id {
                Some(product_id) => {
                    apply_stock_delta(
                        &txn,
                        company_id,
                        StockDelta {
                            product_id,
                            delta: item.quantity,
                        },
                        "refund",
                    )
                    .await
                    .map_err(db_err)?;
                }
                None => {
                    warn!(item_id = %item.id, "skipping stock restore for sale item with vanished product");
                }
            }
        }

        let mut active: sales::ActiveModel = sale.into();
        active.status = Set(core_sale_status_to_db(new_status));
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(updated)
    }

    /// Lists a company's sales, newest first, optionally for one cashier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_sales(
        &self,
        company_id: Uuid,
        cashier_id: Option<Uuid>,
    ) -> Result<Vec<sales::Model>, PosError> {
        let mut query = sales::Entity::find().filter(sales::Column::CompanyId.eq(company_id));

        if let Some(cashier_id) = cashier_id {
            query = query.filter(sales::Column::CashierId.eq(cashier_id));
        }

        query
            .order_by_desc(sales::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Gets a sale with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the sale is not found.
    pub async fn get_sale(
        &self,
        company_id: Uuid,
        sale_id: Uuid,
    ) -> Result<SaleWithItems, PosError> {
        let sale = sales::Entity::find_by_id(sale_id)
            .filter(sales::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(PosError::SaleNotFound(sale_id))?;

        let items = sale_items::Entity::find()
            .filter(sale_items::Column::SaleId.eq(sale_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(SaleWithItems { sale, items })
    }
}

// ============================================================================
// Enum conversions between DB and core representations
// ============================================================================

/// Converts a DB sale status to the core representation.
#[must_use]
pub fn db_sale_status_to_core(status: &SaleStatus) -> CoreSaleStatus {
    match status {
        SaleStatus::Completed => CoreSaleStatus::Completed,
        SaleStatus::Refunded => CoreSaleStatus::Refunded,
        SaleStatus::Cancelled => CoreSaleStatus::Cancelled,
    }
}

/// Converts a core sale status to the DB representation.
#[must_use]
pub fn core_sale_status_to_db(status: CoreSaleStatus) -> SaleStatus {
    match status {
        CoreSaleStatus::Completed => SaleStatus::Completed,
        CoreSaleStatus::Refunded => SaleStatus::Refunded,
        CoreSaleStatus::Cancelled => SaleStatus::Cancelled,
    }
}

/// Converts a core payment method to the DB representation.
#[must_use]
pub fn core_payment_to_db(method: CorePaymentMethod) -> PaymentMethod {
    match method {
        CorePaymentMethod::Cash => PaymentMethod::Cash,
        CorePaymentMethod::Card => PaymentMethod::Card,
        CorePaymentMethod::Transfer => PaymentMethod::Transfer,
    }
}

fn db_err(e: sea_orm::DbErr) -> PosError {
    PosError::Database(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_status_conversion_round_trip() {
        for status in [
            SaleStatus::Completed,
            SaleStatus::Refunded,
            SaleStatus::Cancelled,
        ] {
            assert_eq!(
                core_sale_status_to_db(db_sale_status_to_core(&status)),
                status
            );
        }
    }

    #[test]
    fn test_payment_method_conversion() {
        assert_eq!(
            core_payment_to_db(CorePaymentMethod::Cash),
            PaymentMethod::Cash
        );
        assert_eq!(
            core_payment_to_db(CorePaymentMethod::Card),
            PaymentMethod::Card
        );
        assert_eq!(
            core_payment_to_db(CorePaymentMethod::Transfer),
            PaymentMethod::Transfer
        );
    }
}
