//! Transaction repository for ledger database operations.
//!
//! Orchestrates the core ledger rules inside database transactions: every
//! lifecycle mutation (approve, reject, delete, item edits) runs as one
//! atomic unit of {status change, stock deltas, balance recompute, totals
//! recompute}, with `SELECT ... FOR UPDATE` serializing access to contended
//! product and partner rows.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

use mizan_core::balance::{BalanceEngine, TransactionSummary};
use mizan_core::inventory::{
    CreateTransactionInput, ItemLine, LedgerError, LedgerService, StockDelta,
    TransactionStatus as CoreStatus, TransactionType as CoreType,
};
use mizan_core::workflow::{WorkflowError, WorkflowService};

use crate::entities::{
    products, transaction_items, transactions,
    sea_orm_active_enums::{TransactionStatus, TransactionType, UserRole},
    users,
};

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by status.
    pub status: Option<TransactionStatus>,
    /// Filter by transaction type.
    pub transaction_type: Option<TransactionType>,
    /// Filter by owning partner.
    pub user_id: Option<Uuid>,
}

/// Transaction with its line items.
#[derive(Debug, Clone)]
pub struct TransactionWithItems {
    /// Transaction header.
    pub transaction: transactions::Model,
    /// Line items.
    pub items: Vec<transaction_items::Model>,
}

/// Transaction repository for ledger operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new transaction in pending status.
    ///
    /// Item-backed transactions snapshot the current product price per line
    /// and derive their amount from the line totals; payment/fees take the
    /// caller's amount. No stock or balance effects are applied here; they
    /// are gated behind approval.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, a product cannot be resolved,
    /// or the database operation fails.
    pub async fn create_transaction(
        &self,
        company_id: Uuid,
        input: CreateTransactionInput,
    ) -> Result<TransactionWithItems, LedgerError> {
        LedgerService::validate_input(&input)?;

        let txn = self.db.begin().await.map_err(db_err)?;

        // Snapshot prices from the company's products.
        let product_ids: Vec<Uuid> = input.items.iter().map(|i| i.product_id).collect();
        let product_rows = products::Entity::find()
            .filter(products::Column::CompanyId.eq(company_id))
            .filter(products::Column::Id.is_in(product_ids))
            .all(&txn)
            .await
            .map_err(db_err)?;

        let lines = LedgerService::resolve_items(&input.items, |id| {
            product_rows.iter().find(|p| p.id == id).map(|p| p.price)
        })?;

        let amount = if input.transaction_type.is_item_backed() {
            LedgerService::amount_from_lines(&lines)
        } else {
            input.amount.unwrap_or(Decimal::ZERO)
        };

        let now = Utc::now().into();
        let transaction_id = Uuid::new_v4();

        let transaction = transactions::ActiveModel {
            id: Set(transaction_id),
            company_id: Set(company_id),
            user_id: Set(input.user_id),
            transaction_type: Set(core_type_to_db(input.transaction_type)),
            status: Set(TransactionStatus::Pending),
            amount: Set(amount),
            notes: Set(input.notes),
            approved_by: Set(None),
            approved_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let transaction = transaction.insert(&txn).await.map_err(db_err)?;

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let item = transaction_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                transaction_id: Set(transaction_id),
                product_id: Set(line.product_id),
                quantity: Set(line.quantity),
                price: Set(line.price),
                total: Set(line.total),
                created_at: Set(now),
            };
            items.push(item.insert(&txn).await.map_err(db_err)?);
        }

        txn.commit().await.map_err(db_err)?;

        Ok(TransactionWithItems { transaction, items })
    }

    /// Approves a pending transaction, applying its effects atomically:
    /// status change, per-item stock deltas, and the partner balance
    /// recompute all land together or not at all.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AlreadyProcessed` if the transaction is not
    /// pending. This is a benign, expected failure.
    pub async fn approve_transaction(
        &self,
        company_id: Uuid,
        transaction_id: Uuid,
        approved_by: Uuid,
    ) -> Result<transactions::Model, WorkflowError> {
        let txn = self.db.begin().await.map_err(wf_err)?;

        let transaction = find_for_update(&txn, company_id, transaction_id)
            .await
            .map_err(wf_err)?
            .ok_or(WorkflowError::TransactionNotFound(transaction_id))?;

        let _action =
            WorkflowService::approve(db_status_to_core(&transaction.status), approved_by)?;

        let transaction_type = db_type_to_core(&transaction.transaction_type);
        let items = find_items(&txn, transaction_id).await.map_err(wf_err)?;
        let lines = item_lines(&items);

        for delta in LedgerService::approval_stock_deltas(transaction_type, &lines) {
            apply_stock_delta(&txn, company_id, delta, "approval")
                .await
                .map_err(wf_err)?;
        }

        let now = Utc::now();
        let user_id = transaction.user_id;
        let mut active: transactions::ActiveModel = transaction.into();
        active.status = Set(TransactionStatus::Approved);
        active.approved_by = Set(Some(approved_by));
        active.approved_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        let updated = active.update(&txn).await.map_err(wf_err)?;

        if let Some(user_id) = user_id {
            recompute_user_balances(&txn, user_id, None)
                .await
                .map_err(wf_err)?;
        }

        txn.commit().await.map_err(wf_err)?;
        Ok(updated)
    }

    /// Rejects a pending transaction. Nothing was ever applied, so there is
    /// nothing to reverse; only the status and approver are recorded.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AlreadyProcessed` if the transaction is not
    /// pending.
    pub async fn reject_transaction(
        &self,
        company_id: Uuid,
        transaction_id: Uuid,
        rejected_by: Uuid,
    ) -> Result<transactions::Model, WorkflowError> {
        let txn = self.db.begin().await.map_err(wf_err)?;

        let transaction = find_for_update(&txn, company_id, transaction_id)
            .await
            .map_err(wf_err)?
            .ok_or(WorkflowError::TransactionNotFound(transaction_id))?;

        let _action =
            WorkflowService::reject(db_status_to_core(&transaction.status), rejected_by)?;

        let now = Utc::now();
        let mut active: transactions::ActiveModel = transaction.into();
        active.status = Set(TransactionStatus::Rejected);
        active.approved_by = Set(Some(rejected_by));
        active.approved_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        let updated = active.update(&txn).await.map_err(wf_err)?;

        txn.commit().await.map_err(wf_err)?;
        Ok(updated)
    }

    /// Deletes a transaction, reversing its effects if it was approved.
    ///
    /// An approved transaction hands every item's stock back (lines whose
    /// product has vanished are skipped with a warning rather than aborting
    /// the delete) and the partner's balances are recomputed as if the
    /// transaction never existed. Pending and rejected transactions are
    /// removed without any reversal.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not found or the database
    /// operation fails.
    pub async fn delete_transaction(
        &self,
        company_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), LedgerError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let transaction = find_for_update(&txn, company_id, transaction_id)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;

        let status = db_status_to_core(&transaction.status);
        let transaction_type = db_type_to_core(&transaction.transaction_type);

        if WorkflowService::requires_reversal(status) {
            let items = find_items(&txn, transaction_id).await.map_err(db_err)?;
            let lines = item_lines(&items);

            for delta in LedgerService::reversal_stock_deltas(transaction_type, &lines) {
                apply_stock_delta(&txn, company_id, delta, "deletion reversal")
                    .await
                    .map_err(db_err)?;
            }

            if let Some(user_id) = transaction.user_id {
                // Recompute as if this transaction did not exist, then drop it.
                recompute_user_balances(&txn, user_id, Some(transaction_id))
                    .await
                    .map_err(db_err)?;
            }
        }

        // Items cascade with the header.
        transactions::Entity::delete_by_id(transaction_id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    /// Adds a line to a transaction.
    ///
    /// The price is snapshotted from the product now and never rewritten.
    /// If the parent is already approved, the line's stock effect is applied
    /// immediately and balances are recomputed; a pending parent defers all
    /// effects to approval time. Rejected parents are frozen.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction/product is not found, the parent
    /// is rejected, the type carries no items, or the quantity is negative.
    pub async fn add_item(
        &self,
        company_id: Uuid,
        transaction_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<transaction_items::Model, LedgerError> {
        if quantity < 0 {
            return Err(LedgerError::NegativeQuantity(quantity));
        }

        let txn = self.db.begin().await.map_err(db_err)?;

        let transaction = find_for_update(&txn, company_id, transaction_id)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;

        let transaction_type = db_type_to_core(&transaction.transaction_type);
        if !transaction_type.is_item_backed() {
            return Err(LedgerError::ItemsNotAllowed(transaction_type.as_str()));
        }
        let status = db_status_to_core(&transaction.status);
        if status == CoreStatus::Rejected {
            return Err(LedgerError::ItemsFrozen(status));
        }

        let product = products::Entity::find_by_id(product_id)
            .filter(products::Column::CompanyId.eq(company_id))
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::ProductNotFound(product_id))?;

        let price = LedgerService::snapshot_price(None, product.price);
        let item = transaction_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            transaction_id: Set(transaction_id),
            product_id: Set(Some(product_id)),
            quantity: Set(quantity),
            price: Set(price),
            total: Set(LedgerService::line_total(price, quantity)),
            created_at: Set(Utc::now().into()),
        };
        let item = item.insert(&txn).await.map_err(db_err)?;

        if status.is_effective() {
            if let Some(delta) =
                LedgerService::edit_stock_delta(transaction_type, product_id, 0, quantity)
            {
                apply_stock_delta(&txn, company_id, delta, "item add").await.map_err(db_err)?;
            }
        }

        self.finish_item_mutation(txn, transaction, status).await?;
        Ok(item)
    }

    /// Updates a line's quantity.
    ///
    /// The snapshotted price is immutable; the total is recomputed. On an
    /// approved parent only the quantity *delta* moves stock, so an edit
    /// never double-counts what approval already applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found, the parent is rejected,
    /// or the quantity is negative.
    pub async fn update_item(
        &self,
        company_id: Uuid,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<transaction_items::Model, LedgerError> {
        if quantity < 0 {
            return Err(LedgerError::NegativeQuantity(quantity));
        }

        let txn = self.db.begin().await.map_err(db_err)?;

        let item = transaction_items::Entity::find_by_id(item_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::ItemNotFound(item_id))?;

        let transaction = find_for_update(&txn, company_id, item.transaction_id)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::TransactionNotFound(item.transaction_id))?;

        let transaction_type = db_type_to_core(&transaction.transaction_type);
        let status = db_status_to_core(&transaction.status);
        if status == CoreStatus::Rejected {
            return Err(LedgerError::ItemsFrozen(status));
        }

        let old_quantity = item.quantity;
        let price = item.price;
        let product_id = item.product_id;

        let mut active: transaction_items::ActiveModel = item.into();
        active.quantity = Set(quantity);
        active.total = Set(LedgerService::line_total(price, quantity));
        let updated = active.update(&txn).await.map_err(db_err)?;

        if status.is_effective() {
            match product_id {
                Some(product_id) => {
                    if let Some(delta) = LedgerService::edit_stock_delta(
                        transaction_type,
                        product_id,
                        old_quantity,
                        quantity,
                    ) {
                        apply_stock_delta(&txn, company_id, delta, "item edit")
                            .await
                            .map_err(db_err)?;
                    }
                }
                None => {
                    warn!(item_id = %item_id, "skipping stock adjustment for item with vanished product");
                }
            }
        }

        self.finish_item_mutation(txn, transaction, status).await?;
        Ok(updated)
    }

    /// Removes a line from a transaction.
    ///
    /// On an approved parent the line's full quantity is handed back to
    /// stock before the row is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found or the parent is rejected.
    pub async fn delete_item(&self, company_id: Uuid, item_id: Uuid) -> Result<(), LedgerError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let item = transaction_items::Entity::find_by_id(item_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::ItemNotFound(item_id))?;

        let transaction = find_for_update(&txn, company_id, item.transaction_id)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::TransactionNotFound(item.transaction_id))?;

        let transaction_type = db_type_to_core(&transaction.transaction_type);
        let status = db_status_to_core(&transaction.status);
        if status == CoreStatus::Rejected {
            return Err(LedgerError::ItemsFrozen(status));
        }

        if status.is_effective() {
            let line = ItemLine {
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
                total: item.total,
            };
            match LedgerService::removal_stock_delta(transaction_type, &line) {
                Some(delta) => {
                    apply_stock_delta(&txn, company_id, delta, "item removal")
                        .await
                        .map_err(db_err)?;
                }
                None if line.product_id.is_none() => {
                    warn!(item_id = %item_id, "skipping stock reversal for item with vanished product");
                }
                None => {}
            }
        }

        transaction_items::Entity::delete_by_id(item_id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        self.finish_item_mutation(txn, transaction, status).await?;
        Ok(())
    }

    /// Lists transactions with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(
        &self,
        company_id: Uuid,
        filter: TransactionFilter,
    ) -> Result<Vec<transactions::Model>, LedgerError> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::CompanyId.eq(company_id));

        if let Some(status) = filter.status {
            query = query.filter(transactions::Column::Status.eq(status));
        }
        if let Some(tx_type) = filter.transaction_type {
            query = query.filter(transactions::Column::TransactionType.eq(tx_type));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(transactions::Column::UserId.eq(user_id));
        }

        query
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Gets a transaction with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not found.
    pub async fn get_transaction(
        &self,
        company_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<TransactionWithItems, LedgerError> {
        let transaction = transactions::Entity::find_by_id(transaction_id)
            .filter(transactions::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;

        let items = find_items(&self.db, transaction_id).await.map_err(db_err)?;

        Ok(TransactionWithItems { transaction, items })
    }

    /// Shared tail of every item mutation: recompute the parent's amount
    /// from its surviving lines, and re-derive partner balances when the
    /// parent is already effective.
    async fn finish_item_mutation(
        &self,
        txn: DatabaseTransaction,
        transaction: transactions::Model,
        status: CoreStatus,
    ) -> Result<(), LedgerError> {
        let transaction_id = transaction.id;
        let user_id = transaction.user_id;

        let items = find_items(&txn, transaction_id).await.map_err(db_err)?;
        let amount = LedgerService::amount_from_lines(&item_lines(&items));

        let mut active: transactions::ActiveModel = transaction.into();
        active.amount = Set(amount);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await.map_err(db_err)?;

        if status.is_effective()
            && let Some(user_id) = user_id
        {
            recompute_user_balances(&txn, user_id, None)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)
    }
}

// ============================================================================
// Shared helpers (also used by the sale repository)
// ============================================================================

/// Fetches a company's transaction row with a row lock, serializing
/// concurrent lifecycle mutations on the same aggregate.
async fn find_for_update(
    txn: &DatabaseTransaction,
    company_id: Uuid,
    transaction_id: Uuid,
) -> Result<Option<transactions::Model>, sea_orm::DbErr> {
    transactions::Entity::find_by_id(transaction_id)
        .filter(transactions::Column::CompanyId.eq(company_id))
        .lock_exclusive()
        .one(txn)
        .await
}

async fn find_items<C: ConnectionTrait>(
    conn: &C,
    transaction_id: Uuid,
) -> Result<Vec<transaction_items::Model>, sea_orm::DbErr> {
    transaction_items::Entity::find()
        .filter(transaction_items::Column::TransactionId.eq(transaction_id))
        .all(conn)
        .await
}

/// Applies one signed stock delta under a row lock. A vanished product is
/// logged and skipped; reversal must never abort a deletion over it.
pub(crate) async fn apply_stock_delta<C: ConnectionTrait>(
    conn: &C,
    company_id: Uuid,
    delta: StockDelta,
    context: &str,
) -> Result<(), sea_orm::DbErr> {
    let product = products::Entity::find_by_id(delta.product_id)
        .filter(products::Column::CompanyId.eq(company_id))
        .lock_exclusive()
        .one(conn)
        .await?;

    let Some(product) = product else {
        warn!(
            product_id = %delta.product_id,
            context,
            "skipping stock adjustment for missing product"
        );
        return Ok(());
    };

    let stock = product.stock + delta.delta;
    let mut active: products::ActiveModel = product.into();
    active.stock = Set(stock);
    active.update(conn).await?;
    Ok(())
}

/// Recomputes a partner's cached aggregates from their approved history.
///
/// `exclude` recomputes "as if transaction X did not exist" and is used
/// while deleting X. Only partner roles carry the aggregates: merchants get
/// debt and products_count, representatives products_count only.
pub(crate) async fn recompute_user_balances<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    exclude: Option<Uuid>,
) -> Result<(), sea_orm::DbErr> {
    let user = users::Entity::find_by_id(user_id)
        .lock_exclusive()
        .one(conn)
        .await?;
    let Some(user) = user else {
        // Reference already nulled; nothing to maintain.
        return Ok(());
    };
    if !user.role.is_partner() {
        return Ok(());
    }

    let approved = transactions::Entity::find()
        .filter(transactions::Column::UserId.eq(user_id))
        .filter(transactions::Column::Status.eq(TransactionStatus::Approved))
        .all(conn)
        .await?;

    let ids: Vec<Uuid> = approved.iter().map(|t| t.id).collect();
    let items = transaction_items::Entity::find()
        .filter(transaction_items::Column::TransactionId.is_in(ids))
        .all(conn)
        .await?;

    let history = build_summaries(&approved, &items);
    let balances = BalanceEngine::recompute(&history, exclude);

    let is_merchant = user.role == UserRole::Merchant;
    let mut active: users::ActiveModel = user.into();
    active.products_count = Set(balances.products_count);
    if is_merchant {
        active.debt = Set(balances.debt);
    }
    active.updated_at = Set(Utc::now().into());
    active.update(conn).await?;
    Ok(())
}

/// Folds transaction headers and their lines into the balance engine's
/// input rows.
pub(crate) fn build_summaries(
    transactions: &[transactions::Model],
    items: &[transaction_items::Model],
) -> Vec<TransactionSummary> {
    transactions
        .iter()
        .map(|tx| TransactionSummary {
            id: tx.id,
            transaction_type: db_type_to_core(&tx.transaction_type),
            amount: tx.amount,
            units: items
                .iter()
                .filter(|i| i.transaction_id == tx.id)
                .map(|i| i64::from(i.quantity))
                .sum(),
        })
        .collect()
}

/// Views persisted line rows as the ledger engine's lines.
pub(crate) fn item_lines(items: &[transaction_items::Model]) -> Vec<ItemLine> {
    items
        .iter()
        .map(|i| ItemLine {
            product_id: i.product_id,
            quantity: i.quantity,
            price: i.price,
            total: i.total,
        })
        .collect()
}

// ============================================================================
// Enum conversions between DB and core representations
// ============================================================================

/// Converts a DB transaction status to the core representation.
#[must_use]
pub fn db_status_to_core(status: &TransactionStatus) -> CoreStatus {
    match status {
        TransactionStatus::Pending => CoreStatus::Pending,
        TransactionStatus::Approved => CoreStatus::Approved,
        TransactionStatus::Rejected => CoreStatus::Rejected,
    }
}

/// Converts a DB transaction type to the core representation.
#[must_use]
pub fn db_type_to_core(transaction_type: &TransactionType) -> CoreType {
    match transaction_type {
        TransactionType::Take => CoreType::Take,
        TransactionType::Restore => CoreType::Restore,
        TransactionType::Payment => CoreType::Payment,
        TransactionType::Fees => CoreType::Fees,
    }
}

/// Converts a core transaction type to the DB representation.
#[must_use]
pub fn core_type_to_db(transaction_type: CoreType) -> TransactionType {
    match transaction_type {
        CoreType::Take => TransactionType::Take,
        CoreType::Restore => TransactionType::Restore,
        CoreType::Payment => TransactionType::Payment,
        CoreType::Fees => TransactionType::Fees,
    }
}

fn db_err(e: sea_orm::DbErr) -> LedgerError {
    LedgerError::Database(e.to_string())
}

fn wf_err(e: sea_orm::DbErr) -> WorkflowError {
    WorkflowError::Database(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn tx_model(
        id: Uuid,
        user_id: Uuid,
        transaction_type: TransactionType,
        amount: Decimal,
    ) -> transactions::Model {
        let now = Utc::now().into();
        transactions::Model {
            id,
            company_id: Uuid::new_v4(),
            user_id: Some(user_id),
            transaction_type,
            status: TransactionStatus::Approved,
            amount,
            notes: None,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn item_model(transaction_id: Uuid, quantity: i32, price: Decimal) -> transaction_items::Model {
        transaction_items::Model {
            id: Uuid::new_v4(),
            transaction_id,
            product_id: Some(Uuid::new_v4()),
            quantity,
            price,
            total: price * Decimal::from(quantity),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_status_conversion_round_trip() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Approved,
            TransactionStatus::Rejected,
        ] {
            let core = db_status_to_core(&status);
            assert_eq!(core.as_str(), format!("{status:?}").to_lowercase());
        }
    }

    #[test]
    fn test_type_conversion_round_trip() {
        for tx_type in [
            TransactionType::Take,
            TransactionType::Restore,
            TransactionType::Payment,
            TransactionType::Fees,
        ] {
            assert_eq!(core_type_to_db(db_type_to_core(&tx_type)), tx_type);
        }
    }

    #[test]
    fn test_build_summaries_sums_units_per_transaction() {
        let user = Uuid::new_v4();
        let take = tx_model(Uuid::new_v4(), user, TransactionType::Take, dec!(100));
        let restore = tx_model(Uuid::new_v4(), user, TransactionType::Restore, dec!(30));

        let items = vec![
            item_model(take.id, 3, dec!(10)),
            item_model(take.id, 7, dec!(10)),
            item_model(restore.id, 2, dec!(15)),
        ];

        let summaries = build_summaries(&[take.clone(), restore.clone()], &items);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].units, 10);
        assert_eq!(summaries[1].units, 2);

        // Feeding the summaries to the engine gives take minus restore.
        assert_eq!(BalanceEngine::products_count(&summaries, None), 8);
        assert_eq!(BalanceEngine::debt(&summaries, None), dec!(100));
    }

    #[test]
    fn test_item_lines_preserve_invariant_fields() {
        let items = vec![item_model(Uuid::new_v4(), 4, dec!(2.50))];
        let lines = item_lines(&items);
        assert_eq!(lines[0].quantity, 4);
        assert_eq!(lines[0].price, dec!(2.50));
        assert_eq!(lines[0].total, dec!(10.00));
    }
}
