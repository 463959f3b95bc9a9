//! Product repository for catalog and stock queries.
//!
//! Stock is never mutated here; only transaction approval/reversal and
//! sale checkout/refund touch it. Deletion is protected: a product
//! referenced by any ledger or sale line cannot be removed.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use mizan_core::inventory::LedgerError;

use crate::entities::{products, sale_items, transaction_items};

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Product name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Sale price.
    pub price: Decimal,
    /// Unit cost.
    pub cost: Decimal,
    /// Opening stock.
    pub stock: i32,
    /// Low-stock threshold.
    pub low_stock_threshold: i32,
    /// Optional SKU.
    pub sku: Option<String>,
    /// Optional barcode.
    pub barcode: Option<String>,
}

/// Input for updating a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category_id: Option<Option<Uuid>>,
    /// New price. Existing ledger lines keep their snapshotted price.
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

/// Filter options for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Filter by category.
    pub category_id: Option<Uuid>,
    /// Case-insensitive name/SKU/barcode search.
    pub search: Option<String>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
}

/// Product repository.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_product(
        &self,
        company_id: Uuid,
        input: CreateProductInput,
    ) -> Result<products::Model, LedgerError> {
        let now = Utc::now().into();
        let product = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            category_id: Set(input.category_id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            cost: Set(input.cost),
            stock: Set(input.stock),
            low_stock_threshold: Set(input.low_stock_threshold),
            sku: Set(input.sku),
            barcode: Set(input.barcode),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        product.insert(&self.db).await.map_err(db_err)
    }

    /// Updates a product's catalog fields.
    ///
    /// Stock is deliberately not updatable here.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub async fn update_product(
        &self,
        company_id: Uuid,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> Result<products::Model, LedgerError> {
        let product = self.find(company_id, product_id).await?;

        let mut active: products::ActiveModel = product.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(cost) = input.cost {
            active.cost = Set(cost);
        }
        if let Some(threshold) = input.low_stock_threshold {
            active.low_stock_threshold = Set(threshold);
        }
        if let Some(sku) = input.sku {
            active.sku = Set(Some(sku));
        }
        if let Some(barcode) = input.barcode {
            active.barcode = Set(Some(barcode));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map_err(db_err)
    }

    /// Deletes a product unless it is referenced by any transaction or sale
    /// line (protect-on-delete).
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ProductInUse` when referenced.
    pub async fn delete_product(
        &self,
        company_id: Uuid,
        product_id: Uuid,
    ) -> Result<(), LedgerError> {
        let product = self.find(company_id, product_id).await?;

        let ledger_refs = transaction_items::Entity::find()
            .filter(transaction_items::Column::ProductId.eq(product_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        let sale_refs = sale_items::Entity::find()
            .filter(sale_items::Column::ProductId.eq(product_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        if ledger_refs > 0 || sale_refs > 0 {
            return Err(LedgerError::ProductInUse(product_id));
        }

        products::Entity::delete_by_id(product.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    /// Lists products with optional filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_products(
        &self,
        company_id: Uuid,
        filter: ProductFilter,
    ) -> Result<Vec<products::Model>, LedgerError> {
        let mut query =
            products::Entity::find().filter(products::Column::CompanyId.eq(company_id));

        if let Some(category_id) = filter.category_id {
            query = query.filter(products::Column::CategoryId.eq(category_id));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(products::Column::IsActive.eq(is_active));
        }
        if let Some(search) = filter.search {
            query = query.filter(
                products::Column::Name
                    .contains(&search)
                    .or(products::Column::Sku.contains(&search))
                    .or(products::Column::Barcode.contains(&search)),
            );
        }

        query
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Lists products at or below their low-stock threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_low_stock(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<products::Model>, LedgerError> {
        products::Entity::find()
            .filter(products::Column::CompanyId.eq(company_id))
            .filter(products::Column::IsActive.eq(true))
            .filter(Expr::col(products::Column::Stock).lte(Expr::col(products::Column::LowStockThreshold)))
            .order_by_asc(products::Column::Stock)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Gets a product by id.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ProductNotFound` if missing.
    pub async fn get_product(
        &self,
        company_id: Uuid,
        product_id: Uuid,
    ) -> Result<products::Model, LedgerError> {
        self.find(company_id, product_id).await
    }

    async fn find(&self, company_id: Uuid, product_id: Uuid) -> Result<products::Model, LedgerError> {
        products::Entity::find_by_id(product_id)
            .filter(products::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::ProductNotFound(product_id))
    }
}

fn db_err(e: sea_orm::DbErr) -> LedgerError {
    LedgerError::Database(e.to_string())
}
