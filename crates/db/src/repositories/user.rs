//! User repository for partner lookups and balance reconciliation.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::UserRole, users};

use super::transaction::recompute_user_balances;

/// Error types for user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Unique username.
    pub username: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Role within the company.
    pub role: UserRole,
    /// Optional phone number.
    pub phone: Option<String>,
}

/// User repository.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user in a company. Cached balances start at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_user(
        &self,
        company_id: Uuid,
        input: CreateUserInput,
    ) -> Result<users::Model, UserError> {
        let now = Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(Some(company_id)),
            username: Set(input.username),
            full_name: Set(input.full_name),
            role: Set(input.role),
            phone: Set(input.phone),
            debt: Set(Decimal::ZERO),
            products_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        user.insert(&self.db).await.map_err(db_err)
    }

    /// Gets a user by id within a company.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if missing.
    pub async fn get_user(&self, company_id: Uuid, user_id: Uuid) -> Result<users::Model, UserError> {
        users::Entity::find_by_id(user_id)
            .filter(users::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(UserError::NotFound(user_id))
    }

    /// Lists a company's partners (merchants and representatives) with
    /// their cached balances.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_partners(&self, company_id: Uuid) -> Result<Vec<users::Model>, UserError> {
        users::Entity::find()
            .filter(users::Column::CompanyId.eq(company_id))
            .filter(
                users::Column::Role
                    .eq(UserRole::Merchant)
                    .or(users::Column::Role.eq(UserRole::Representative)),
            )
            .order_by_asc(users::Column::Username)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Safety-net reconciliation: recomputes and persists both cached
    /// aggregates from the approved transaction history, then returns the
    /// refreshed row. Run this whenever drift is suspected.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if the user is missing.
    pub async fn reconcile_balances(
        &self,
        company_id: Uuid,
        user_id: Uuid,
    ) -> Result<users::Model, UserError> {
        // Existence (and tenancy) check first.
        self.get_user(company_id, user_id).await?;

        let txn = self.db.begin().await.map_err(db_err)?;
        recompute_user_balances(&txn, user_id, None)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        self.get_user(company_id, user_id).await
    }
}

fn db_err(e: sea_orm::DbErr) -> UserError {
    UserError::Database(e.to_string())
}
