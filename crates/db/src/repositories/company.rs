//! Company repository for tenant bootstrap and settings.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::companies;

/// Error types for company operations.
#[derive(Debug, Error)]
pub enum CompanyError {
    /// Company not found.
    #[error("Company not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

/// Input for creating a company.
#[derive(Debug, Clone)]
pub struct CreateCompanyInput {
    /// Company name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Optional address.
    pub address: Option<String>,
    /// Tax percentage applied at checkout.
    pub tax_rate: Decimal,
    /// Tax display name.
    pub tax_name: String,
}

/// Company repository.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_company(
        &self,
        input: CreateCompanyInput,
    ) -> Result<companies::Model, CompanyError> {
        let now = Utc::now().into();
        let company = companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            tax_rate: Set(input.tax_rate),
            tax_name: Set(input.tax_name),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        company.insert(&self.db).await.map_err(db_err)
    }

    /// Gets a company by id.
    ///
    /// # Errors
    ///
    /// Returns `CompanyError::NotFound` if missing.
    pub async fn get_company(&self, company_id: Uuid) -> Result<companies::Model, CompanyError> {
        companies::Entity::find_by_id(company_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(CompanyError::NotFound(company_id))
    }
}

fn db_err(e: sea_orm::DbErr) -> CompanyError {
    CompanyError::Database(e.to_string())
}
