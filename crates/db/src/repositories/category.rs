//! Category repository for the product catalog.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::categories;

/// Error types for category operations.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// Category not found.
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails (including the
    /// per-company name uniqueness constraint).
    pub async fn create_category(
        &self,
        company_id: Uuid,
        name: String,
        description: Option<String>,
    ) -> Result<categories::Model, CategoryError> {
        let now = Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            name: Set(name),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
        };
        category.insert(&self.db).await.map_err(db_err)
    }

    /// Lists a company's categories by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_categories(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<categories::Model>, CategoryError> {
        categories::Entity::find()
            .filter(categories::Column::CompanyId.eq(company_id))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Deletes a category; products referencing it fall back to
    /// "no category".
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if missing.
    pub async fn delete_category(
        &self,
        company_id: Uuid,
        category_id: Uuid,
    ) -> Result<(), CategoryError> {
        let category = categories::Entity::find_by_id(category_id)
            .filter(categories::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(CategoryError::NotFound(category_id))?;

        categories::Entity::delete_by_id(category.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

fn db_err(e: sea_orm::DbErr) -> CategoryError {
    CategoryError::Database(e.to_string())
}
