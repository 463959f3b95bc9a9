//! Subscription repository for plan gating and limits.
//!
//! Subscriptions gate access to features (inventory, POS) and enforce plan
//! limits on users and products. The lifecycle mirrors the platform flow:
//! pending → trial (platform approval) → active (payment verified), with
//! expired/cancelled as terminal states.

use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{
    company_subscriptions, products, sea_orm_active_enums::SubscriptionStatus, subscription_plans,
    users,
};

/// Error types for subscription operations.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    /// No subscription found for the company.
    #[error("No subscription for company {0}")]
    NotFound(Uuid),

    /// The referenced plan is missing.
    #[error("Subscription plan not found: {0}")]
    PlanNotFound(Uuid),

    /// Only pending subscriptions can be approved.
    #[error("Subscription is not pending")]
    NotPending,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

/// A gated plan feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Inventory / transaction ledger.
    Inventory,
    /// Point of sale.
    Pos,
}

/// Result of a plan limit check.
#[derive(Debug, Clone, Copy)]
pub struct LimitCheckResult {
    /// Whether another resource may be added.
    pub allowed: bool,
    /// Current count.
    pub current: u64,
    /// Plan maximum.
    pub max: i32,
}

/// Subscription repository.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    db: DatabaseConnection,
}

impl SubscriptionRepository {
    /// Creates a new subscription repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Subscribes a company to a plan in pending status.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionError::PlanNotFound` for an unknown plan.
    pub async fn subscribe(
        &self,
        company_id: Uuid,
        plan_id: Uuid,
    ) -> Result<company_subscriptions::Model, SubscriptionError> {
        subscription_plans::Entity::find_by_id(plan_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(SubscriptionError::PlanNotFound(plan_id))?;

        let now = Utc::now().into();
        let subscription = company_subscriptions::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            plan_id: Set(plan_id),
            status: Set(SubscriptionStatus::Pending),
            start_date: Set(None),
            end_date: Set(None),
            trial_end_date: Set(None),
            payment_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        subscription.insert(&self.db).await.map_err(db_err)
    }

    /// Approves a pending subscription and starts the plan's trial period.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionError::NotPending` if already processed.
    pub async fn approve(
        &self,
        company_id: Uuid,
    ) -> Result<company_subscriptions::Model, SubscriptionError> {
        let (subscription, plan) = self.find_with_plan(company_id).await?;

        if subscription.status != SubscriptionStatus::Pending {
            return Err(SubscriptionError::NotPending);
        }

        let today = Utc::now().date_naive();
        let mut active: company_subscriptions::ActiveModel = subscription.into();
        active.status = Set(SubscriptionStatus::Trial);
        active.start_date = Set(Some(today));
        active.trial_end_date = Set(Some(today + Duration::days(i64::from(plan.trial_days))));
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await.map_err(db_err)
    }

    /// Activates a subscription after payment for the given number of
    /// months.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionError::NotFound` if the company has none.
    pub async fn activate(
        &self,
        company_id: Uuid,
        months: u32,
    ) -> Result<company_subscriptions::Model, SubscriptionError> {
        let (subscription, _plan) = self.find_with_plan(company_id).await?;

        let today = Utc::now().date_naive();
        let start = subscription.start_date.unwrap_or(today);
        let mut active: company_subscriptions::ActiveModel = subscription.into();
        active.status = Set(SubscriptionStatus::Active);
        active.payment_verified = Set(true);
        active.start_date = Set(Some(start));
        active.end_date = Set(Some(start + Duration::days(30 * i64::from(months))));
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await.map_err(db_err)
    }

    /// Checks whether the company's subscription currently allows access.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionError::NotFound` if the company has none.
    pub async fn is_valid(&self, company_id: Uuid) -> Result<bool, SubscriptionError> {
        let (subscription, _plan) = self.find_with_plan(company_id).await?;
        let today = Utc::now().date_naive();

        Ok(match subscription.status {
            SubscriptionStatus::Trial => {
                subscription.trial_end_date.is_some_and(|d| d >= today)
            }
            SubscriptionStatus::Active => subscription.end_date.is_some_and(|d| d >= today),
            SubscriptionStatus::Pending
            | SubscriptionStatus::Expired
            | SubscriptionStatus::Cancelled => false,
        })
    }

    /// Checks whether the company's plan includes a feature.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionError::NotFound` if the company has none.
    pub async fn has_feature(
        &self,
        company_id: Uuid,
        feature: Feature,
    ) -> Result<bool, SubscriptionError> {
        let (_subscription, plan) = self.find_with_plan(company_id).await?;
        Ok(match feature {
            Feature::Inventory => plan.has_inventory,
            Feature::Pos => plan.has_pos,
        })
    }

    /// Checks the plan's product limit against the current catalog size.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionError::NotFound` if the company has none.
    pub async fn check_product_limit(
        &self,
        company_id: Uuid,
    ) -> Result<LimitCheckResult, SubscriptionError> {
        let (_subscription, plan) = self.find_with_plan(company_id).await?;
        let current = products::Entity::find()
            .filter(products::Column::CompanyId.eq(company_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(LimitCheckResult {
            allowed: current < u64::try_from(plan.max_products.max(0)).unwrap_or(0),
            current,
            max: plan.max_products,
        })
    }

    /// Checks the plan's user limit against the current headcount.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionError::NotFound` if the company has none.
    pub async fn check_user_limit(
        &self,
        company_id: Uuid,
    ) -> Result<LimitCheckResult, SubscriptionError> {
        let (_subscription, plan) = self.find_with_plan(company_id).await?;
        let current = users::Entity::find()
            .filter(users::Column::CompanyId.eq(company_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(LimitCheckResult {
            allowed: current < u64::try_from(plan.max_users.max(0)).unwrap_or(0),
            current,
            max: plan.max_users,
        })
    }

    async fn find_with_plan(
        &self,
        company_id: Uuid,
    ) -> Result<(company_subscriptions::Model, subscription_plans::Model), SubscriptionError> {
        let subscription = company_subscriptions::Entity::find()
            .filter(company_subscriptions::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(SubscriptionError::NotFound(company_id))?;

        let plan = subscription_plans::Entity::find_by_id(subscription.plan_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(SubscriptionError::PlanNotFound(subscription.plan_id))?;

        Ok((subscription, plan))
    }
}

fn db_err(e: sea_orm::DbErr) -> SubscriptionError {
    SubscriptionError::Database(e.to_string())
}
