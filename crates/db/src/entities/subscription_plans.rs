//! `SeaORM` Entity for the subscription_plans table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscription_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub max_users: i32,
    pub max_products: i32,
    pub has_inventory: bool,
    pub has_pos: bool,
    pub price_monthly: Decimal,
    pub price_yearly: Decimal,
    pub trial_days: i32,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::company_subscriptions::Entity")]
    CompanySubscriptions,
}

impl Related<super::company_subscriptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanySubscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
