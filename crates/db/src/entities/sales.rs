//! `SeaORM` Entity for the sales table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PaymentMethod, SaleStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub cashier_id: Option<Uuid>,
    #[sea_orm(unique)]
    pub receipt_number: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub discount_percentage: Decimal,
    pub tax_amount: Decimal,
    /// `subtotal - discount + tax_amount`.
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub amount_paid: Decimal,
    /// `max(0, amount_paid - total)`.
    pub change: Decimal,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Companies,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CashierId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::sale_items::Entity")]
    SaleItems,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::sale_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
