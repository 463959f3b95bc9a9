//! `SeaORM` Entity for the sale_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sale_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sale_id: Uuid,
    /// Null only when the product row was force-removed; refund skips such
    /// lines.
    pub product_id: Option<Uuid>,
    pub quantity: i32,
    /// Sale price snapshotted at checkout.
    pub price: Decimal,
    /// Unit cost snapshotted at checkout.
    pub cost: Decimal,
    /// Always `price * quantity`.
    pub total: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Profit earned on this line.
    #[must_use]
    pub fn profit(&self) -> Decimal {
        (self.price - self.cost) * Decimal::from(self.quantity)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales::Entity",
        from = "Column::SaleId",
        to = "super::sales::Column::Id",
        on_delete = "Cascade"
    )]
    Sales,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id"
    )]
    Products,
}

impl Related<super::sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
