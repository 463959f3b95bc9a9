//! `SeaORM` entity definitions.

pub mod categories;
pub mod companies;
pub mod company_subscriptions;
pub mod products;
pub mod sale_items;
pub mod sales;
pub mod sea_orm_active_enums;
pub mod subscription_plans;
pub mod transaction_items;
pub mod transactions;
pub mod users;
