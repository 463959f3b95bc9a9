//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role within a company.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// External merchant buying on credit.
    #[sea_orm(string_value = "merchant")]
    Merchant,
    /// Field representative holding products.
    #[sea_orm(string_value = "representative")]
    Representative,
    /// Approves and rejects ledger transactions.
    #[sea_orm(string_value = "accountant")]
    Accountant,
    /// Runs point-of-sale checkouts.
    #[sea_orm(string_value = "cashier")]
    Cashier,
    /// Company manager.
    #[sea_orm(string_value = "manager")]
    Manager,
}

impl UserRole {
    /// Returns true if this role transacts against the ledger.
    #[must_use]
    pub const fn is_partner(&self) -> bool {
        matches!(self, Self::Merchant | Self::Representative)
    }
}

/// Ledger transaction type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Partner takes products.
    #[sea_orm(string_value = "take")]
    Take,
    /// Partner returns products.
    #[sea_orm(string_value = "restore")]
    Restore,
    /// Partner pays down debt.
    #[sea_orm(string_value = "payment")]
    Payment,
    /// Company expense.
    #[sea_orm(string_value = "fees")]
    Fees,
}

/// Ledger transaction status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_status")]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Awaiting an accountant's decision.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved; effects applied.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected; never applied.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Sale payment method.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Card payment.
    #[sea_orm(string_value = "card")]
    Card,
    /// Bank transfer.
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

/// Sale status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "sale_status")]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Completed; stock decremented.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Refunded; stock handed back.
    #[sea_orm(string_value = "refunded")]
    Refunded,
    /// Cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Company subscription status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "subscription_status")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Awaiting platform approval.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Trial period running.
    #[sea_orm(string_value = "trial")]
    Trial,
    /// Paid and active.
    #[sea_orm(string_value = "active")]
    Active,
    /// Lapsed.
    #[sea_orm(string_value = "expired")]
    Expired,
    /// Cancelled by the company.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}
