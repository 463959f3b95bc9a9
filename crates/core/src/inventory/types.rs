//! Ledger domain types for transaction creation and stock movement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transaction type classification.
///
/// Take and restore move products between the warehouse and a partner;
/// payment and fees are purely monetary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Partner takes products out of the warehouse.
    Take,
    /// Partner returns previously taken products.
    Restore,
    /// Partner pays down their debt.
    Payment,
    /// Company expense entry, not tied to a partner.
    Fees,
}

impl TransactionType {
    /// Parse a transaction type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "take" => Some(Self::Take),
            "restore" => Some(Self::Restore),
            "payment" => Some(Self::Payment),
            "fees" => Some(Self::Fees),
            _ => None,
        }
    }

    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Take => "take",
            Self::Restore => "restore",
            Self::Payment => "payment",
            Self::Fees => "fees",
        }
    }

    /// Returns true if the transaction carries line items and derives its
    /// amount from them.
    #[must_use]
    pub const fn is_item_backed(&self) -> bool {
        matches!(self, Self::Take | Self::Restore)
    }

    /// Stock direction applied per unit when the transaction becomes
    /// effective: take removes stock, restore adds it back.
    #[must_use]
    pub const fn stock_direction(&self) -> i32 {
        match self {
            Self::Take => -1,
            Self::Restore => 1,
            Self::Payment | Self::Fees => 0,
        }
    }

    /// Returns true if the transaction moves a merchant's debt.
    #[must_use]
    pub const fn affects_debt(&self) -> bool {
        matches!(self, Self::Take | Self::Payment)
    }
}

/// Transaction status in the approval workflow.
///
/// Stock and balance side effects are applied only on the transition to
/// `Approved`; a pending or rejected transaction has no footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Waiting for an accountant's decision.
    Pending,
    /// Approved; stock and balance effects have been applied.
    Approved,
    /// Rejected; never applied.
    Rejected,
}

impl TransactionStatus {
    /// Parse a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true if the transaction's side effects have been applied.
    #[must_use]
    pub const fn is_effective(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Returns true if the transaction still awaits a decision.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested line in a new transaction.
#[derive(Debug, Clone)]
pub struct ItemInput {
    /// The product being moved.
    pub product_id: Uuid,
    /// Units requested. Zero is a legal placeholder line.
    pub quantity: i32,
}

/// Input for creating a new transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// The owning partner. Fee entries have none.
    pub user_id: Option<Uuid>,
    /// The type of transaction.
    pub transaction_type: TransactionType,
    /// Caller-supplied amount; authoritative for payment/fees, ignored for
    /// item-backed types.
    pub amount: Option<Decimal>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Requested lines; only valid for item-backed types.
    pub items: Vec<ItemInput>,
}

/// A persisted transaction line as the ledger engine sees it.
///
/// `product_id` is `None` only for lines whose product row has since been
/// force-removed; such lines are skipped during stock reversal.
#[derive(Debug, Clone)]
pub struct ItemLine {
    /// The referenced product, if it still exists.
    pub product_id: Option<Uuid>,
    /// Units on this line.
    pub quantity: i32,
    /// Unit price snapshotted at line creation.
    pub price: Decimal,
    /// Always `price * quantity`.
    pub total: Decimal,
}

/// A signed stock adjustment for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDelta {
    /// The product to adjust.
    pub product_id: Uuid,
    /// Signed change to apply to the product's stock.
    pub delta: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!(TransactionType::parse("take"), Some(TransactionType::Take));
        assert_eq!(
            TransactionType::parse("RESTORE"),
            Some(TransactionType::Restore)
        );
        assert_eq!(
            TransactionType::parse("Payment"),
            Some(TransactionType::Payment)
        );
        assert_eq!(TransactionType::parse("fees"), Some(TransactionType::Fees));
        assert_eq!(TransactionType::parse("invalid"), None);
    }

    #[test]
    fn test_item_backed_types() {
        assert!(TransactionType::Take.is_item_backed());
        assert!(TransactionType::Restore.is_item_backed());
        assert!(!TransactionType::Payment.is_item_backed());
        assert!(!TransactionType::Fees.is_item_backed());
    }

    #[test]
    fn test_stock_direction() {
        assert_eq!(TransactionType::Take.stock_direction(), -1);
        assert_eq!(TransactionType::Restore.stock_direction(), 1);
        assert_eq!(TransactionType::Payment.stock_direction(), 0);
        assert_eq!(TransactionType::Fees.stock_direction(), 0);
    }

    #[test]
    fn test_affects_debt() {
        assert!(TransactionType::Take.affects_debt());
        assert!(TransactionType::Payment.affects_debt());
        assert!(!TransactionType::Restore.affects_debt());
        assert!(!TransactionType::Fees.affects_debt());
    }

    #[test]
    fn test_status_effective() {
        assert!(!TransactionStatus::Pending.is_effective());
        assert!(TransactionStatus::Approved.is_effective());
        assert!(!TransactionStatus::Rejected.is_effective());
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Approved,
            TransactionStatus::Rejected,
        ] {
            assert_eq!(TransactionStatus::parse(status.as_str()), Some(status));
        }
    }
}
