//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::TransactionStatus;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Line quantity cannot be negative.
    #[error("Line quantity cannot be negative: {0}")]
    NegativeQuantity(i32),

    /// Payment and fee transactions require an amount.
    #[error("Amount is required for {0} transactions")]
    AmountRequired(&'static str),

    /// Amount must be positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Only take/restore transactions carry line items.
    #[error("{0} transactions do not carry line items")]
    ItemsNotAllowed(&'static str),

    /// Fee entries are company expenses and have no owning partner.
    #[error("Fee transactions cannot belong to a partner")]
    FeesWithPartner,

    /// Partner transactions need an owner to settle against.
    #[error("{0} transactions require a partner")]
    PartnerRequired(&'static str),

    // ========== Product Errors ==========
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Product is referenced by existing line items and cannot be deleted.
    #[error("Product {0} is referenced by ledger lines and cannot be deleted")]
    ProductInUse(Uuid),

    // ========== Transaction State Errors ==========
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// Line item not found.
    #[error("Transaction item not found: {0}")]
    ItemNotFound(Uuid),

    /// Items of a rejected transaction are frozen.
    #[error("Cannot modify items of a {0} transaction")]
    ItemsFrozen(TransactionStatus),

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeQuantity(_) => "NEGATIVE_QUANTITY",
            Self::AmountRequired(_) => "AMOUNT_REQUIRED",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::ItemsNotAllowed(_) => "ITEMS_NOT_ALLOWED",
            Self::FeesWithPartner => "FEES_WITH_PARTNER",
            Self::PartnerRequired(_) => "PARTNER_REQUIRED",
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::ProductInUse(_) => "PRODUCT_IN_USE",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::ItemsFrozen(_) => "ITEMS_FROZEN",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NegativeQuantity(_)
            | Self::AmountRequired(_)
            | Self::NonPositiveAmount(_)
            | Self::ItemsNotAllowed(_)
            | Self::FeesWithPartner
            | Self::PartnerRequired(_) => 400,

            Self::ProductInUse(_) | Self::ItemsFrozen(_) => 409,

            Self::ProductNotFound(_) | Self::TransactionNotFound(_) | Self::ItemNotFound(_) => 404,

            Self::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::NegativeQuantity(-3).error_code(),
            "NEGATIVE_QUANTITY"
        );
        assert_eq!(
            LedgerError::AmountRequired("payment").error_code(),
            "AMOUNT_REQUIRED"
        );
        assert_eq!(
            LedgerError::ProductNotFound(Uuid::nil()).error_code(),
            "PRODUCT_NOT_FOUND"
        );
        assert_eq!(
            LedgerError::ItemsFrozen(TransactionStatus::Rejected).error_code(),
            "ITEMS_FROZEN"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::NegativeQuantity(-1).http_status_code(), 400);
        assert_eq!(
            LedgerError::ProductInUse(Uuid::nil()).http_status_code(),
            409
        );
        assert_eq!(
            LedgerError::TransactionNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::Database("boom".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::NonPositiveAmount(Decimal::ZERO);
        assert_eq!(err.to_string(), "Amount must be positive, got 0");

        let err = LedgerError::ItemsFrozen(TransactionStatus::Rejected);
        assert_eq!(err.to_string(), "Cannot modify items of a rejected transaction");
    }
}
