//! POS error types for checkout and refund.

use thiserror::Error;
use uuid::Uuid;

use super::types::SaleStatus;

/// Errors that can occur during POS operations.
#[derive(Debug, Error)]
pub enum PosError {
    // ========== Checkout Validation Errors ==========
    /// The cart has no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Product is not sellable.
    #[error("Product {0} is inactive")]
    ProductInactive(Uuid),

    /// Cart quantities must be at least 1.
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity {
        /// The offending product.
        product_id: Uuid,
        /// The requested quantity.
        quantity: i32,
    },

    /// A line asked for more units than are on hand. The whole checkout
    /// aborts; no sale is created and no stock moves.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The offending product.
        product_id: Uuid,
        /// Units requested.
        requested: i32,
        /// Units on hand.
        available: i32,
    },

    // ========== State Errors ==========
    /// Refund was attempted on a non-completed sale.
    #[error("Cannot refund a {status} sale")]
    CannotRefund {
        /// The sale's current status.
        status: SaleStatus,
    },

    /// Sale not found.
    #[error("Sale not found: {0}")]
    SaleNotFound(Uuid),

    /// Company not found (its tax rate is needed for totals).
    #[error("Company not found: {0}")]
    CompanyNotFound(Uuid),

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl PosError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCart => "EMPTY_CART",
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::ProductInactive(_) => "PRODUCT_INACTIVE",
            Self::InvalidQuantity { .. } => "INVALID_QUANTITY",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::CannotRefund { .. } => "CANNOT_REFUND",
            Self::SaleNotFound(_) => "SALE_NOT_FOUND",
            Self::CompanyNotFound(_) => "COMPANY_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::EmptyCart
            | Self::ProductInactive(_)
            | Self::InvalidQuantity { .. }
            | Self::InsufficientStock { .. } => 400,

            Self::CannotRefund { .. } => 409,

            Self::ProductNotFound(_) | Self::SaleNotFound(_) | Self::CompanyNotFound(_) => 404,

            Self::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PosError::EmptyCart.error_code(), "EMPTY_CART");
        assert_eq!(
            PosError::InsufficientStock {
                product_id: Uuid::nil(),
                requested: 5,
                available: 3,
            }
            .error_code(),
            "INSUFFICIENT_STOCK"
        );
        assert_eq!(
            PosError::CannotRefund {
                status: SaleStatus::Refunded
            }
            .error_code(),
            "CANNOT_REFUND"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(PosError::EmptyCart.http_status_code(), 400);
        assert_eq!(
            PosError::SaleNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            PosError::CannotRefund {
                status: SaleStatus::Cancelled
            }
            .http_status_code(),
            409
        );
        assert_eq!(PosError::Database(String::new()).http_status_code(), 500);
    }

    #[test]
    fn test_insufficient_stock_display() {
        let err = PosError::InsufficientStock {
            product_id: Uuid::nil(),
            requested: 10,
            available: 4,
        };
        assert!(err.to_string().contains("requested 10"));
        assert!(err.to_string().contains("available 4"));
    }
}
