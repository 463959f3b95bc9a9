//! POS service for cart validation and refunds.
//!
//! Pure logic: product data is injected through a lookup closure, and the
//! caller applies the resulting stock movements atomically.

use crate::pos::error::PosError;
use crate::pos::types::{CartLine, ProductInfo, SaleStatus};

/// Stateless service for checkout validation and the refund gate.
pub struct PosService;

impl PosService {
    /// Validate a whole cart against current stock.
    ///
    /// All-or-nothing: the first failing line fails the entire checkout, so
    /// callers create no sale and move no stock on error.
    ///
    /// # Errors
    ///
    /// Returns `PosError` describing the first offending line.
    pub fn validate_cart<L>(lines: &[CartLine], product_lookup: L) -> Result<(), PosError>
    where
        L: Fn(uuid::Uuid) -> Option<ProductInfo>,
    {
        if lines.is_empty() {
            return Err(PosError::EmptyCart);
        }

        for line in lines {
            if line.quantity <= 0 {
                return Err(PosError::InvalidQuantity {
                    product_id: line.product_id,
                    quantity: line.quantity,
                });
            }

            let product = product_lookup(line.product_id)
                .ok_or(PosError::ProductNotFound(line.product_id))?;

            if !product.is_active {
                return Err(PosError::ProductInactive(line.product_id));
            }

            if product.stock < line.quantity {
                return Err(PosError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available: product.stock,
                });
            }
        }

        Ok(())
    }

    /// Gate for refunding a sale.
    ///
    /// Only completed sales can be refunded; refunding anything else is a
    /// benign failure so a double refund can never hand stock back twice.
    ///
    /// # Errors
    ///
    /// Returns `PosError::CannotRefund` if the sale is not completed.
    pub fn validate_refund(status: SaleStatus) -> Result<SaleStatus, PosError> {
        match status {
            SaleStatus::Completed => Ok(SaleStatus::Refunded),
            _ => Err(PosError::CannotRefund { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn in_stock(stock: i32) -> ProductInfo {
        ProductInfo {
            price: dec!(10),
            cost: dec!(6),
            stock,
            is_active: true,
        }
    }

    #[test]
    fn test_validate_cart_ok() {
        let lines = vec![CartLine {
            product_id: Uuid::new_v4(),
            quantity: 2,
        }];
        assert!(PosService::validate_cart(&lines, |_| Some(in_stock(10))).is_ok());
    }

    #[test]
    fn test_validate_empty_cart() {
        let result = PosService::validate_cart(&[], |_| Some(in_stock(10)));
        assert!(matches!(result, Err(PosError::EmptyCart)));
    }

    #[test]
    fn test_validate_unknown_product() {
        let lines = vec![CartLine {
            product_id: Uuid::new_v4(),
            quantity: 1,
        }];
        let result = PosService::validate_cart(&lines, |_| None);
        assert!(matches!(result, Err(PosError::ProductNotFound(_))));
    }

    #[test]
    fn test_validate_inactive_product() {
        let lines = vec![CartLine {
            product_id: Uuid::new_v4(),
            quantity: 1,
        }];
        let result = PosService::validate_cart(&lines, |_| {
            Some(ProductInfo {
                is_active: false,
                ..in_stock(10)
            })
        });
        assert!(matches!(result, Err(PosError::ProductInactive(_))));
    }

    #[test]
    fn test_validate_zero_quantity() {
        let product_id = Uuid::new_v4();
        let lines = vec![CartLine {
            product_id,
            quantity: 0,
        }];
        let result = PosService::validate_cart(&lines, |_| Some(in_stock(10)));
        assert!(matches!(
            result,
            Err(PosError::InvalidQuantity { quantity: 0, .. })
        ));
    }

    #[test]
    fn test_validate_insufficient_stock_fails_whole_cart() {
        let ok_product = Uuid::new_v4();
        let short_product = Uuid::new_v4();
        let lines = vec![
            CartLine {
                product_id: ok_product,
                quantity: 1,
            },
            CartLine {
                product_id: short_product,
                quantity: 5,
            },
        ];

        let result = PosService::validate_cart(&lines, |id| {
            Some(if id == short_product {
                in_stock(3)
            } else {
                in_stock(100)
            })
        });

        assert!(matches!(
            result,
            Err(PosError::InsufficientStock {
                requested: 5,
                available: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_exact_stock_is_enough() {
        let lines = vec![CartLine {
            product_id: Uuid::new_v4(),
            quantity: 7,
        }];
        assert!(PosService::validate_cart(&lines, |_| Some(in_stock(7))).is_ok());
    }

    #[test]
    fn test_refund_completed_sale() {
        assert_eq!(
            PosService::validate_refund(SaleStatus::Completed).unwrap(),
            SaleStatus::Refunded
        );
    }

    #[test]
    fn test_refund_refunded_sale_fails() {
        let result = PosService::validate_refund(SaleStatus::Refunded);
        assert!(matches!(
            result,
            Err(PosError::CannotRefund {
                status: SaleStatus::Refunded
            })
        ));
    }

    #[test]
    fn test_refund_cancelled_sale_fails() {
        assert!(PosService::validate_refund(SaleStatus::Cancelled).is_err());
    }
}
