//! Property tests for checkout totals and cart validation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::service::PosService;
use super::types::{CartLine, ProductInfo, SaleStatus, SaleTotals};

fn money_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// total = subtotal - discount + tax, always.
    #[test]
    fn prop_total_formula(
        subtotal in money_strategy(),
        flat in money_strategy(),
        pct in percentage_strategy(),
        tax_rate in percentage_strategy(),
        paid in money_strategy(),
    ) {
        let totals = SaleTotals::calculate(subtotal, flat, pct, tax_rate, paid);
        prop_assert_eq!(totals.total, totals.subtotal - totals.discount + totals.tax_amount);
    }

    /// Change is never negative, and when the customer paid enough it is
    /// exactly the overpayment.
    #[test]
    fn prop_change_formula(
        subtotal in money_strategy(),
        tax_rate in percentage_strategy(),
        paid in money_strategy(),
    ) {
        let totals = SaleTotals::calculate(subtotal, Decimal::ZERO, Decimal::ZERO, tax_rate, paid);
        prop_assert!(totals.change >= Decimal::ZERO);
        if paid >= totals.total {
            prop_assert_eq!(totals.change, paid - totals.total);
        } else {
            prop_assert_eq!(totals.change, Decimal::ZERO);
        }
    }

    /// With no discount and no tax, the total is the subtotal unchanged.
    #[test]
    fn prop_no_adjustments_identity(subtotal in money_strategy(), paid in money_strategy()) {
        let totals = SaleTotals::calculate(
            subtotal, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, paid,
        );
        prop_assert_eq!(totals.total, subtotal);
        prop_assert_eq!(totals.discount, Decimal::ZERO);
        prop_assert_eq!(totals.tax_amount, Decimal::ZERO);
    }

    /// A cart with any line over stock never validates, regardless of the
    /// other lines.
    #[test]
    fn prop_any_short_line_fails_cart(
        quantities in prop::collection::vec(1i32..100, 1..6),
        short_index in any::<prop::sample::Index>(),
    ) {
        let lines: Vec<CartLine> = quantities
            .iter()
            .map(|q| CartLine { product_id: Uuid::new_v4(), quantity: *q })
            .collect();
        let short = short_index.index(lines.len());
        let short_id = lines[short].product_id;
        let short_qty = lines[short].quantity;

        let result = PosService::validate_cart(&lines, |id| {
            Some(ProductInfo {
                price: Decimal::ONE,
                cost: Decimal::ONE,
                // Every line fully stocked except the chosen one.
                stock: if id == short_id { short_qty - 1 } else { i32::MAX },
                is_active: true,
            })
        });

        prop_assert!(result.is_err());
    }

    /// Refund is idempotent in the failure direction: once refunded, every
    /// further refund attempt fails.
    #[test]
    fn prop_second_refund_always_fails(_dummy in 0..10i32) {
        let first = PosService::validate_refund(SaleStatus::Completed).unwrap();
        prop_assert_eq!(first, SaleStatus::Refunded);
        prop_assert!(PosService::validate_refund(first).is_err());
    }
}
