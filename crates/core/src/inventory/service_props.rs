//! Property tests for ledger line math and stock planning.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::service::LedgerService;
use super::types::{ItemLine, TransactionType};

/// Strategy for generating unit prices with two decimal places.
fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating non-negative line quantities.
fn quantity_strategy() -> impl Strategy<Value = i32> {
    0i32..10_000
}

/// Strategy for generating a small pool of product ids, so lines collide on
/// the same product often enough to exercise delta merging.
fn product_pool() -> Vec<Uuid> {
    (0..4).map(|_| Uuid::new_v4()).collect()
}

fn lines_strategy() -> impl Strategy<Value = Vec<ItemLine>> {
    let pool = product_pool();
    prop::collection::vec((0usize..4, quantity_strategy(), price_strategy()), 0..8).prop_map(
        move |raw| {
            raw.into_iter()
                .map(|(idx, quantity, price)| ItemLine {
                    product_id: Some(pool[idx]),
                    quantity,
                    price,
                    total: LedgerService::line_total(price, quantity),
                })
                .collect()
        },
    )
}

fn item_backed_type() -> impl Strategy<Value = TransactionType> {
    prop_oneof![Just(TransactionType::Take), Just(TransactionType::Restore)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For any price and quantity, the line total is exactly price * quantity.
    #[test]
    fn prop_line_total_consistency(price in price_strategy(), quantity in quantity_strategy()) {
        let total = LedgerService::line_total(price, quantity);
        prop_assert_eq!(total, price * Decimal::from(quantity));
    }

    /// The derived amount always equals the sum of line totals, for any line set.
    #[test]
    fn prop_amount_is_sum_of_totals(lines in lines_strategy()) {
        let amount = LedgerService::amount_from_lines(&lines);
        let expected: Decimal = lines.iter().map(|l| l.total).sum();
        prop_assert_eq!(amount, expected);
    }

    /// Approval and reversal plans cancel exactly: summing both leaves every
    /// product's stock where it started.
    #[test]
    fn prop_approve_then_reverse_is_neutral(
        transaction_type in item_backed_type(),
        lines in lines_strategy(),
    ) {
        let applied = LedgerService::approval_stock_deltas(transaction_type, &lines);
        let reversed = LedgerService::reversal_stock_deltas(transaction_type, &lines);

        let mut net: std::collections::HashMap<Uuid, i64> = std::collections::HashMap::new();
        for d in applied.iter().chain(reversed.iter()) {
            *net.entry(d.product_id).or_insert(0) += i64::from(d.delta);
        }
        for (product_id, delta) in net {
            prop_assert_eq!(delta, 0, "product {} drifted by {}", product_id, delta);
        }
    }

    /// The approval plan moves exactly the summed line quantities in the
    /// type's stock direction.
    #[test]
    fn prop_approval_plan_matches_quantities(
        transaction_type in item_backed_type(),
        lines in lines_strategy(),
    ) {
        let deltas = LedgerService::approval_stock_deltas(transaction_type, &lines);
        let planned: i64 = deltas.iter().map(|d| i64::from(d.delta)).sum();
        let expected: i64 = lines
            .iter()
            .filter(|l| l.product_id.is_some())
            .map(|l| i64::from(l.quantity) * i64::from(transaction_type.stock_direction()))
            .sum();
        prop_assert_eq!(planned, expected);
    }

    /// Editing a line from `old` to `new` applies the same net stock change
    /// as reversing `old` entirely and applying `new` fresh.
    #[test]
    fn prop_edit_delta_never_double_counts(
        transaction_type in item_backed_type(),
        old_quantity in quantity_strategy(),
        new_quantity in quantity_strategy(),
    ) {
        let product_id = Uuid::new_v4();
        let direction = i64::from(transaction_type.stock_direction());

        let edit = LedgerService::edit_stock_delta(
            transaction_type, product_id, old_quantity, new_quantity,
        ).map_or(0, |d| i64::from(d.delta));

        let full_old = direction * i64::from(old_quantity);
        let full_new = direction * i64::from(new_quantity);
        prop_assert_eq!(edit, full_new - full_old);
    }
}
