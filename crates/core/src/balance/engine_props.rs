//! Property tests for the balance recalculation engine.
//!
//! The central property: the incremental debt cache (apply `debt_delta` on
//! approve, subtract it on delete) agrees with full recomputation from the
//! surviving approved history, for any sequence of approvals and deletions.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::engine::{BalanceEngine, TransactionSummary};
use crate::inventory::TransactionType;

fn type_strategy() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::Take),
        Just(TransactionType::Restore),
        Just(TransactionType::Payment),
        Just(TransactionType::Fees),
    ]
}

fn summary_strategy() -> impl Strategy<Value = TransactionSummary> {
    (type_strategy(), 0i64..100_000, 0i64..1_000).prop_map(|(transaction_type, cents, units)| {
        TransactionSummary {
            id: Uuid::new_v4(),
            transaction_type,
            amount: Decimal::new(cents, 2),
            units,
        }
    })
}

/// An operation sequence: approve everything, then delete a chosen subset.
fn history_with_deletions() -> impl Strategy<Value = (Vec<TransactionSummary>, Vec<bool>)> {
    prop::collection::vec(summary_strategy(), 0..20).prop_flat_map(|history| {
        let len = history.len();
        (
            Just(history),
            prop::collection::vec(any::<bool>(), len..=len),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Incremental debt bookkeeping equals full recomputation for any
    /// approve/delete sequence.
    #[test]
    fn prop_incremental_debt_agrees_with_recompute(
        (history, deleted) in history_with_deletions(),
    ) {
        // Incremental: add each approval's delta, subtract it again on delete.
        let mut incremental = Decimal::ZERO;
        for tx in &history {
            incremental += BalanceEngine::debt_delta(tx.transaction_type, tx.amount);
        }
        for (tx, gone) in history.iter().zip(&deleted) {
            if *gone {
                incremental -= BalanceEngine::debt_delta(tx.transaction_type, tx.amount);
            }
        }

        // Full recompute over the surviving history.
        let survivors: Vec<TransactionSummary> = history
            .iter()
            .zip(&deleted)
            .filter(|(_, gone)| !**gone)
            .map(|(tx, _)| tx.clone())
            .collect();
        let recomputed = BalanceEngine::debt(&survivors, None);

        prop_assert_eq!(incremental, recomputed);
    }

    /// Deleting a transaction via the exclusion parameter equals recomputing
    /// over the history without it.
    #[test]
    fn prop_exclusion_equals_removal(history in prop::collection::vec(summary_strategy(), 1..20)) {
        let excluded = history[0].id;

        let via_exclusion = BalanceEngine::recompute(&history, Some(excluded));
        let without: Vec<TransactionSummary> =
            history.iter().filter(|tx| tx.id != excluded).cloned().collect();
        let via_removal = BalanceEngine::recompute(&without, None);

        prop_assert_eq!(via_exclusion, via_removal);
    }

    /// A take followed by its own deletion leaves both aggregates untouched.
    #[test]
    fn prop_approve_then_delete_round_trip(
        base in prop::collection::vec(summary_strategy(), 0..10),
        extra in summary_strategy(),
    ) {
        let before = BalanceEngine::recompute(&base, None);

        let mut with_extra = base.clone();
        with_extra.push(extra.clone());
        let after_delete = BalanceEngine::recompute(&with_extra, Some(extra.id));

        prop_assert_eq!(before, after_delete);
    }

    /// products_count only ever moves by take/restore units.
    #[test]
    fn prop_products_count_ignores_money(history in prop::collection::vec(summary_strategy(), 0..20)) {
        let item_backed: Vec<TransactionSummary> = history
            .iter()
            .filter(|tx| tx.transaction_type.is_item_backed())
            .cloned()
            .collect();
        prop_assert_eq!(
            BalanceEngine::products_count(&history, None),
            BalanceEngine::products_count(&item_backed, None)
        );
    }
}
