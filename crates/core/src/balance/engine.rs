//! Balance recalculation engine.
//!
//! Recomputes a partner's cached aggregates purely from the set of
//! *effective* (approved) transactions belonging to them. Full recomputation
//! is the only persistence path; the incremental `debt_delta` shortcut exists
//! for display math and is pinned by property tests to agree with the full
//! recompute over any reachable history.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::inventory::TransactionType;

/// One approved transaction as the engine sees it.
#[derive(Debug, Clone)]
pub struct TransactionSummary {
    /// The transaction ID, used by the exclusion parameter.
    pub id: Uuid,
    /// The transaction type.
    pub transaction_type: TransactionType,
    /// The transaction amount (item-derived for take/restore).
    pub amount: Decimal,
    /// Total units across the transaction's lines.
    pub units: i64,
}

/// Recomputed aggregates for one partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserBalances {
    /// Signed currency amount the merchant owes the company.
    pub debt: Decimal,
    /// Net units the partner currently holds.
    pub products_count: i64,
}

/// Stateless engine deriving partner aggregates from approved history.
pub struct BalanceEngine;

impl BalanceEngine {
    /// Net units held: Σ take units − Σ restore units.
    ///
    /// `exclude` recomputes "as if transaction X did not exist", used while
    /// deleting X so the transaction being removed cannot count itself.
    #[must_use]
    pub fn products_count(history: &[TransactionSummary], exclude: Option<Uuid>) -> i64 {
        Self::effective(history, exclude)
            .map(|tx| match tx.transaction_type {
                TransactionType::Take => tx.units,
                TransactionType::Restore => -tx.units,
                TransactionType::Payment | TransactionType::Fees => 0,
            })
            .sum()
    }

    /// Merchant debt: Σ take amounts − Σ payment amounts.
    #[must_use]
    pub fn debt(history: &[TransactionSummary], exclude: Option<Uuid>) -> Decimal {
        Self::effective(history, exclude)
            .map(|tx| Self::debt_delta(tx.transaction_type, tx.amount))
            .sum()
    }

    /// Both aggregates in one pass.
    #[must_use]
    pub fn recompute(history: &[TransactionSummary], exclude: Option<Uuid>) -> UserBalances {
        UserBalances {
            debt: Self::debt(history, exclude),
            products_count: Self::products_count(history, exclude),
        }
    }

    /// The incremental debt shortcut: the signed contribution a single
    /// approved transaction makes to a merchant's debt.
    #[must_use]
    pub fn debt_delta(transaction_type: TransactionType, amount: Decimal) -> Decimal {
        match transaction_type {
            TransactionType::Take => amount,
            TransactionType::Payment => -amount,
            TransactionType::Restore | TransactionType::Fees => Decimal::ZERO,
        }
    }

    fn effective(
        history: &[TransactionSummary],
        exclude: Option<Uuid>,
    ) -> impl Iterator<Item = &TransactionSummary> {
        history
            .iter()
            .filter(move |tx| exclude.is_none_or(|id| tx.id != id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tx(transaction_type: TransactionType, amount: Decimal, units: i64) -> TransactionSummary {
        TransactionSummary {
            id: Uuid::new_v4(),
            transaction_type,
            amount,
            units,
        }
    }

    #[test]
    fn test_products_count_take_minus_restore() {
        let history = vec![
            tx(TransactionType::Take, dec!(300), 30),
            tx(TransactionType::Take, dec!(100), 10),
            tx(TransactionType::Restore, dec!(50), 5),
        ];
        assert_eq!(BalanceEngine::products_count(&history, None), 35);
    }

    #[test]
    fn test_products_count_ignores_monetary_types() {
        let history = vec![
            tx(TransactionType::Payment, dec!(100), 0),
            tx(TransactionType::Fees, dec!(20), 0),
        ];
        assert_eq!(BalanceEngine::products_count(&history, None), 0);
    }

    #[test]
    fn test_debt_take_minus_payment() {
        let history = vec![
            tx(TransactionType::Take, dec!(300), 30),
            tx(TransactionType::Payment, dec!(120), 0),
            tx(TransactionType::Restore, dec!(50), 5),
        ];
        assert_eq!(BalanceEngine::debt(&history, None), dec!(180));
    }

    #[test]
    fn test_empty_history_is_zero() {
        assert_eq!(
            BalanceEngine::recompute(&[], None),
            UserBalances {
                debt: Decimal::ZERO,
                products_count: 0
            }
        );
    }

    #[test]
    fn test_exclusion_removes_one_transaction() {
        let take = tx(TransactionType::Take, dec!(300), 30);
        let take_id = take.id;
        let history = vec![take, tx(TransactionType::Payment, dec!(100), 0)];

        let with = BalanceEngine::recompute(&history, None);
        assert_eq!(with.debt, dec!(200));
        assert_eq!(with.products_count, 30);

        let without = BalanceEngine::recompute(&history, Some(take_id));
        assert_eq!(without.debt, dec!(-100));
        assert_eq!(without.products_count, 0);
    }

    #[test]
    fn test_exclusion_of_unknown_id_changes_nothing() {
        let history = vec![tx(TransactionType::Take, dec!(10), 1)];
        assert_eq!(
            BalanceEngine::recompute(&history, Some(Uuid::new_v4())),
            BalanceEngine::recompute(&history, None)
        );
    }

    #[test]
    fn test_debt_delta_signs() {
        assert_eq!(
            BalanceEngine::debt_delta(TransactionType::Take, dec!(40)),
            dec!(40)
        );
        assert_eq!(
            BalanceEngine::debt_delta(TransactionType::Payment, dec!(40)),
            dec!(-40)
        );
        assert_eq!(
            BalanceEngine::debt_delta(TransactionType::Restore, dec!(40)),
            Decimal::ZERO
        );
        assert_eq!(
            BalanceEngine::debt_delta(TransactionType::Fees, dec!(40)),
            Decimal::ZERO
        );
    }
}
