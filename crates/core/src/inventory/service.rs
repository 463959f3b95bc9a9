//! Ledger service for transaction validation and stock planning.
//!
//! This service contains pure business logic with no database dependencies.
//! It validates transaction input, resolves line items with price snapshots,
//! derives transaction amounts, and computes the stock adjustments that a
//! lifecycle transition must apply.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::LedgerError;
use super::types::{CreateTransactionInput, ItemInput, ItemLine, StockDelta, TransactionType};

/// Ledger service for transaction validation and stock planning.
pub struct LedgerService;

impl LedgerService {
    /// Validate a transaction input before persisting.
    ///
    /// Rules:
    /// - item-backed types (take/restore) require a partner and never carry
    ///   a caller amount; the line totals are the source of truth;
    /// - payment requires a partner and a positive amount;
    /// - fees require a positive amount and must not belong to a partner;
    /// - monetary types must not carry line items;
    /// - line quantities must be non-negative (zero is a placeholder).
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails.
    pub fn validate_input(input: &CreateTransactionInput) -> Result<(), LedgerError> {
        match input.transaction_type {
            TransactionType::Take | TransactionType::Restore => {
                if input.user_id.is_none() {
                    return Err(LedgerError::PartnerRequired(
                        input.transaction_type.as_str(),
                    ));
                }
                for item in &input.items {
                    if item.quantity < 0 {
                        return Err(LedgerError::NegativeQuantity(item.quantity));
                    }
                }
            }
            TransactionType::Payment => {
                if input.user_id.is_none() {
                    return Err(LedgerError::PartnerRequired("payment"));
                }
                Self::validate_amount(input, "payment")?;
            }
            TransactionType::Fees => {
                if input.user_id.is_some() {
                    return Err(LedgerError::FeesWithPartner);
                }
                Self::validate_amount(input, "fees")?;
            }
        }
        Ok(())
    }

    fn validate_amount(
        input: &CreateTransactionInput,
        type_name: &'static str,
    ) -> Result<(), LedgerError> {
        if !input.items.is_empty() {
            return Err(LedgerError::ItemsNotAllowed(type_name));
        }
        let amount = input
            .amount
            .ok_or(LedgerError::AmountRequired(type_name))?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        Ok(())
    }

    /// Resolve requested lines into persisted lines, snapshotting the current
    /// product price.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ProductNotFound` if a product cannot be resolved.
    pub fn resolve_items<P>(
        items: &[ItemInput],
        price_lookup: P,
    ) -> Result<Vec<ItemLine>, LedgerError>
    where
        P: Fn(Uuid) -> Option<Decimal>,
    {
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            if item.quantity < 0 {
                return Err(LedgerError::NegativeQuantity(item.quantity));
            }
            let price = price_lookup(item.product_id)
                .ok_or(LedgerError::ProductNotFound(item.product_id))?;
            lines.push(ItemLine {
                product_id: Some(item.product_id),
                quantity: item.quantity,
                price,
                total: Self::line_total(price, item.quantity),
            });
        }
        Ok(lines)
    }

    /// The invariant `total = price * quantity`.
    #[must_use]
    pub fn line_total(price: Decimal, quantity: i32) -> Decimal {
        price * Decimal::from(quantity)
    }

    /// First write wins: a line keeps the price captured when it was first
    /// saved, so later product price changes never rewrite history.
    #[must_use]
    pub fn snapshot_price(existing: Option<Decimal>, current: Decimal) -> Decimal {
        existing.unwrap_or(current)
    }

    /// Derive the transaction amount from its lines.
    ///
    /// Only meaningful for item-backed types; payment/fees amounts are
    /// authoritative input and never derived.
    #[must_use]
    pub fn amount_from_lines(lines: &[ItemLine]) -> Decimal {
        lines.iter().map(|l| l.total).sum()
    }

    /// Stock adjustments to apply when a transaction becomes effective.
    ///
    /// Deltas are merged per product; zero-quantity lines and lines whose
    /// product is gone contribute nothing. Monetary types yield an empty plan.
    #[must_use]
    pub fn approval_stock_deltas(
        transaction_type: TransactionType,
        lines: &[ItemLine],
    ) -> Vec<StockDelta> {
        Self::stock_deltas(transaction_type.stock_direction(), lines)
    }

    /// Stock adjustments that undo an effective transaction.
    ///
    /// The exact mirror of [`Self::approval_stock_deltas`].
    #[must_use]
    pub fn reversal_stock_deltas(
        transaction_type: TransactionType,
        lines: &[ItemLine],
    ) -> Vec<StockDelta> {
        Self::stock_deltas(-transaction_type.stock_direction(), lines)
    }

    fn stock_deltas(direction: i32, lines: &[ItemLine]) -> Vec<StockDelta> {
        let mut deltas: Vec<StockDelta> = Vec::new();
        if direction == 0 {
            return deltas;
        }
        for line in lines {
            let Some(product_id) = line.product_id else {
                continue;
            };
            let delta = direction * line.quantity;
            if delta == 0 {
                continue;
            }
            match deltas.iter_mut().find(|d| d.product_id == product_id) {
                Some(existing) => existing.delta += delta,
                None => deltas.push(StockDelta { product_id, delta }),
            }
        }
        deltas
    }

    /// Stock adjustment for editing a line of an *effective* transaction.
    ///
    /// Applies only the difference between the old and new quantity, so an
    /// edit never double-counts the part of the movement already applied at
    /// approval time. Returns `None` when nothing changes.
    #[must_use]
    pub fn edit_stock_delta(
        transaction_type: TransactionType,
        product_id: Uuid,
        old_quantity: i32,
        new_quantity: i32,
    ) -> Option<StockDelta> {
        let direction = transaction_type.stock_direction();
        let delta = direction * (new_quantity - old_quantity);
        (delta != 0).then_some(StockDelta { product_id, delta })
    }

    /// Stock adjustment for removing a line from an *effective* transaction:
    /// the line's full quantity is handed back.
    #[must_use]
    pub fn removal_stock_delta(
        transaction_type: TransactionType,
        line: &ItemLine,
    ) -> Option<StockDelta> {
        let product_id = line.product_id?;
        let delta = -transaction_type.stock_direction() * line.quantity;
        (delta != 0).then_some(StockDelta { product_id, delta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn take_input(items: Vec<ItemInput>) -> CreateTransactionInput {
        CreateTransactionInput {
            user_id: Some(Uuid::new_v4()),
            transaction_type: TransactionType::Take,
            amount: None,
            notes: None,
            items,
        }
    }

    fn line(product_id: Uuid, quantity: i32, price: Decimal) -> ItemLine {
        ItemLine {
            product_id: Some(product_id),
            quantity,
            price,
            total: LedgerService::line_total(price, quantity),
        }
    }

    #[test]
    fn test_validate_take_with_items() {
        let input = take_input(vec![ItemInput {
            product_id: Uuid::new_v4(),
            quantity: 3,
        }]);
        assert!(LedgerService::validate_input(&input).is_ok());
    }

    #[test]
    fn test_validate_take_without_partner() {
        let mut input = take_input(vec![]);
        input.user_id = None;
        assert!(matches!(
            LedgerService::validate_input(&input),
            Err(LedgerError::PartnerRequired("take"))
        ));
    }

    #[test]
    fn test_validate_negative_quantity() {
        let input = take_input(vec![ItemInput {
            product_id: Uuid::new_v4(),
            quantity: -1,
        }]);
        assert!(matches!(
            LedgerService::validate_input(&input),
            Err(LedgerError::NegativeQuantity(-1))
        ));
    }

    #[test]
    fn test_validate_zero_quantity_is_legal() {
        let input = take_input(vec![ItemInput {
            product_id: Uuid::new_v4(),
            quantity: 0,
        }]);
        assert!(LedgerService::validate_input(&input).is_ok());
    }

    #[test]
    fn test_validate_payment_requires_amount() {
        let input = CreateTransactionInput {
            user_id: Some(Uuid::new_v4()),
            transaction_type: TransactionType::Payment,
            amount: None,
            notes: None,
            items: vec![],
        };
        assert!(matches!(
            LedgerService::validate_input(&input),
            Err(LedgerError::AmountRequired("payment"))
        ));
    }

    #[test]
    fn test_validate_payment_rejects_zero_amount() {
        let input = CreateTransactionInput {
            user_id: Some(Uuid::new_v4()),
            transaction_type: TransactionType::Payment,
            amount: Some(Decimal::ZERO),
            notes: None,
            items: vec![],
        };
        assert!(matches!(
            LedgerService::validate_input(&input),
            Err(LedgerError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_validate_payment_rejects_items() {
        let input = CreateTransactionInput {
            user_id: Some(Uuid::new_v4()),
            transaction_type: TransactionType::Payment,
            amount: Some(dec!(100)),
            notes: None,
            items: vec![ItemInput {
                product_id: Uuid::new_v4(),
                quantity: 1,
            }],
        };
        assert!(matches!(
            LedgerService::validate_input(&input),
            Err(LedgerError::ItemsNotAllowed("payment"))
        ));
    }

    #[test]
    fn test_validate_fees_rejects_partner() {
        let input = CreateTransactionInput {
            user_id: Some(Uuid::new_v4()),
            transaction_type: TransactionType::Fees,
            amount: Some(dec!(50)),
            notes: None,
            items: vec![],
        };
        assert!(matches!(
            LedgerService::validate_input(&input),
            Err(LedgerError::FeesWithPartner)
        ));
    }

    #[test]
    fn test_validate_fees_without_partner() {
        let input = CreateTransactionInput {
            user_id: None,
            transaction_type: TransactionType::Fees,
            amount: Some(dec!(50)),
            notes: None,
            items: vec![],
        };
        assert!(LedgerService::validate_input(&input).is_ok());
    }

    #[test]
    fn test_resolve_items_snapshots_price() {
        let product_id = Uuid::new_v4();
        let items = vec![ItemInput {
            product_id,
            quantity: 4,
        }];

        let lines = LedgerService::resolve_items(&items, |_| Some(dec!(2.50))).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].price, dec!(2.50));
        assert_eq!(lines[0].total, dec!(10.00));
    }

    #[test]
    fn test_resolve_items_unknown_product() {
        let items = vec![ItemInput {
            product_id: Uuid::new_v4(),
            quantity: 1,
        }];
        let result = LedgerService::resolve_items(&items, |_| None);
        assert!(matches!(result, Err(LedgerError::ProductNotFound(_))));
    }

    #[test]
    fn test_snapshot_price_first_write_wins() {
        assert_eq!(
            LedgerService::snapshot_price(Some(dec!(3.00)), dec!(9.99)),
            dec!(3.00)
        );
        assert_eq!(LedgerService::snapshot_price(None, dec!(9.99)), dec!(9.99));
    }

    #[test]
    fn test_amount_from_lines() {
        let lines = vec![
            line(Uuid::new_v4(), 2, dec!(10)),
            line(Uuid::new_v4(), 1, dec!(5)),
        ];
        assert_eq!(LedgerService::amount_from_lines(&lines), dec!(25));
    }

    #[test]
    fn test_amount_from_empty_lines_is_zero() {
        assert_eq!(LedgerService::amount_from_lines(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_approval_deltas_take() {
        let product = Uuid::new_v4();
        let deltas =
            LedgerService::approval_stock_deltas(TransactionType::Take, &[line(product, 30, dec!(1))]);
        assert_eq!(
            deltas,
            vec![StockDelta {
                product_id: product,
                delta: -30
            }]
        );
    }

    #[test]
    fn test_approval_deltas_restore() {
        let product = Uuid::new_v4();
        let deltas = LedgerService::approval_stock_deltas(
            TransactionType::Restore,
            &[line(product, 7, dec!(1))],
        );
        assert_eq!(
            deltas,
            vec![StockDelta {
                product_id: product,
                delta: 7
            }]
        );
    }

    #[test]
    fn test_approval_deltas_merge_per_product() {
        let product = Uuid::new_v4();
        let deltas = LedgerService::approval_stock_deltas(
            TransactionType::Take,
            &[line(product, 3, dec!(1)), line(product, 4, dec!(1))],
        );
        assert_eq!(
            deltas,
            vec![StockDelta {
                product_id: product,
                delta: -7
            }]
        );
    }

    #[test]
    fn test_monetary_types_have_no_stock_plan() {
        let lines = [line(Uuid::new_v4(), 5, dec!(1))];
        assert!(LedgerService::approval_stock_deltas(TransactionType::Payment, &lines).is_empty());
        assert!(LedgerService::approval_stock_deltas(TransactionType::Fees, &lines).is_empty());
    }

    #[test]
    fn test_reversal_mirrors_approval() {
        let product = Uuid::new_v4();
        let lines = [line(product, 12, dec!(2))];
        let applied = LedgerService::approval_stock_deltas(TransactionType::Take, &lines);
        let reversed = LedgerService::reversal_stock_deltas(TransactionType::Take, &lines);
        assert_eq!(applied[0].delta, -reversed[0].delta);
    }

    #[test]
    fn test_deltas_skip_vanished_products() {
        let lines = [ItemLine {
            product_id: None,
            quantity: 5,
            price: dec!(1),
            total: dec!(5),
        }];
        assert!(LedgerService::reversal_stock_deltas(TransactionType::Take, &lines).is_empty());
    }

    #[test]
    fn test_edit_delta_applies_difference_only() {
        let product = Uuid::new_v4();
        // Take 5 -> 8 means 3 more units leave stock.
        let delta = LedgerService::edit_stock_delta(TransactionType::Take, product, 5, 8).unwrap();
        assert_eq!(delta.delta, -3);

        // Restore 5 -> 2 means 3 units come back out of stock.
        let delta =
            LedgerService::edit_stock_delta(TransactionType::Restore, product, 5, 2).unwrap();
        assert_eq!(delta.delta, -3);
    }

    #[test]
    fn test_edit_delta_none_when_unchanged() {
        assert!(
            LedgerService::edit_stock_delta(TransactionType::Take, Uuid::new_v4(), 5, 5).is_none()
        );
    }

    #[test]
    fn test_removal_delta_hands_back_full_quantity() {
        let product = Uuid::new_v4();
        let delta =
            LedgerService::removal_stock_delta(TransactionType::Take, &line(product, 6, dec!(1)))
                .unwrap();
        assert_eq!(delta.delta, 6);

        let delta = LedgerService::removal_stock_delta(
            TransactionType::Restore,
            &line(product, 6, dec!(1)),
        )
        .unwrap();
        assert_eq!(delta.delta, -6);
    }
}
