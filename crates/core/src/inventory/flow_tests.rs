//! End-to-end ledger flow tests over in-memory state.
//!
//! These tests drive the same sequence the repositories orchestrate against
//! the store: plan stock deltas, apply them, recompute balances, reverse on
//! delete. They pin the lifecycle behavior without a database.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::balance::{BalanceEngine, TransactionSummary};
use crate::inventory::{ItemLine, LedgerService, StockDelta, TransactionStatus, TransactionType};
use crate::workflow::WorkflowService;

struct Store {
    stock: HashMap<Uuid, i32>,
    history: Vec<TransactionSummary>,
}

impl Store {
    fn apply(&mut self, deltas: &[StockDelta]) {
        for delta in deltas {
            *self.stock.entry(delta.product_id).or_insert(0) += delta.delta;
        }
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
fn take_approve_delete_round_trip() {
    // Product P has stock 100. Create take-transaction T with item (P, 30).
    let product = Uuid::new_v4();
    let approver = Uuid::new_v4();
    let mut store = Store {
        stock: HashMap::from([(product, 100)]),
        history: Vec::new(),
    };

    let lines = vec![line(product, 30, dec!(10))];
    let amount = LedgerService::amount_from_lines(&lines);
    assert_eq!(amount, dec!(300));

    // Approve T: stock drops, balances pick the transaction up.
    let transaction_id = Uuid::new_v4();
    let action = WorkflowService::approve(TransactionStatus::Pending, approver).unwrap();
    assert_eq!(action.new_status(), TransactionStatus::Approved);

    store.apply(&LedgerService::approval_stock_deltas(
        TransactionType::Take,
        &lines,
    ));
    store.history.push(TransactionSummary {
        id: transaction_id,
        transaction_type: TransactionType::Take,
        amount,
        units: 30,
    });

    assert_eq!(store.stock[&product], 70);
    let balances = BalanceEngine::recompute(&store.history, None);
    assert_eq!(balances.products_count, 30);
    assert_eq!(balances.debt, dec!(300));

    // Delete T: reverse stock, recompute excluding T, then drop it.
    assert!(WorkflowService::requires_reversal(
        TransactionStatus::Approved
    ));
    store.apply(&LedgerService::reversal_stock_deltas(
        TransactionType::Take,
        &lines,
    ));
    let balances = BalanceEngine::recompute(&store.history, Some(transaction_id));
    store.history.retain(|t| t.id != transaction_id);

    assert_eq!(store.stock[&product], 100);
    assert_eq!(balances.products_count, 0);
    assert_eq!(balances.debt, Decimal::ZERO);
}

#[test]
fn restore_returns_taken_units() {
    let product = Uuid::new_v4();
    let mut store = Store {
        stock: HashMap::from([(product, 50)]),
        history: Vec::new(),
    };

    let take_lines = vec![line(product, 20, dec!(5))];
    store.apply(&LedgerService::approval_stock_deltas(
        TransactionType::Take,
        &take_lines,
    ));
    store.history.push(TransactionSummary {
        id: Uuid::new_v4(),
        transaction_type: TransactionType::Take,
        amount: dec!(100),
        units: 20,
    });
    assert_eq!(store.stock[&product], 30);

    let restore_lines = vec![line(product, 8, dec!(5))];
    store.apply(&LedgerService::approval_stock_deltas(
        TransactionType::Restore,
        &restore_lines,
    ));
    store.history.push(TransactionSummary {
        id: Uuid::new_v4(),
        transaction_type: TransactionType::Restore,
        amount: dec!(40),
        units: 8,
    });

    assert_eq!(store.stock[&product], 38);
    let balances = BalanceEngine::recompute(&store.history, None);
    assert_eq!(balances.products_count, 12);
    // Restores do not touch debt; only payments do.
    assert_eq!(balances.debt, dec!(100));
}

#[test]
fn item_edit_on_effective_transaction_applies_delta_only() {
    let product = Uuid::new_v4();
    let mut store = Store {
        stock: HashMap::from([(product, 100)]),
        history: Vec::new(),
    };

    let lines = vec![line(product, 10, dec!(2))];
    store.apply(&LedgerService::approval_stock_deltas(
        TransactionType::Take,
        &lines,
    ));
    assert_eq!(store.stock[&product], 90);

    // Edit 10 -> 25 on the approved transaction: only 15 more units move.
    let delta = LedgerService::edit_stock_delta(TransactionType::Take, product, 10, 25).unwrap();
    store.apply(&[delta]);
    assert_eq!(store.stock[&product], 75);

    // Removing the line hands the full 25 back.
    let removal =
        LedgerService::removal_stock_delta(TransactionType::Take, &line(product, 25, dec!(2)))
            .unwrap();
    store.apply(&[removal]);
    assert_eq!(store.stock[&product], 100);
}

#[test]
fn approving_twice_fails_and_applies_nothing_extra() {
    let approver = Uuid::new_v4();
    let first = WorkflowService::approve(TransactionStatus::Pending, approver).unwrap();
    let after = first.new_status();

    // The second decision sees the stored status and fails benignly.
    assert!(WorkflowService::approve(after, approver).is_err());
    assert!(WorkflowService::reject(after, approver).is_err());
}
