//! Partner balance recalculation.
//!
//! Partners carry two cached aggregates, `debt` (merchants) and
//! `products_count` (units currently held), that must always be
//! re-derivable from the approved transaction history. This module owns
//! that derivation.

pub mod engine;

#[cfg(test)]
mod engine_props;

pub use engine::{BalanceEngine, TransactionSummary, UserBalances};
