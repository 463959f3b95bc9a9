//! Transaction ledger and stock movement rules.
//!
//! This module implements the core ledger functionality:
//! - Transaction and line-item domain types
//! - Price snapshotting and line total math
//! - Amount derivation from line items
//! - Stock delta plans for approval, reversal, and item edits
//! - Error types for ledger operations

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod flow_tests;
#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{
    CreateTransactionInput, ItemInput, ItemLine, StockDelta, TransactionStatus, TransactionType,
};
