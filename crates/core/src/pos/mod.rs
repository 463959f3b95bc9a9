//! Point-of-sale checkout and refund logic.
//!
//! Sales are one-shot: there is no approval step. A checkout validates the
//! whole cart against current stock (all-or-nothing), snapshots prices and
//! costs, computes totals, and decrements stock. A refund fully reverses the
//! stock decrements.
//!
//! # Modules
//!
//! - `types` - Sale domain types and totals math
//! - `error` - POS-specific error types
//! - `service` - Cart validation and refund gate

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::PosError;
pub use service::PosService;
pub use types::{
    CartLine, PaymentMethod, ProductInfo, SaleStatus, SaleTotals, generate_receipt_number,
};
