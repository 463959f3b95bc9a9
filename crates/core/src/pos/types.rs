//! Sale domain types and totals math.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment method for a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash payment.
    Cash,
    /// Card payment.
    Card,
    /// Bank transfer.
    Transfer,
}

impl PaymentMethod {
    /// Parse a payment method from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "card" => Some(Self::Card),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }

    /// Returns the string representation of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Transfer => "transfer",
        }
    }
}

/// Sale status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    /// Sale completed and stock applied.
    Completed,
    /// Sale refunded; stock handed back.
    Refunded,
    /// Sale cancelled.
    Cancelled,
}

impl SaleStatus {
    /// Parse a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "completed" => Some(Self::Completed),
            "refunded" => Some(Self::Refunded),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested line in a checkout cart.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    /// The product being sold.
    pub product_id: Uuid,
    /// Units requested; must be at least 1.
    pub quantity: i32,
}

/// Product data the POS needs, injected by the caller.
#[derive(Debug, Clone)]
pub struct ProductInfo {
    /// Current sale price.
    pub price: Decimal,
    /// Current unit cost.
    pub cost: Decimal,
    /// Units on hand.
    pub stock: i32,
    /// Whether the product is sellable.
    pub is_active: bool,
}

/// Computed money fields of a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleTotals {
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Discount actually applied.
    pub discount: Decimal,
    /// Tax applied after discount.
    pub tax_amount: Decimal,
    /// `subtotal - discount + tax_amount`.
    pub total: Decimal,
    /// `max(0, amount_paid - total)`.
    pub change: Decimal,
}

impl SaleTotals {
    /// Calculate sale totals.
    ///
    /// A positive `discount_percentage` takes precedence over the flat
    /// `discount`. Tax applies to the discounted subtotal using the
    /// company's percentage rate.
    #[must_use]
    pub fn calculate(
        subtotal: Decimal,
        discount: Decimal,
        discount_percentage: Decimal,
        tax_rate: Decimal,
        amount_paid: Decimal,
    ) -> Self {
        let discount = if discount_percentage > Decimal::ZERO {
            subtotal * discount_percentage / Decimal::ONE_HUNDRED
        } else {
            discount
        };

        let after_discount = subtotal - discount;

        let tax_amount = if tax_rate > Decimal::ZERO {
            after_discount * tax_rate / Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        let total = after_discount + tax_amount;
        let change = (amount_paid - total).max(Decimal::ZERO);

        Self {
            subtotal,
            discount,
            tax_amount,
            total,
            change,
        }
    }
}

/// Generate a receipt number: `RCP-` followed by 8 uppercase hex chars.
#[must_use]
pub fn generate_receipt_number() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("RCP-{}", hex[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_no_discount_no_tax() {
        let totals = SaleTotals::calculate(dec!(25), dec!(0), dec!(0), dec!(0), dec!(25));
        assert_eq!(totals.total, dec!(25));
        assert_eq!(totals.discount, dec!(0));
        assert_eq!(totals.tax_amount, dec!(0));
        assert_eq!(totals.change, dec!(0));
    }

    #[test]
    fn test_totals_with_tax() {
        // Two lines (10 x 2, 5 x 1), 10% tax, paid 30.
        let totals = SaleTotals::calculate(dec!(25), dec!(0), dec!(0), dec!(10), dec!(30));
        assert_eq!(totals.subtotal, dec!(25));
        assert_eq!(totals.tax_amount, dec!(2.5));
        assert_eq!(totals.total, dec!(27.5));
        assert_eq!(totals.change, dec!(2.5));
    }

    #[test]
    fn test_percentage_discount_wins_over_flat() {
        let totals = SaleTotals::calculate(dec!(200), dec!(15), dec!(10), dec!(0), dec!(200));
        assert_eq!(totals.discount, dec!(20));
        assert_eq!(totals.total, dec!(180));
    }

    #[test]
    fn test_flat_discount_when_no_percentage() {
        let totals = SaleTotals::calculate(dec!(200), dec!(15), dec!(0), dec!(0), dec!(200));
        assert_eq!(totals.discount, dec!(15));
        assert_eq!(totals.total, dec!(185));
    }

    #[test]
    fn test_tax_applies_after_discount() {
        let totals = SaleTotals::calculate(dec!(100), dec!(0), dec!(50), dec!(10), dec!(100));
        assert_eq!(totals.discount, dec!(50));
        assert_eq!(totals.tax_amount, dec!(5));
        assert_eq!(totals.total, dec!(55));
    }

    #[test]
    fn test_change_never_negative() {
        let totals = SaleTotals::calculate(dec!(100), dec!(0), dec!(0), dec!(0), dec!(40));
        assert_eq!(totals.change, dec!(0));
    }

    #[test]
    fn test_receipt_number_shape() {
        let receipt = generate_receipt_number();
        assert!(receipt.starts_with("RCP-"));
        assert_eq!(receipt.len(), 12);
        assert!(
            receipt[4..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!(PaymentMethod::parse("cash"), Some(PaymentMethod::Cash));
        assert_eq!(PaymentMethod::parse("CARD"), Some(PaymentMethod::Card));
        assert_eq!(
            PaymentMethod::parse("transfer"),
            Some(PaymentMethod::Transfer)
        );
        assert_eq!(PaymentMethod::parse("crypto"), None);
    }

    #[test]
    fn test_sale_status_parse() {
        assert_eq!(SaleStatus::parse("completed"), Some(SaleStatus::Completed));
        assert_eq!(SaleStatus::parse("Refunded"), Some(SaleStatus::Refunded));
        assert_eq!(SaleStatus::parse("cancelled"), Some(SaleStatus::Cancelled));
        assert_eq!(SaleStatus::parse("void"), None);
    }
}
