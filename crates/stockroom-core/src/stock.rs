//! # Stock Status
//!
//! The single place where "low stock" is decided, plus the arithmetic for
//! stock movements and margins.
//!
//! ## Low Stock Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity <= reorder_level   →   LOW STOCK                              │
//! │                                                                         │
//! │    reorder_level = 10                                                   │
//! │    ───────────────────────────────────────────────────►  quantity       │
//! │    0 ........... 10 │ 11 ..........                                     │
//! │    └── LowStock ────┘ └── InStock ──                                    │
//! │                                                                         │
//! │  Used by: item list, item detail, dashboard, reports                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing stores the flag. Every view calls [`is_low_stock`] on the live
//! quantity when it renders.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::TransactionKind;
use crate::validation::MAX_QUANTITY;

/// `quantity <= reorder_level`.
///
/// ## Example
/// ```rust
/// use stockroom_core::stock::is_low_stock;
///
/// assert!(is_low_stock(3, 10));
/// assert!(is_low_stock(10, 10));
/// assert!(!is_low_stock(11, 10));
/// ```
#[inline]
pub const fn is_low_stock(quantity: i64, reorder_level: i64) -> bool {
    quantity <= reorder_level
}

/// Badge shown next to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    LowStock,
}

impl StockStatus {
    pub fn of(quantity: i64, reorder_level: i64) -> StockStatus {
        if is_low_stock(quantity, reorder_level) {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
        }
    }
}

/// Profit margin in percent, rounded to one decimal.
///
/// `(sell - cost) / sell * 100`. Returns `0.0` when there is no cost price
/// or the selling price is zero.
///
/// ## Example
/// ```rust
/// use stockroom_core::money::Money;
/// use stockroom_core::stock::profit_margin;
///
/// let margin = profit_margin(Money::from_cents(99999), Some(Money::from_cents(75000)));
/// assert_eq!(margin, 25.0);
/// assert_eq!(profit_margin(Money::from_cents(2999), None), 0.0);
/// ```
pub fn profit_margin(sell: Money, cost: Option<Money>) -> f64 {
    let Some(cost) = cost else {
        return 0.0;
    };
    if sell.is_zero() {
        return 0.0;
    }
    let margin = (sell - cost).cents() as f64 / sell.cents() as f64 * 100.0;
    (margin * 10.0).round() / 10.0
}

// =============================================================================
// Stock Change
// =============================================================================

/// A validated stock movement, ready to be applied to an item.
///
/// ## Sign Convention
/// ```text
/// IN          amount > 0   →  change = +amount
/// OUT         amount > 0   →  change = -amount
/// ADJUSTMENT  amount != 0  →  change =  amount (signed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockChange {
    kind: TransactionKind,
    change: i64,
}

impl StockChange {
    /// Builds a change from the amount the user typed.
    pub fn new(kind: TransactionKind, amount: i64) -> CoreResult<Self> {
        let change = match kind {
            TransactionKind::In | TransactionKind::Out if amount <= 0 => {
                return Err(CoreError::InvalidStockChange {
                    reason: format!("{} quantity must be greater than zero", kind),
                });
            }
            TransactionKind::In => amount,
            TransactionKind::Out => -amount,
            TransactionKind::Adjustment if amount == 0 => {
                return Err(CoreError::InvalidStockChange {
                    reason: "adjustment must not be zero".to_string(),
                });
            }
            TransactionKind::Adjustment => amount,
        };
        Ok(StockChange { kind, change })
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Signed quantity delta.
    pub fn change(&self) -> i64 {
        self.change
    }

    /// Returns the quantity after the change.
    ///
    /// ## Errors
    /// - `InsufficientStock` if the result would be negative
    /// - `InvalidStockChange` if it would pass [`MAX_QUANTITY`]
    ///
    /// `sku` is only used for the error message.
    pub fn apply_to(&self, sku: &str, quantity: i64) -> CoreResult<i64> {
        match quantity.checked_add(self.change) {
            Some(next) if (0..=MAX_QUANTITY).contains(&next) => Ok(next),
            _ if self.change > 0 => Err(CoreError::InvalidStockChange {
                reason: format!("{} would exceed the maximum quantity of {}", sku, MAX_QUANTITY),
            }),
            _ => Err(CoreError::InsufficientStock {
                sku: sku.to_string(),
                available: quantity,
                change: self.change,
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(StockStatus::of(3, 10), StockStatus::LowStock);
        assert_eq!(StockStatus::of(15, 5), StockStatus::InStock);
        assert_eq!(StockStatus::of(0, 0).label(), "Low Stock");
    }

    #[test]
    fn test_profit_margin() {
        // Office chair: 249.99 sell, 150.00 cost
        assert_eq!(
            profit_margin(Money::from_cents(24999), Some(Money::from_cents(15000))),
            40.0
        );
        // Wireless mouse: 29.99 sell, 15.00 cost
        assert_eq!(
            profit_margin(Money::from_cents(2999), Some(Money::from_cents(1500))),
            50.0
        );
        assert_eq!(profit_margin(Money::zero(), Some(Money::zero())), 0.0);
        assert_eq!(
            profit_margin(Money::from_cents(300), Some(Money::from_cents(200))),
            33.3
        );
    }

    #[test]
    fn test_stock_change_signs() {
        assert_eq!(StockChange::new(TransactionKind::In, 5).unwrap().change(), 5);
        assert_eq!(StockChange::new(TransactionKind::Out, 5).unwrap().change(), -5);
        assert_eq!(
            StockChange::new(TransactionKind::Adjustment, -2).unwrap().change(),
            -2
        );

        assert!(StockChange::new(TransactionKind::In, 0).is_err());
        assert!(StockChange::new(TransactionKind::Out, -3).is_err());
        assert!(StockChange::new(TransactionKind::Adjustment, 0).is_err());
    }

    #[test]
    fn test_apply_rejects_negative_stock() {
        let out = StockChange::new(TransactionKind::Out, 5).unwrap();
        let err = out.apply_to("SKU003", 3).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                change: -5,
                ..
            }
        ));

        assert_eq!(out.apply_to("SKU003", 5).unwrap(), 0);
    }

    #[test]
    fn test_apply_caps_quantity() {
        let restock = StockChange::new(TransactionKind::In, 2).unwrap();
        assert_eq!(restock.apply_to("SKU001", MAX_QUANTITY - 2).unwrap(), MAX_QUANTITY);
        assert!(matches!(
            restock.apply_to("SKU001", MAX_QUANTITY - 1),
            Err(CoreError::InvalidStockChange { .. })
        ));

        let huge = StockChange::new(TransactionKind::In, i64::MAX).unwrap();
        assert!(matches!(
            huge.apply_to("SKU001", 5),
            Err(CoreError::InvalidStockChange { .. })
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the flag is exactly the boundary comparison.
            #[test]
            fn low_stock_iff_at_or_below_reorder(
                quantity in 0i64..10_000,
                reorder in 0i64..10_000,
            ) {
                prop_assert_eq!(is_low_stock(quantity, reorder), quantity <= reorder);
                prop_assert_eq!(
                    StockStatus::of(quantity, reorder) == StockStatus::LowStock,
                    quantity <= reorder
                );
            }

            /// Property: applied changes never leave negative stock.
            #[test]
            fn applied_change_never_negative(
                quantity in 0i64..1_000,
                amount in 1i64..2_000,
            ) {
                let out = StockChange::new(TransactionKind::Out, amount).unwrap();
                match out.apply_to("SKU", quantity) {
                    Ok(next) => prop_assert!(next >= 0 && amount <= quantity),
                    Err(_) => prop_assert!(amount > quantity),
                }
            }
        }
    }
}
