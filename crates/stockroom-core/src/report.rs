//! # Reports
//!
//! Aggregates for the dashboard overview and the reports screen.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Dashboard                                                              │
//! │  ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌──────────────────┐      │
//! │  │ Items   8  │ │ Categories │ │ Low stock  │ │ Stock value      │      │
//! │  │            │ │ 4          │ │ 3          │ │ $16999.77        │      │
//! │  └────────────┘ └────────────┘ └────────────┘ └──────────────────┘      │
//! │                                                                         │
//! │  Category distribution         Recent stock movement                    │
//! │  ● Electronics  2 items        2026-10-14   +50 / -12                   │
//! │  ● Furniture    1 item         2026-10-13   +0  / -3                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All aggregates are computed from resolved [`ItemView`]s, so the category
//! name shown is whatever the category is called right now.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Transaction, TransactionKind};
use crate::view::ItemView;

/// Days shown in the dashboard's stock movement list.
pub const MOVEMENT_DAYS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDistribution {
    pub name: String,
    pub item_count: usize,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LowStockEntry {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub reorder_level: i64,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub total_items: usize,
    /// Distinct categories referenced by at least one item.
    pub total_categories: usize,
    /// Distinct suppliers referenced by at least one item.
    pub total_suppliers: usize,
    pub low_stock_count: usize,
    /// Σ quantity × sell price, two decimals, no currency symbol.
    pub total_stock_value: String,
    pub category_distribution: Vec<CategoryDistribution>,
    pub low_stock_items: Vec<LowStockEntry>,
}

/// Stock value across all items.
///
/// ## Errors
/// `AmountOverflow` if one item's value or the running total does not fit.
pub fn total_stock_value(items: &[ItemView]) -> CoreResult<Money> {
    items.iter().try_fold(Money::zero(), |total, view| {
        total
            .checked_add(view.item.stock_value()?)
            .ok_or_else(|| CoreError::AmountOverflow("total stock value".into()))
    })
}

/// Builds the report from resolved items.
///
/// Category and supplier totals count only references that resolved, so
/// they always agree with the distribution rows.
///
/// ## Example
/// ```rust
/// use stockroom_core::report::build_report;
///
/// let report = build_report(&[]).unwrap();
/// assert_eq!(report.total_items, 0);
/// assert_eq!(report.total_stock_value, "0.00");
/// ```
pub fn build_report(items: &[ItemView]) -> CoreResult<InventoryReport> {
    let categories: HashSet<&str> = items
        .iter()
        .filter(|v| v.category_name.is_some())
        .filter_map(|v| v.item.category_id.as_deref())
        .collect();
    let suppliers: HashSet<&str> = items
        .iter()
        .filter(|v| v.supplier_name.is_some())
        .filter_map(|v| v.item.supplier_id.as_deref())
        .collect();

    let low_stock_items: Vec<LowStockEntry> = items
        .iter()
        .filter(|v| v.is_low_stock)
        .map(|v| LowStockEntry {
            id: v.item.id.clone(),
            name: v.item.name.clone(),
            sku: v.item.sku.clone(),
            quantity: v.item.quantity,
            reorder_level: v.item.reorder_level,
            category_name: v.category_name.clone(),
        })
        .collect();

    Ok(InventoryReport {
        total_items: items.len(),
        total_categories: categories.len(),
        total_suppliers: suppliers.len(),
        low_stock_count: low_stock_items.len(),
        total_stock_value: total_stock_value(items)?.to_decimal_string(),
        category_distribution: category_distribution(items),
        low_stock_items,
    })
}

/// Per-category item count and quantity, in order of first appearance.
///
/// Items without a resolvable category are left out.
pub fn category_distribution(items: &[ItemView]) -> Vec<CategoryDistribution> {
    let mut rows: Vec<(&str, CategoryDistribution)> = Vec::new();

    for view in items {
        let (Some(id), Some(name)) = (view.item.category_id.as_deref(), view.category_name.as_ref())
        else {
            continue;
        };
        match rows.iter_mut().find(|(seen, _)| *seen == id) {
            Some((_, row)) => {
                row.item_count += 1;
                row.total_quantity += view.item.quantity;
            }
            None => rows.push((
                id,
                CategoryDistribution {
                    name: name.clone(),
                    item_count: 1,
                    total_quantity: view.item.quantity,
                },
            )),
        }
    }

    rows.into_iter().map(|(_, row)| row).collect()
}

// =============================================================================
// Stock Movement
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Units received (IN plus positive adjustments).
    #[serde(rename = "in")]
    pub inbound: i64,
    /// Units issued (OUT plus negative adjustments), as a positive number.
    #[serde(rename = "out")]
    pub outbound: i64,
}

/// Daily inbound/outbound totals, newest day first, at most `limit` days.
pub fn stock_movement(transactions: &[Transaction], limit: usize) -> Vec<StockMovement> {
    let mut days: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();

    for tx in transactions {
        let day = days.entry(tx.created_at.date_naive()).or_insert((0, 0));
        match tx.kind {
            TransactionKind::In => day.0 += tx.change.abs(),
            TransactionKind::Out => day.1 += tx.change.abs(),
            TransactionKind::Adjustment if tx.change >= 0 => day.0 += tx.change,
            TransactionKind::Adjustment => day.1 += -tx.change,
        }
    }

    days.into_iter()
        .rev()
        .take(limit)
        .map(|(date, (inbound, outbound))| StockMovement {
            date,
            inbound,
            outbound,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
