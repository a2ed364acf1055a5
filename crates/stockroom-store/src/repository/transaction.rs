//! # Transaction Repository
//!
//! Stock movements. Recording one updates the item's quantity and appends
//! the transaction under a single write lock.
//!
//! ## Recording Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record(item_id, OUT, 5)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StockChange::new(OUT, 5) → change = -5     (core, sign rules)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write lock                                                             │
//! │  ├── find item                  NotFound if missing                     │
//! │  ├── change.apply_to(quantity)  InsufficientStock if it would go < 0    │
//! │  ├── item.quantity = new value                                          │
//! │  └── push Transaction                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use stockroom_core::report::{self, StockMovement};
use stockroom_core::search::{self, TransactionFilter};
use stockroom_core::stock::StockChange;
use stockroom_core::types::normalize_text;
use stockroom_core::view::{transaction_views, TransactionView};
use stockroom_core::{new_id, Item, Transaction, TransactionKind};
use tracing::{debug, info};

use crate::database::Database;
use crate::error::{StoreError, StoreResult};

/// A stock movement to record.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub item_id: String,
    pub kind: TransactionKind,
    /// Amount as typed: positive for IN/OUT, signed for ADJUSTMENT.
    pub amount: i64,
    pub reason: Option<String>,
    pub performed_by: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: Database,
}

impl TransactionRepository {
    pub fn new(db: Database) -> Self {
        TransactionRepository { db }
    }

    /// Transactions matching the type filter, newest first, with the
    /// moved item's name and SKU.
    pub async fn list(&self, filter: TransactionFilter) -> StoreResult<Vec<TransactionView>> {
        let data = self.db.read().await;
        let matched = search::filter_transactions(&data.transactions, filter);
        debug!(filter = %filter, count = matched.len(), "Listing transactions");
        Ok(transaction_views(&matched, &data.items))
    }

    /// Daily in/out totals for the dashboard.
    pub async fn movement(&self, days: usize) -> StoreResult<Vec<StockMovement>> {
        let data = self.db.read().await;
        Ok(report::stock_movement(&data.transactions, days))
    }

    /// Applies a stock movement to its item and records it.
    ///
    /// ## Returns
    /// The updated item and the stored transaction.
    ///
    /// ## Errors
    /// * `Core(InvalidStockChange)` - amount does not fit the type
    /// * `NotFound` - no such item
    /// * `Core(InsufficientStock)` - the item would go below zero
    pub async fn record(&self, new: NewTransaction) -> StoreResult<(Item, Transaction)> {
        let change = StockChange::new(new.kind, new.amount)?;

        let mut data = self.db.write().await;
        let item = data
            .items
            .iter_mut()
            .find(|i| i.id == new.item_id)
            .ok_or_else(|| StoreError::not_found("Item", &new.item_id))?;

        let now = Utc::now();
        item.quantity = change.apply_to(&item.sku, item.quantity)?;
        item.updated_at = now;
        let item = item.clone();

        let transaction = Transaction {
            id: new_id(),
            item_id: item.id.clone(),
            kind: change.kind(),
            change: change.change(),
            reason: normalize_text(new.reason),
            performed_by: normalize_text(new.performed_by),
            created_at: now,
        };
        data.transactions.push(transaction.clone());

        info!(
            item = %item.sku,
            kind = %transaction.kind,
            change = transaction.change,
            quantity = item.quantity,
            "Stock movement recorded"
        );
        Ok((item, transaction))
    }
}
