//! # Transaction Commands
//!
//! ```text
//! Transactions screen
//!   ├── type dropdown ──► list_transactions("OUT") ──► newest first
//!   └── "Record" ──► record_transaction(input)
//!                      │
//!                      ├── amount checked against the type (core)
//!                      ├── quantity may not go below zero
//!                      └── performedBy defaults to the signed-in user
//! ```

use serde::{Deserialize, Serialize};
use stockroom_core::report::StockMovement;
use stockroom_core::search::TransactionFilter;
use stockroom_core::stock::is_low_stock;
use stockroom_core::{CoreError, Item, Transaction, TransactionKind, TransactionView};
use stockroom_store::NewTransaction;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::{DbState, SessionState, SubmitGuard};

/// The stock movement form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Positive for IN and OUT, signed for ADJUSTMENT.
    pub amount: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub performed_by: Option<String>,
}

/// Outcome of recording a movement: the item as it now stands and the
/// history entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedMovement {
    pub item: Item,
    pub is_low_stock: bool,
    pub transaction: Transaction,
}

/// Transaction history filtered by type (`ALL`, `IN`, `OUT`, `ADJUSTMENT`).
pub async fn list_transactions(db: &DbState, filter: &str) -> ApiResult<Vec<TransactionView>> {
    let filter: TransactionFilter = filter.parse()?;
    debug!(filter = %filter, "list_transactions command");
    Ok(db.inner().transactions().list(filter).await?)
}

pub async fn record_transaction(
    db: &DbState,
    session: &SessionState,
    submit: &SubmitGuard,
    input: TransactionInput,
) -> ApiResult<RecordedMovement> {
    let _submission = submit.begin()?;
    debug!(item_id = %input.item_id, kind = %input.kind, amount = input.amount, "record_transaction command");

    let performed_by = match input.performed_by {
        Some(name) if !name.trim().is_empty() => Some(name),
        _ => session.current_user()?.map(|u| u.name),
    };

    let (item, transaction) = db
        .inner()
        .transactions()
        .record(NewTransaction {
            item_id: input.item_id,
            kind: input.kind,
            amount: input.amount,
            reason: input.reason,
            performed_by,
        })
        .await?;

    Ok(RecordedMovement {
        is_low_stock: is_low_stock(item.quantity, item.reorder_level),
        item,
        transaction,
    })
}

/// Daily inbound/outbound totals, newest day first, at most `days` days.
pub async fn stock_movement(db: &DbState, days: usize) -> ApiResult<Vec<StockMovement>> {
    if days == 0 {
        return Err(CoreError::InvalidStockChange {
            reason: "days must be at least 1".into(),
        }
        .into());
    }
    Ok(db.inner().transactions().movement(days).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockroom_core::{Role, User};
    use stockroom_store::{Database, StoreConfig};

    fn db() -> DbState {
        DbState::new(Database::new(StoreConfig::instant()))
    }

    fn input(item_id: &str, kind: TransactionKind, amount: i64) -> TransactionInput {
        TransactionInput {
            item_id: item_id.into(),
            kind,
            amount,
            reason: None,
            performed_by: None,
        }
    }

    #[tokio::test]
    async fn test_filter_parsing() {
        let db = db();
        assert_eq!(list_transactions(&db, "all").await.unwrap().len(), 7);
        assert_eq!(list_transactions(&db, "IN").await.unwrap().len(), 3);

        let err = list_transactions(&db, "SIDEWAYS").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_performed_by_defaults_to_session_user() {
        let session = SessionState::in_memory();
        session
            .set_current_user(&User {
                id: "u1".into(),
                name: "Manager User".into(),
                email: "manager@example.com".into(),
                role: Role::Manager,
            })
            .unwrap();

        let recorded = record_transaction(
            &db(),
            &session,
            &SubmitGuard::new(),
            input("7", TransactionKind::In, 10),
        )
        .await
        .unwrap();

        assert_eq!(recorded.item.quantity, 16);
        assert!(!recorded.is_low_stock);
        assert_eq!(
            recorded.transaction.performed_by.as_deref(),
            Some("Manager User")
        );
    }

    #[tokio::test]
    async fn test_out_of_stock_and_bad_amount() {
        let db = db();
        let session = SessionState::in_memory();
        let submit = SubmitGuard::new();

        let err = record_transaction(&db, &session, &submit, input("3", TransactionKind::Out, 4))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err = record_transaction(&db, &session, &submit, input("3", TransactionKind::In, -4))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_input_wire_format() {
        let input: TransactionInput = serde_json::from_str(
            r#"{"itemId":"1","type":"ADJUSTMENT","amount":-2,"reason":"Recount"}"#,
        )
        .unwrap();
        assert_eq!(input.kind, TransactionKind::Adjustment);
        assert_eq!(input.performed_by, None);
    }

    #[tokio::test]
    async fn test_zero_day_movement_rejected() {
        assert!(stock_movement(&db(), 0).await.is_err());
        assert!(!stock_movement(&db(), 10).await.unwrap().is_empty());
    }
}
