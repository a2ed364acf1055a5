//! # Supplier Commands
//!
//! Same shape as the category screen, plus a detail lookup. The search box
//! matches the supplier name or contact person.

use stockroom_core::{Supplier, SupplierDraft, SupplierView};
use tracing::debug;

use crate::commands::{Deleted, Saved};
use crate::error::ApiResult;
use crate::navigation::Route;
use crate::state::{DbState, SubmitGuard};

pub async fn list_suppliers(db: &DbState, query: &str) -> ApiResult<Vec<SupplierView>> {
    debug!(query = %query, "list_suppliers command");
    Ok(db.inner().suppliers().list(query).await?)
}

pub async fn get_supplier(db: &DbState, id: &str) -> ApiResult<SupplierView> {
    debug!(id = %id, "get_supplier command");
    Ok(db.inner().suppliers().get(id).await?)
}

pub async fn create_supplier(
    db: &DbState,
    submit: &SubmitGuard,
    draft: SupplierDraft,
) -> ApiResult<Saved<Supplier>> {
    let _submission = submit.begin()?;
    debug!(name = ?draft.name, "create_supplier command");
    let supplier = db.inner().suppliers().create(draft).await?;
    Ok(Saved::new(supplier, Route::Suppliers))
}

pub async fn update_supplier(
    db: &DbState,
    submit: &SubmitGuard,
    id: &str,
    draft: SupplierDraft,
) -> ApiResult<Saved<Supplier>> {
    let _submission = submit.begin()?;
    debug!(id = %id, "update_supplier command");
    let supplier = db.inner().suppliers().update(id, draft).await?;
    Ok(Saved::new(supplier, Route::Suppliers))
}

/// Deletes a supplier. Its items keep existing without a supplier.
pub async fn delete_supplier(db: &DbState, id: &str) -> ApiResult<Deleted> {
    debug!(id = %id, "delete_supplier command");
    let detached_items = db.inner().suppliers().delete(id).await?;
    Ok(Deleted {
        id: id.to_string(),
        detached_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockroom_core::ErrorKind;
    use stockroom_store::{Database, StoreConfig};

    fn db() -> DbState {
        DbState::new(Database::new(StoreConfig::instant()))
    }

    #[tokio::test]
    async fn test_search_by_contact_person() {
        let suppliers = list_suppliers(&db(), "jane").await.unwrap();
        assert_eq!(suppliers.len(), 1);
        assert_eq!(suppliers[0].supplier.name, "Office Depot");
        assert_eq!(suppliers[0].item_count, 2);
    }

    #[tokio::test]
    async fn test_bad_email_rejected() {
        let draft = SupplierDraft {
            name: Some("Cable Barn".into()),
            email: Some("sales@cablebarn".into()),
            ..Default::default()
        };
        let err = create_supplier(&db(), &SubmitGuard::new(), draft)
            .await
            .unwrap_err();
        assert_eq!(
            err.field_errors.unwrap().kind_of("email"),
            Some(ErrorKind::Invalid)
        );
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let db = db();
        let draft = SupplierDraft {
            name: Some("Cable Barn".into()),
            contact_person: Some("Ada Park".into()),
            email: Some("sales@cablebarn.com".into()),
            ..Default::default()
        };
        let saved = create_supplier(&db, &SubmitGuard::new(), draft)
            .await
            .unwrap();
        assert_eq!(saved.redirect, "/dashboard/suppliers");

        let view = get_supplier(&db, &saved.record.id).await.unwrap();
        assert_eq!(view.item_count, 0);
    }

    #[tokio::test]
    async fn test_unknown_supplier() {
        let err = get_supplier(&db(), "nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        let err = delete_supplier(&db(), "nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_reports_detached_items() {
        let deleted = delete_supplier(&db(), "1").await.unwrap();
        assert_eq!(deleted.detached_items, 4);
    }
}
