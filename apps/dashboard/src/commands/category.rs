//! # Category Commands
//!
//! The categories screen edits in place: the add/edit form sits above the
//! list, so a save stays on `/dashboard/categories`.

use stockroom_core::{Category, CategoryDraft, CategoryView};
use tracing::debug;

use crate::commands::{Deleted, Saved};
use crate::error::ApiResult;
use crate::navigation::Route;
use crate::state::{DbState, SubmitGuard};

/// Categories whose name contains `query`, with live item counts.
pub async fn list_categories(db: &DbState, query: &str) -> ApiResult<Vec<CategoryView>> {
    debug!(query = %query, "list_categories command");
    Ok(db.inner().categories().list(query).await?)
}

pub async fn create_category(
    db: &DbState,
    submit: &SubmitGuard,
    draft: CategoryDraft,
) -> ApiResult<Saved<Category>> {
    let _submission = submit.begin()?;
    debug!(name = ?draft.name, "create_category command");
    let category = db.inner().categories().create(draft).await?;
    Ok(Saved::new(category, Route::Categories))
}

pub async fn update_category(
    db: &DbState,
    submit: &SubmitGuard,
    id: &str,
    draft: CategoryDraft,
) -> ApiResult<Saved<Category>> {
    let _submission = submit.begin()?;
    debug!(id = %id, "update_category command");
    let category = db.inner().categories().update(id, draft).await?;
    Ok(Saved::new(category, Route::Categories))
}

/// Deletes a category. Items in it become uncategorized.
pub async fn delete_category(db: &DbState, id: &str) -> ApiResult<Deleted> {
    debug!(id = %id, "delete_category command");
    let detached_items = db.inner().categories().delete(id).await?;
    Ok(Deleted {
        id: id.to_string(),
        detached_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::item::get_item;
    use crate::error::ErrorCode;
    use stockroom_core::ErrorKind;
    use stockroom_store::{Database, StoreConfig};

    fn db() -> DbState {
        DbState::new(Database::new(StoreConfig::instant()))
    }

    fn named(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: Some(name.into()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_list_with_counts() {
        let categories = list_categories(&db(), "office").await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category.name, "Office Supplies");
        assert_eq!(categories[0].item_count, 2);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let err = create_category(&db(), &SubmitGuard::new(), named("electronics"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            err.field_errors.unwrap().kind_of("name"),
            Some(ErrorKind::Duplicate)
        );
    }

    #[tokio::test]
    async fn test_rename_stays_on_screen() {
        let saved = update_category(&db(), &SubmitGuard::new(), "3", named("Stationery"))
            .await
            .unwrap();
        assert_eq!(saved.record.name, "Stationery");
        assert_eq!(saved.redirect, "/dashboard/categories");
    }

    #[tokio::test]
    async fn test_delete_detaches_items() {
        let db = db();
        let deleted = delete_category(&db, "1").await.unwrap();
        assert_eq!(deleted.detached_items, 2);

        let laptop = get_item(&db, "1").await.unwrap();
        assert_eq!(laptop.item.category_id, None);
        assert_eq!(laptop.category_name, None);

        let err = delete_category(&db, "1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
