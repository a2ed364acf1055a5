//! # Category Repository
//!
//! Categories are listed with a live `itemCount`. Deleting a category
//! clears `category_id` on the items that pointed at it, so no item is left
//! referencing a missing record.

use stockroom_core::search;
use stockroom_core::view::category_views;
use stockroom_core::{new_id, Category, CategoryDraft, CategoryView};
use tracing::{debug, info};

use crate::database::Database;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: Database,
}

impl CategoryRepository {
    pub fn new(db: Database) -> Self {
        CategoryRepository { db }
    }

    /// Categories whose name contains `query`, with item counts.
    pub async fn list(&self, query: &str) -> StoreResult<Vec<CategoryView>> {
        let data = self.db.read().await;
        let matched: Vec<Category> = search::filter(&data.categories, query)
            .into_iter()
            .cloned()
            .collect();
        debug!(query = %query, count = matched.len(), "Listing categories");
        Ok(category_views(&matched, &data.items))
    }

    pub async fn get(&self, id: &str) -> StoreResult<CategoryView> {
        let data = self.db.read().await;
        let category = data
            .categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("Category", id))?;
        let mut views = category_views(std::slice::from_ref(category), &data.items);
        views
            .pop()
            .ok_or_else(|| StoreError::not_found("Category", id))
    }

    pub async fn create(&self, draft: CategoryDraft) -> StoreResult<Category> {
        let mut data = self.db.write().await;
        let category = draft.into_category(new_id(), &data.categories)?;
        data.categories.push(category.clone());
        info!(id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn update(&self, id: &str, draft: CategoryDraft) -> StoreResult<Category> {
        let mut data = self.db.write().await;
        let position = data
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("Category", id))?;

        let category = draft.into_category(id.to_string(), &data.categories)?;
        data.categories[position] = category.clone();
        info!(id = %id, name = %category.name, "Category updated");
        Ok(category)
    }

    /// Removes the category and returns how many items were uncategorized.
    pub async fn delete(&self, id: &str) -> StoreResult<usize> {
        let mut data = self.db.write().await;
        let position = data
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("Category", id))?;
        data.categories.remove(position);

        let mut cleared = 0;
        for item in data
            .items
            .iter_mut()
            .filter(|i| i.category_id.as_deref() == Some(id))
        {
            item.category_id = None;
            cleared += 1;
        }

        info!(id = %id, cleared_items = cleared, "Category deleted");
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::StoreConfig;
    use stockroom_core::{CoreError, ErrorKind};

    fn db() -> Database {
        Database::new(StoreConfig::instant())
    }

    fn named(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: Some(name.into()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_list_counts_items() {
        let views = db().categories().list("").await.unwrap();
        assert_eq!(views.len(), 4);
        let electronics = views.iter().find(|v| v.category.name == "Electronics").unwrap();
        assert_eq!(electronics.item_count, 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_name() {
        let views = db().categories().list("SUPPL").await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].category.name, "Office Supplies");
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let err = db().categories().create(named("furniture")).await.unwrap_err();
        let StoreError::Core(CoreError::Validation(errors)) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.kind_of("name"), Some(ErrorKind::Duplicate));
    }

    #[tokio::test]
    async fn test_rename_to_own_name_allowed() {
        let db = db();
        let updated = db.categories().update("2", named("FURNITURE")).await.unwrap();
        assert_eq!(updated.name, "FURNITURE");
        assert_eq!(db.categories().get("2").await.unwrap().item_count, 2);
    }

    #[tokio::test]
    async fn test_delete_clears_item_references() {
        let db = db();
        let cleared = db.categories().delete("1").await.unwrap();
        assert_eq!(cleared, 2);

        let laptop = db.items().get("1").await.unwrap();
        assert_eq!(laptop.item.category_id, None);
        assert_eq!(laptop.category_name, None);
        assert!(db.categories().get("1").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_created_category_starts_empty() {
        let db = db();
        let created = db.categories().create(named("Kitchen")).await.unwrap();
        assert_eq!(db.categories().get(&created.id).await.unwrap().item_count, 0);
    }
}
