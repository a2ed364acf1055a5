//! # Item Repository
//!
//! CRUD, list search and CSV import for inventory items.
//!
//! ## SKU Uniqueness
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create / update / import row                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_item (core)  ── errors ──► CoreError::Validation               │
//! │       │ ok                                                              │
//! │       ▼                                                                 │
//! │  another item with this SKU? (case-insensitive, self excluded)          │
//! │       │ yes ──► Validation { sku: Duplicate }                           │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  category / supplier id unknown?                                        │
//! │       │ yes ──► Validation { categoryId | supplierId: NotFound }        │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  write into the collection, return the stored item                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use stockroom_core::interchange::ImportRow;
use stockroom_core::search::{self, Page};
use stockroom_core::{
    new_id, CatalogIndex, CoreError, ErrorKind, FieldError, Item, ItemDraft, ItemView,
    ValidationErrors,
};
use tracing::{debug, info, warn};

use crate::database::{Database, Dataset};
use crate::error::{StoreError, StoreResult};

/// Result of importing a file.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub imported: Vec<Item>,
    pub rejected: Vec<RowRejection>,
}

/// A data line that could not be imported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRejection {
    /// 1-based data line number.
    pub line: usize,
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone)]
pub struct ItemRepository {
    db: Database,
}

fn sku_taken(data: &Dataset, sku: &str, except_id: Option<&str>) -> bool {
    data.items
        .iter()
        .any(|i| Some(i.id.as_str()) != except_id && i.sku.eq_ignore_ascii_case(sku))
}

/// Both references, when set, must name a record that exists right now.
fn check_references(data: &Dataset, item: &Item) -> StoreResult<()> {
    let mut errors = ValidationErrors::new();

    if let Some(id) = item.category_id.as_deref() {
        if !data.categories.iter().any(|c| c.id == id) {
            errors.add(
                "categoryId",
                FieldError::new(ErrorKind::NotFound, format!("Category not found: {}", id)),
            );
        }
    }
    if let Some(id) = item.supplier_id.as_deref() {
        if !data.suppliers.iter().any(|s| s.id == id) {
            errors.add(
                "supplierId",
                FieldError::new(ErrorKind::NotFound, format!("Supplier not found: {}", id)),
            );
        }
    }

    Ok(errors.into_result()?)
}

fn resolve(data: &Dataset, item: &Item) -> ItemView {
    CatalogIndex::new(&data.categories, &data.suppliers).resolve(item)
}

impl ItemRepository {
    pub fn new(db: Database) -> Self {
        ItemRepository { db }
    }

    /// All items in stored order.
    pub async fn list(&self) -> StoreResult<Vec<Item>> {
        Ok(self.db.read().await.items.clone())
    }

    /// All items with resolved names and stock status.
    pub async fn list_views(&self) -> StoreResult<Vec<ItemView>> {
        let data = self.db.read().await;
        let index = CatalogIndex::new(&data.categories, &data.suppliers);
        Ok(index.resolve_all(&data.items))
    }

    /// The item list screen: filter by name or SKU, then one page.
    pub async fn search(&self, query: &str, page: usize) -> StoreResult<Page<ItemView>> {
        debug!(query = %query, page = page, "Searching items");

        let data = self.db.read().await;
        let index = CatalogIndex::new(&data.categories, &data.suppliers);
        let result = search::search_items(&data.items, &index, query, page);

        debug!(
            matches = result.total_matches,
            total_pages = result.total_pages,
            "Item search complete"
        );
        Ok(result)
    }

    /// Gets an item by id.
    ///
    /// ## Returns
    /// * `Ok(ItemView)` - item with resolved category/supplier
    /// * `Err(StoreError::NotFound)` - no such item
    pub async fn get(&self, id: &str) -> StoreResult<ItemView> {
        let data = self.db.read().await;
        data.items
            .iter()
            .find(|i| i.id == id)
            .map(|item| resolve(&data, item))
            .ok_or_else(|| StoreError::not_found("Item", id))
    }

    pub async fn find_by_sku(&self, sku: &str) -> StoreResult<Option<Item>> {
        let data = self.db.read().await;
        Ok(data
            .items
            .iter()
            .find(|i| i.sku.eq_ignore_ascii_case(sku.trim()))
            .cloned())
    }

    /// Validates and inserts a new item.
    pub async fn create(&self, draft: ItemDraft) -> StoreResult<Item> {
        let mut data = self.db.write().await;
        let item = Self::insert(&mut data, draft)?;
        info!(id = %item.id, sku = %item.sku, "Item created");
        Ok(item)
    }

    fn insert(data: &mut Dataset, draft: ItemDraft) -> StoreResult<Item> {
        let item = draft.into_item(new_id(), Utc::now())?;
        if sku_taken(data, &item.sku, None) {
            return Err(StoreError::duplicate_field("sku", "SKU", &item.sku));
        }
        check_references(data, &item)?;
        data.items.push(item.clone());
        Ok(item)
    }

    /// Validates the draft and replaces the item's editable fields.
    pub async fn update(&self, id: &str, draft: ItemDraft) -> StoreResult<Item> {
        debug!(id = %id, "Updating item");

        let mut data = self.db.write().await;
        let position = data
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| StoreError::not_found("Item", id))?;

        let mut updated = data.items[position].clone();
        updated.apply_draft(draft, Utc::now())?;

        if sku_taken(&data, &updated.sku, Some(id)) {
            return Err(StoreError::duplicate_field("sku", "SKU", &updated.sku));
        }
        check_references(&data, &updated)?;

        data.items[position] = updated.clone();
        info!(id = %id, sku = %updated.sku, "Item updated");
        Ok(updated)
    }

    /// Removes an item. Its transactions are kept as history.
    pub async fn delete(&self, id: &str) -> StoreResult<Item> {
        let mut data = self.db.write().await;
        let position = data
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| StoreError::not_found("Item", id))?;

        let removed = data.items.remove(position);
        info!(id = %id, sku = %removed.sku, "Item deleted");
        Ok(removed)
    }

    /// Imports parsed rows, one item per row.
    ///
    /// Each row is validated on its own; a bad row is reported in
    /// [`ImportOutcome::rejected`] and does not stop the others. Rows later
    /// in the file see items imported from earlier rows, so a SKU repeated
    /// within one file is rejected as a duplicate.
    pub async fn import(&self, rows: &[ImportRow]) -> StoreResult<ImportOutcome> {
        let mut data = self.db.write().await;
        let mut outcome = ImportOutcome::default();

        for row in rows {
            let mut draft = row.to_item_draft();

            if let Some(name) = row.category_name() {
                let category_id = CatalogIndex::new(&data.categories, &data.suppliers)
                    .category_by_name(name)
                    .map(|c| c.id.clone());
                match category_id {
                    Some(id) => draft.category_id = Some(id),
                    None => {
                        let mut errors = ValidationErrors::new();
                        errors.add(
                            "category",
                            FieldError::invalid(format!("Unknown category '{}'", name)),
                        );
                        outcome.rejected.push(RowRejection {
                            line: row.line,
                            errors,
                        });
                        continue;
                    }
                }
            }

            match Self::insert(&mut data, draft) {
                Ok(item) => outcome.imported.push(item),
                Err(StoreError::Core(CoreError::Validation(errors))) => {
                    warn!(line = row.line, errors = %errors, "Import row rejected");
                    outcome.rejected.push(RowRejection {
                        line: row.line,
                        errors,
                    });
                }
                Err(other) => return Err(other),
            }
        }

        info!(
            imported = outcome.imported.len(),
            rejected = outcome.rejected.len(),
            "Import finished"
        );
        Ok(outcome)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
