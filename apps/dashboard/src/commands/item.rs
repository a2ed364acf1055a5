//! # Item Commands
//!
//! ```text
//! Items screen ──► list_items(query, page) ──► Page<ItemView>
//!      │                                        (10 rows, isLowStock)
//!      ├── row click ──► get_item(id) ──► ItemView | NOT_FOUND
//!      ├── "Add Item" ──► create_item(draft) ──► Saved<Item>
//!      ├── "Edit" ──► update_item(id, draft) ──► Saved<Item>
//!      └── "Delete" ──► delete_item(id) ──► Item
//! ```

use std::time::Instant;

use stockroom_core::{Item, ItemDraft, ItemView, Page};
use tracing::{debug, info};

use crate::commands::Saved;
use crate::error::ApiResult;
use crate::navigation::Route;
use crate::state::{DbState, SubmitGuard};

/// Searches items by name or SKU and returns one page.
///
/// ## Arguments
/// * `query` - Case-insensitive substring, empty for all items
/// * `page` - 1-based page number; out-of-range pages come back empty
pub async fn list_items(db: &DbState, query: &str, page: usize) -> ApiResult<Page<ItemView>> {
    let start = Instant::now();
    debug!(query = %query, page = page, "list_items command");

    let result = db.inner().items().search(query, page).await?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = result.items.len(),
        total_pages = result.total_pages,
        "list_items complete"
    );
    Ok(result)
}

/// Gets a single item with resolved category and supplier names.
pub async fn get_item(db: &DbState, id: &str) -> ApiResult<ItemView> {
    debug!(id = %id, "get_item command");
    Ok(db.inner().items().get(id).await?)
}

pub async fn create_item(
    db: &DbState,
    submit: &SubmitGuard,
    draft: ItemDraft,
) -> ApiResult<Saved<Item>> {
    let _submission = submit.begin()?;
    debug!(sku = ?draft.sku, "create_item command");

    let item = db.inner().items().create(draft).await?;
    Ok(Saved::new(item, Route::NewItem))
}

pub async fn update_item(
    db: &DbState,
    submit: &SubmitGuard,
    id: &str,
    draft: ItemDraft,
) -> ApiResult<Saved<Item>> {
    let _submission = submit.begin()?;
    debug!(id = %id, "update_item command");

    let item = db.inner().items().update(id, draft).await?;
    Ok(Saved::new(item, Route::EditItem(id.to_string())))
}

/// Removes an item. Its transactions stay in the history.
pub async fn delete_item(db: &DbState, id: &str) -> ApiResult<Item> {
    debug!(id = %id, "delete_item command");
    Ok(db.inner().items().delete(id).await?)
}
