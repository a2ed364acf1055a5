//! # Supplier Repository
//!
//! Same shape as the category repository: live `itemCount`, search by name
//! or contact person, and reference clearing on delete.

use stockroom_core::search;
use stockroom_core::view::supplier_views;
use stockroom_core::{new_id, Supplier, SupplierDraft, SupplierView};
use tracing::{debug, info};

use crate::database::Database;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct SupplierRepository {
    db: Database,
}

impl SupplierRepository {
    pub fn new(db: Database) -> Self {
        SupplierRepository { db }
    }

    pub async fn list(&self, query: &str) -> StoreResult<Vec<SupplierView>> {
        let data = self.db.read().await;
        let matched: Vec<Supplier> = search::filter(&data.suppliers, query)
            .into_iter()
            .cloned()
            .collect();
        debug!(query = %query, count = matched.len(), "Listing suppliers");
        Ok(supplier_views(&matched, &data.items))
    }

    pub async fn get(&self, id: &str) -> StoreResult<SupplierView> {
        let data = self.db.read().await;
        let supplier = data
            .suppliers
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Supplier", id))?;
        supplier_views(std::slice::from_ref(supplier), &data.items)
            .pop()
            .ok_or_else(|| StoreError::not_found("Supplier", id))
    }

    pub async fn create(&self, draft: SupplierDraft) -> StoreResult<Supplier> {
        let supplier = draft.into_supplier(new_id())?;
        let mut data = self.db.write().await;
        data.suppliers.push(supplier.clone());
        info!(id = %supplier.id, name = %supplier.name, "Supplier created");
        Ok(supplier)
    }

    pub async fn update(&self, id: &str, draft: SupplierDraft) -> StoreResult<Supplier> {
        let mut data = self.db.write().await;
        let position = data
            .suppliers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Supplier", id))?;

        let supplier = draft.into_supplier(id.to_string())?;
        data.suppliers[position] = supplier.clone();
        info!(id = %id, "Supplier updated");
        Ok(supplier)
    }

    /// Removes the supplier and returns how many items lost their supplier.
    pub async fn delete(&self, id: &str) -> StoreResult<usize> {
        let mut data = self.db.write().await;
        let position = data
            .suppliers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Supplier", id))?;
        data.suppliers.remove(position);

        let mut cleared = 0;
        for item in data
            .items
            .iter_mut()
            .filter(|i| i.supplier_id.as_deref() == Some(id))
        {
            item.supplier_id = None;
            cleared += 1;
        }

        info!(id = %id, cleared_items = cleared, "Supplier deleted");
        Ok(cleared)
    }
}
