//! # Views
//!
//! Read models handed to the screens. Every view is rebuilt from the live
//! collections on each read, so derived values (`isLowStock`, `itemCount`)
//! are never stale.
//!
//! ```text
//! Item ──┐
//!        ├──► CatalogIndex::resolve ──► ItemView { item, isLowStock,
//! Category, Supplier ──┘                            categoryName, supplierName }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::stock::{self, StockStatus};
use crate::types::{Category, Item, Supplier, Transaction};

// =============================================================================
// Catalog Index
// =============================================================================

/// Id lookups over the category and supplier collections.
pub struct CatalogIndex<'a> {
    categories: HashMap<&'a str, &'a Category>,
    suppliers: HashMap<&'a str, &'a Supplier>,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(categories: &'a [Category], suppliers: &'a [Supplier]) -> Self {
        CatalogIndex {
            categories: categories.iter().map(|c| (c.id.as_str(), c)).collect(),
            suppliers: suppliers.iter().map(|s| (s.id.as_str(), s)).collect(),
        }
    }

    pub fn category(&self, id: Option<&str>) -> Option<&'a Category> {
        id.and_then(|id| self.categories.get(id).copied())
    }

    pub fn supplier(&self, id: Option<&str>) -> Option<&'a Supplier> {
        id.and_then(|id| self.suppliers.get(id).copied())
    }

    /// Case-insensitive lookup used when importing by category name.
    pub fn category_by_name(&self, name: &str) -> Option<&'a Category> {
        let wanted = name.trim().to_lowercase();
        self.categories
            .values()
            .find(|c| c.name.trim().to_lowercase() == wanted)
            .copied()
    }

    pub fn resolve(&self, item: &Item) -> ItemView {
        ItemView::new(item.clone(), self)
    }

    pub fn resolve_all(&self, items: &[Item]) -> Vec<ItemView> {
        items.iter().map(|item| self.resolve(item)).collect()
    }
}

// =============================================================================
// Item View
// =============================================================================

/// An item with its derived stock status and resolved references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    #[serde(flatten)]
    pub item: Item,
    pub is_low_stock: bool,
    pub status: StockStatus,
    pub category_name: Option<String>,
    pub supplier_name: Option<String>,
    pub profit_margin: f64,
}

impl ItemView {
    pub fn new(item: Item, index: &CatalogIndex<'_>) -> Self {
        let category_name = index
            .category(item.category_id.as_deref())
            .map(|c| c.name.clone());
        let supplier_name = index
            .supplier(item.supplier_id.as_deref())
            .map(|s| s.name.clone());

        ItemView {
            is_low_stock: stock::is_low_stock(item.quantity, item.reorder_level),
            status: StockStatus::of(item.quantity, item.reorder_level),
            profit_margin: item.profit_margin(),
            category_name,
            supplier_name,
            item,
        }
    }
}

// =============================================================================
// Category / Supplier Views
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: Category,
    /// Items currently referencing this category.
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SupplierView {
    #[serde(flatten)]
    pub supplier: Supplier,
    pub item_count: usize,
}

fn count_references<'a>(ids: impl Iterator<Item = Option<&'a str>>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for id in ids.flatten() {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Categories in their stored order with live item counts.
pub fn category_views(categories: &[Category], items: &[Item]) -> Vec<CategoryView> {
    let counts = count_references(items.iter().map(|i| i.category_id.as_deref()));
    categories
        .iter()
        .map(|c| CategoryView {
            item_count: counts.get(c.id.as_str()).copied().unwrap_or(0),
            category: c.clone(),
        })
        .collect()
}

/// Suppliers in their stored order with live item counts.
pub fn supplier_views(suppliers: &[Supplier], items: &[Item]) -> Vec<SupplierView> {
    let counts = count_references(items.iter().map(|i| i.supplier_id.as_deref()));
    suppliers
        .iter()
        .map(|s| SupplierView {
            item_count: counts.get(s.id.as_str()).copied().unwrap_or(0),
            supplier: s.clone(),
        })
        .collect()
}

// =============================================================================
// Transaction View
// =============================================================================

/// Name and SKU of the item a transaction moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionItem {
    pub name: String,
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Transaction,
    /// `None` once the item has been deleted.
    pub item: Option<TransactionItem>,
}

/// Attaches item name and SKU to each transaction, keeping order.
pub fn transaction_views(transactions: &[Transaction], items: &[Item]) -> Vec<TransactionView> {
    let by_id: HashMap<&str, &Item> = items.iter().map(|i| (i.id.as_str(), i)).collect();
    transactions
        .iter()
        .map(|tx| TransactionView {
            item: by_id.get(tx.item_id.as_str()).map(|i| TransactionItem {
                name: i.name.clone(),
                sku: i.sku.clone(),
            }),
            transaction: tx.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Utc;

    fn item(id: &str, qty: i64, category: Option<&str>, supplier: Option<&str>) -> Item {
        Item {
            id: id.into(),
            sku: format!("SKU{}", id),
            name: format!("Item {}", id),
            description: None,
            quantity: qty,
            reorder_level: 10,
            sell_price: Money::from_cents(1000),
            cost_price: None,
            category_id: category.map(Into::into),
            supplier_id: supplier.map(Into::into),
            location: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "1".into(),
                name: "Electronics".into(),
                description: None,
            },
            Category {
                id: "2".into(),
                name: "Furniture".into(),
                description: None,
            },
        ]
    }

    #[test]
    fn test_resolve_names_and_status() {
        let categories = categories();
        let suppliers = vec![Supplier {
            id: "s1".into(),
            name: "Tech Supplies Co.".into(),
            contact_person: None,
            email: None,
            phone: None,
            address: None,
        }];
        let index = CatalogIndex::new(&categories, &suppliers);

        let view = index.resolve(&item("1", 3, Some("1"), Some("s1")));
        assert!(view.is_low_stock);
        assert_eq!(view.status, StockStatus::LowStock);
        assert_eq!(view.category_name.as_deref(), Some("Electronics"));
        assert_eq!(view.supplier_name.as_deref(), Some("Tech Supplies Co."));

        let orphan = index.resolve(&item("2", 30, Some("missing"), None));
        assert!(!orphan.is_low_stock);
        assert_eq!(orphan.category_name, None);
    }

    #[test]
    fn test_view_serializes_flat() {
        let categories = categories();
        let index = CatalogIndex::new(&categories, &[]);
        let json = serde_json::to_value(index.resolve(&item("1", 3, Some("2"), None))).unwrap();
        assert_eq!(json["sku"], "SKU1");
        assert_eq!(json["isLowStock"], true);
        assert_eq!(json["categoryName"], "Furniture");
    }

    #[test]
    fn test_item_counts_follow_items() {
        let items = vec![
            item("1", 5, Some("1"), None),
            item("2", 5, Some("1"), None),
            item("3", 5, None, None),
        ];
        let views = category_views(&categories(), &items);
        assert_eq!(views[0].item_count, 2);
        assert_eq!(views[1].item_count, 0);
    }

    #[test]
    fn test_transaction_views_name_the_item() {
        use crate::types::TransactionKind;

        let tx = |id: &str, item_id: &str| Transaction {
            id: id.into(),
            item_id: item_id.into(),
            kind: TransactionKind::In,
            change: 5,
            reason: None,
            performed_by: None,
            created_at: Utc::now(),
        };
        let views = transaction_views(
            &[tx("t1", "1"), tx("t2", "gone")],
            &[item("1", 5, None, None)],
        );

        assert_eq!(views[0].item.as_ref().map(|i| i.sku.as_str()), Some("SKU1"));
        assert_eq!(views[1].item, None);

        let json = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(json["type"], "IN");
        assert_eq!(json["item"]["name"], "Item 1");
    }

    #[test]
    fn test_category_by_name_ignores_case() {
        let categories = categories();
        let index = CatalogIndex::new(&categories, &[]);
        assert_eq!(
            index.category_by_name(" furniture ").map(|c| c.id.as_str()),
            Some("2")
        );
        assert!(index.category_by_name("Toys").is_none());
    }
}
