//! # Mock Seed Data
//!
//! The initial dataset the dashboard starts with.
//!
//! ```text
//! Categories (4)          Suppliers (3)            Items (8)
//! ────────────────        ──────────────────       ──────────────────────────
//! 1 Electronics           1 Tech Supplies Co.      SKU001 Laptop        15/5
//! 2 Furniture             2 Office Depot           SKU002 Office Chair   8/10 ⚠
//! 3 Office Supplies       3 Furniture World        SKU003 Wireless Mouse 3/10 ⚠
//! 4 Computer Accessories                           ...   SKU007 Stapler  6/8  ⚠
//! ```
//!
//! Transactions are dated relative to "now" so the dashboard's recent
//! movement list is never empty. Demo users are returned with plain
//! passwords; the app hashes them before inserting.

use chrono::{DateTime, Duration, Utc};
use stockroom_core::{
    Category, Item, Money, Role, Supplier, Transaction, TransactionKind,
};

use crate::database::Dataset;

/// A demo account. `password` is plain text and must be hashed before it
/// is stored.
#[derive(Debug, Clone, Copy)]
pub struct SeedUser {
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
}

pub const DEMO_USERS: [SeedUser; 3] = [
    SeedUser {
        name: "Admin User",
        email: "admin@example.com",
        password: "admin123",
        role: Role::Admin,
    },
    SeedUser {
        name: "Manager User",
        email: "manager@example.com",
        password: "manager123",
        role: Role::Manager,
    },
    SeedUser {
        name: "Viewer User",
        email: "viewer@example.com",
        password: "viewer123",
        role: Role::Viewer,
    },
];

/// Categories, suppliers, items and transactions. No users.
pub fn catalog() -> Dataset {
    catalog_at(Utc::now())
}

/// Same as [`catalog`] with an explicit clock.
pub fn catalog_at(now: DateTime<Utc>) -> Dataset {
    Dataset {
        categories: categories(),
        suppliers: suppliers(),
        items: items(now),
        transactions: transactions(now),
        users: Vec::new(),
    }
}

fn category(id: &str, name: &str, description: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
    }
}

fn categories() -> Vec<Category> {
    vec![
        category("1", "Electronics", "Electronic devices and gadgets"),
        category("2", "Furniture", "Office and home furniture"),
        category("3", "Office Supplies", "Stationery and consumables"),
        category("4", "Computer Accessories", "Peripherals and cables"),
    ]
}

fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: "1".into(),
            name: "Tech Supplies Co.".into(),
            contact_person: Some("John Smith".into()),
            email: Some("john@techsupplies.com".into()),
            phone: Some("+1-555-0101".into()),
            address: Some("123 Tech Street, San Francisco, CA".into()),
        },
        Supplier {
            id: "2".into(),
            name: "Office Depot".into(),
            contact_person: Some("Jane Doe".into()),
            email: Some("jane@officedepot.com".into()),
            phone: Some("+1-555-0102".into()),
            address: Some("456 Office Ave, New York, NY".into()),
        },
        Supplier {
            id: "3".into(),
            name: "Furniture World".into(),
            contact_person: Some("Bob Johnson".into()),
            email: Some("bob@furnitureworld.com".into()),
            phone: None,
            address: Some("789 Furniture Blvd, Chicago, IL".into()),
        },
    ]
}

struct ItemSeed {
    id: &'static str,
    sku: &'static str,
    name: &'static str,
    description: &'static str,
    quantity: i64,
    reorder_level: i64,
    sell: i64,
    cost: i64,
    category: &'static str,
    supplier: &'static str,
    location: &'static str,
}

const ITEMS: [ItemSeed; 8] = [
    ItemSeed {
        id: "1",
        sku: "SKU001",
        name: "Laptop",
        description: "15-inch business laptop",
        quantity: 15,
        reorder_level: 5,
        sell: 99999,
        cost: 75000,
        category: "1",
        supplier: "1",
        location: "Warehouse A - Shelf 1",
    },
    ItemSeed {
        id: "2",
        sku: "SKU002",
        name: "Office Chair",
        description: "Ergonomic mesh office chair",
        quantity: 8,
        reorder_level: 10,
        sell: 24999,
        cost: 15000,
        category: "2",
        supplier: "3",
        location: "Warehouse B - Section 2",
    },
    ItemSeed {
        id: "3",
        sku: "SKU003",
        name: "Wireless Mouse",
        description: "2.4GHz wireless optical mouse",
        quantity: 3,
        reorder_level: 10,
        sell: 2999,
        cost: 1500,
        category: "4",
        supplier: "1",
        location: "Warehouse A - Shelf 3",
    },
    ItemSeed {
        id: "4",
        sku: "SKU004",
        name: "Standing Desk",
        description: "Height-adjustable standing desk",
        quantity: 12,
        reorder_level: 4,
        sell: 49999,
        cost: 32000,
        category: "2",
        supplier: "3",
        location: "Warehouse B - Section 1",
    },
    ItemSeed {
        id: "5",
        sku: "SKU005",
        name: "Printer Paper (500 sheets)",
        description: "A4 80gsm copy paper",
        quantity: 120,
        reorder_level: 50,
        sell: 899,
        cost: 450,
        category: "3",
        supplier: "2",
        location: "Warehouse C - Rack 4",
    },
    ItemSeed {
        id: "6",
        sku: "SKU006",
        name: "USB-C Hub",
        description: "7-in-1 USB-C adapter",
        quantity: 25,
        reorder_level: 10,
        sell: 4999,
        cost: 2800,
        category: "4",
        supplier: "1",
        location: "Warehouse A - Shelf 3",
    },
    ItemSeed {
        id: "7",
        sku: "SKU007",
        name: "Stapler",
        description: "Heavy-duty desktop stapler",
        quantity: 6,
        reorder_level: 8,
        sell: 1299,
        cost: 600,
        category: "3",
        supplier: "2",
        location: "Warehouse C - Rack 1",
    },
    ItemSeed {
        id: "8",
        sku: "SKU008",
        name: "27\" Monitor",
        description: "27-inch QHD IPS monitor",
        quantity: 9,
        reorder_level: 5,
        sell: 32999,
        cost: 24000,
        category: "1",
        supplier: "1",
        location: "Warehouse A - Shelf 2",
    },
];

fn items(now: DateTime<Utc>) -> Vec<Item> {
    ITEMS
        .iter()
        .enumerate()
        .map(|(index, s)| {
            let created = now - Duration::days(30 - index as i64);
            Item {
                id: s.id.to_string(),
                sku: s.sku.to_string(),
                name: s.name.to_string(),
                description: Some(s.description.to_string()),
                quantity: s.quantity,
                reorder_level: s.reorder_level,
                sell_price: Money::from_cents(s.sell),
                cost_price: Some(Money::from_cents(s.cost)),
                category_id: Some(s.category.to_string()),
                supplier_id: Some(s.supplier.to_string()),
                location: Some(s.location.to_string()),
                created_at: created,
                updated_at: created,
            }
        })
        .collect()
}

fn transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    let tx = |id: &str, item: &str, kind, change, reason: &str, hours_ago| Transaction {
        id: id.to_string(),
        item_id: item.to_string(),
        kind,
        change,
        reason: Some(reason.to_string()),
        performed_by: Some("Admin User".to_string()),
        created_at: now - Duration::hours(hours_ago),
    };

    vec![
        tx("1", "1", TransactionKind::In, 20, "Restock from supplier", 6 * 24),
        tx("2", "1", TransactionKind::Out, -5, "Sold to customer", 5 * 24),
        tx("3", "2", TransactionKind::Out, -2, "Internal transfer", 4 * 24),
        tx("4", "3", TransactionKind::Adjustment, -2, "Damaged units", 3 * 24),
        tx("5", "5", TransactionKind::In, 100, "Bulk order received", 2 * 24),
        tx("6", "7", TransactionKind::Out, -4, "Sold to customer", 24),
        tx("7", "6", TransactionKind::In, 15, "Restock from supplier", 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::validation::validate_item;
    use stockroom_core::ItemDraft;

    #[test]
    fn test_seed_items_pass_validation() {
        for item in catalog().items {
            let errors = validate_item(&ItemDraft::from(&item));
            assert!(errors.is_empty(), "{}: {}", item.sku, errors);
        }
    }

    #[test]
    fn test_seed_references_resolve() {
        let data = catalog();
        for item in &data.items {
            assert!(data
                .categories
                .iter()
                .any(|c| Some(&c.id) == item.category_id.as_ref()));
            assert!(data
                .suppliers
                .iter()
                .any(|s| Some(&s.id) == item.supplier_id.as_ref()));
        }
        for tx in &data.transactions {
            assert!(data.items.iter().any(|i| i.id == tx.item_id));
        }
    }

    #[test]
    fn test_three_items_start_low() {
        let low: Vec<_> = catalog()
            .items
            .iter()
            .filter(|i| i.is_low_stock())
            .map(|i| i.sku.clone())
            .collect();
        assert_eq!(low, vec!["SKU002", "SKU003", "SKU007"]);
    }
}
