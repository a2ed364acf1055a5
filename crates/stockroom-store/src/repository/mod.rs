//! # Repository Module
//!
//! One repository per collection. Each holds a [`Database`] clone and runs
//! every call under a single lock acquisition.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Dashboard command                                                      │
//! │       │                                                                 │
//! │       │  db.items().search("mouse", 1)                                  │
//! │       ▼                                                                 │
//! │  ItemRepository                                                         │
//! │  ├── search(&self, query, page)                                         │
//! │  ├── get(&self, id)                                                     │
//! │  ├── create(&self, draft)                                               │
//! │  ├── update(&self, id, draft)                                           │
//! │  └── delete(&self, id)                                                  │
//! │       │                                                                 │
//! │       │  latency, then lock                                             │
//! │       ▼                                                                 │
//! │  Arc<RwLock<Dataset>>                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations return the changed record so callers never re-fetch.
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - Item CRUD, search, import
//! - [`CategoryRepository`](category::CategoryRepository) - Categories with item counts
//! - [`SupplierRepository`](supplier::SupplierRepository) - Suppliers with item counts
//! - [`TransactionRepository`](transaction::TransactionRepository) - Stock movements
//! - [`UserRepository`](user::UserRepository) - Accounts and credentials
//!
//! [`Database`]: crate::Database

pub mod category;
pub mod item;
pub mod supplier;
pub mod transaction;
pub mod user;
