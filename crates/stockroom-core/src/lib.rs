//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate holds the inventory rules as pure functions with zero I/O
//! dependencies. The store and the dashboard app both build on it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard screens / CLI                      │   │
//! │  │    Items ──► Categories ──► Suppliers ──► Transactions ──► ...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Dashboard commands                           │   │
//! │  │    list_items, create_item, record_transaction, report, ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │  │validation│ │  stock   │ │  search  │ │  report  │ │interch.│ │   │
//! │  │  │  rules   │ │ low-stock│ │ paginate │ │aggregates│ │  CSV   │ │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO TIMERS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-store (in-memory dataset)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Category, Supplier, Transaction, User)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Error taxonomy and per-field validation errors
//! - [`validation`] - Form rules for items, suppliers and categories
//! - [`stock`] - Low-stock rule, profit margin, stock changes
//! - [`view`] - Read models with resolved names and derived status
//! - [`search`] - Text filter and 1-based pagination
//! - [`report`] - Dashboard and report aggregates
//! - [`interchange`] - CSV export and import
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::money::Money;
//! use stockroom_core::stock::is_low_stock;
//!
//! let price: Money = "29.99".parse().unwrap();
//! assert_eq!(price.multiply_quantity(3).unwrap().to_decimal_string(), "89.97");
//!
//! // Wireless mouse: 3 on hand, reorder at 10
//! assert!(is_low_stock(3, 10));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod interchange;
pub mod money;
pub mod report;
pub mod search;
pub mod stock;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, FieldError, ValidationErrors};
pub use money::Money;
pub use search::{Page, PAGE_SIZE};
pub use stock::{is_low_stock, StockStatus};
pub use types::*;
pub use view::{CatalogIndex, CategoryView, ItemView, SupplierView, TransactionView};
