//! # stockroom-store: In-Memory Dataset for Stockroom
//!
//! The process-local "database" behind the dashboard. Collections live in
//! memory, start from mock seed data, and every access waits out an
//! artificial latency standing in for a network round trip.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Dashboard command (list_items)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockroom-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │ Repositories  │    │    Seed      │   │   │
//! │  │   │ (database.rs) │    │ (repository/) │    │  (seed.rs)   │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ Arc<RwLock<   │◄───│ ItemRepo      │    │ categories   │   │   │
//! │  │   │   Dataset>>   │    │ CategoryRepo  │    │ suppliers    │   │   │
//! │  │   │ latency       │    │ ...           │    │ items, users │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_store::{Database, StoreConfig};
//!
//! let db = Database::new(StoreConfig::new());
//!
//! // Search the item list (page 1)
//! let page = db.items().search("mouse", 1).await?;
//!
//! // Categories with live item counts
//! let categories = db.categories().list("").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod database;
pub mod error;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use database::{Database, Dataset, StoreConfig, UserRecord, DEFAULT_LATENCY};
pub use error::{StoreError, StoreResult};

pub use repository::category::CategoryRepository;
pub use repository::item::{ImportOutcome, ItemRepository, RowRejection};
pub use repository::supplier::SupplierRepository;
pub use repository::transaction::{NewTransaction, TransactionRepository};
pub use repository::user::UserRepository;
