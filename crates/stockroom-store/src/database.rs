//! # In-Memory Database
//!
//! The process-local dataset and its access handle.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      In-Memory Database                                 │
//! │                                                                         │
//! │  App Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new() ← latency, seed                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config) ← seeds the mock collections                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │        Arc<RwLock<Dataset>>             │                            │
//! │  │  categories │ suppliers │ items │ ...   │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       │ every repository call:                                          │
//! │       ▼                                                                 │
//! │  sleep(latency) ──► read() or write() ──► run to completion             │
//! │                                                                         │
//! │  Single writer: a mutation holds the write lock until it is done, so    │
//! │  no reader ever sees a half-applied change.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use stockroom_core::{Category, Item, Supplier, Transaction, User};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use crate::repository::category::CategoryRepository;
use crate::repository::item::ItemRepository;
use crate::repository::supplier::SupplierRepository;
use crate::repository::transaction::TransactionRepository;
use crate::repository::user::UserRepository;
use crate::seed;

/// Latency the dashboard simulates for every request.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use stockroom_store::StoreConfig;
///
/// let config = StoreConfig::new()
///     .latency(Duration::from_millis(50))
///     .seed(false);
/// assert!(!config.seed);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Delay awaited before every read and write.
    /// Default: 300ms
    pub latency: Duration,

    /// Whether to load the mock categories, suppliers, items and
    /// transactions on creation.
    /// Default: true
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            latency: DEFAULT_LATENCY,
            seed: true,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Seeded, no latency. For tests.
    pub fn instant() -> Self {
        StoreConfig {
            latency: Duration::ZERO,
            seed: true,
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// A user together with the stored password hash.
///
/// The hash stays inside the store; repositories hand out [`User`] only,
/// except for the credential lookup used by login.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// All collections, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub categories: Vec<Category>,
    pub suppliers: Vec<Supplier>,
    pub items: Vec<Item>,
    pub transactions: Vec<Transaction>,
    pub users: Vec<UserRecord>,
}

// =============================================================================
// Database
// =============================================================================

/// Shared handle to the dataset. Cloning is cheap and every clone sees the
/// same collections.
#[derive(Debug, Clone)]
pub struct Database {
    data: Arc<RwLock<Dataset>>,
    latency: Duration,
}

impl Database {
    /// Creates the store, seeding the mock data if configured.
    pub fn new(config: StoreConfig) -> Self {
        let dataset = if config.seed {
            seed::catalog()
        } else {
            Dataset::default()
        };

        info!(
            latency_ms = config.latency.as_millis() as u64,
            items = dataset.items.len(),
            categories = dataset.categories.len(),
            suppliers = dataset.suppliers.len(),
            "In-memory store initialized"
        );

        Self::with_dataset(dataset, config.latency)
    }

    /// Creates a store over an explicit dataset.
    pub fn with_dataset(dataset: Dataset, latency: Duration) -> Self {
        Database {
            data: Arc::new(RwLock::new(dataset)),
            latency,
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Waits out the latency, then takes the read lock.
    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Dataset> {
        self.simulate_latency().await;
        self.data.read().await
    }

    /// Waits out the latency, then takes the write lock.
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Dataset> {
        self.simulate_latency().await;
        debug!("Acquiring write lock");
        self.data.write().await
    }

    /// Copy of every collection, taken under one read lock.
    ///
    /// Used by screens that combine several collections (dashboard,
    /// reports, export) so they see one consistent state.
    pub async fn snapshot(&self) -> Dataset {
        self.read().await.clone()
    }

    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.clone())
    }

    pub fn suppliers(&self) -> SupplierRepository {
        SupplierRepository::new(self.clone())
    }

    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_store() {
        let db = Database::new(StoreConfig::instant());
        let data = db.snapshot().await;

        assert_eq!(data.categories.len(), 4);
        assert_eq!(data.suppliers.len(), 3);
        assert!(!data.items.is_empty());
        assert!(data.users.is_empty());
    }

    #[tokio::test]
    async fn test_unseeded_store_is_empty() {
        let db = Database::new(StoreConfig::instant().seed(false));
        let data = db.snapshot().await;
        assert!(data.items.is_empty());
        assert!(data.categories.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_collections() {
        let db = Database::new(StoreConfig::instant().seed(false));
        let other = db.clone();

        db.write().await.categories.push(Category {
            id: "1".into(),
            name: "Electronics".into(),
            description: None,
        });

        assert_eq!(other.snapshot().await.categories.len(), 1);
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new().latency(Duration::from_millis(5)).seed(false);
        assert_eq!(config.latency, Duration::from_millis(5));
        assert!(!config.seed);
        assert_eq!(StoreConfig::default().latency, DEFAULT_LATENCY);
    }
}
