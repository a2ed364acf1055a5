//! # Database State
//!
//! Wraps the in-memory `Database` for use in commands.
//!
//! ## Thread Safety
//! `Database` is a cheap handle over `Arc<RwLock<Dataset>>`, so commands
//! can share it freely. Every repository call takes the lock itself.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! async fn list_items(db: &DbState, query: &str, page: usize)
//!     -> ApiResult<Page<ItemView>>
//! {
//!     Ok(db.inner().items().search(query, page).await?)
//! }
//! ```

use stockroom_store::Database;

#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    pub fn inner(&self) -> &Database {
        &self.db
    }
}
