//! # Dashboard Commands
//!
//! One async function per screen action. Each takes only the state it
//! needs and returns `Result<T, ApiError>`; the caller (the CLI today, a
//! web or desktop shell later) serializes `T` or the error as JSON.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (exports, Saved<T>)
//! ├── item.rs         ◄─── Item list, detail, create, edit, delete
//! ├── category.rs     ◄─── Category list and inline forms
//! ├── supplier.rs     ◄─── Supplier list and inline forms
//! ├── transaction.rs  ◄─── Transaction history, stock movements
//! ├── report.rs       ◄─── Dashboard, reports, CSV export/import
//! └── session.rs      ◄─── Login, register, logout, theme
//! ```
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_item(db, submit, draft)                                         │
//! │       │                                                                 │
//! │       ├── submit.begin()        BUSY if a submission is in flight       │
//! │       ├── items().create(draft) VALIDATION_ERROR with fieldErrors       │
//! │       └── Saved { record, redirect: "/dashboard/items" }                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::navigation::Route;

pub mod category;
pub mod item;
pub mod report;
pub mod session;
pub mod supplier;
pub mod transaction;

/// A saved record and the screen to show next.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Saved<T> {
    pub record: T,
    pub redirect: String,
}

impl<T> Saved<T> {
    pub(crate) fn new(record: T, from: Route) -> Self {
        Saved {
            record,
            redirect: from.after_save().path(),
        }
    }
}

/// Result of a category or supplier delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub id: String,
    /// Items whose reference to the deleted record was cleared.
    pub detached_items: usize,
}
