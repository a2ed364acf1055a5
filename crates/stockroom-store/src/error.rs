//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (validation, stock rules)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds lookups and uniqueness                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (dashboard app) ← serialized for the screens                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::{CoreError, FieldError, ValidationErrors};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Lookup by id failed.
    ///
    /// ## When This Occurs
    /// - The id was never issued
    /// - The record was deleted
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Registration with an email that already has an account.
    #[error("User already exists: {email}")]
    DuplicateUser { email: String },

    /// A domain rule rejected the change.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// A uniqueness conflict reported against a single form field, so the
    /// screen can show it inline like any other validation error.
    pub fn duplicate_field(field: &str, label: &str, value: &str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, FieldError::duplicate(label, value));
        StoreError::Core(CoreError::Validation(errors))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
