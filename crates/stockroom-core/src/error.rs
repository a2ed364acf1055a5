//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                      │
//! │  ├── ErrorKind         - Taxonomy shared by every layer                 │
//! │  ├── FieldError        - One violated rule on one form field            │
//! │  ├── ValidationErrors  - field name → FieldError (inline form errors)   │
//! │  └── CoreError         - General domain errors                          │
//! │                                                                         │
//! │  stockroom-store errors (separate crate)                                │
//! │  └── StoreError        - Lookup / uniqueness failures                   │
//! │                                                                         │
//! │  Dashboard API errors (in app)                                          │
//! │  └── ApiError          - What the screens see (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationErrors → CoreError → StoreError → ApiError → Screen    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Validation never stops at the first failure: every field is checked
//!    and reported independently
//! 3. Errors are enum variants, never String
//! 4. Each field error carries a user-facing message for inline display

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Error Kind
// =============================================================================

/// Classification of every failure the dashboard can surface.
///
/// ## Where Each Kind Comes From
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Required / TooShort / Invalid / Inconsistent / Duplicate              │
/// │      └── validation rules, shown inline next to the form control       │
/// │                                                                         │
/// │  NotFound                                                               │
/// │      └── lookup by id failed, rendered as a "not found" screen          │
/// │                                                                         │
/// │  DuplicateUser / AuthFailed                                             │
/// │      └── registration and login                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Mandatory field is missing or blank.
    Required,
    /// Value present but shorter than the minimum length.
    TooShort,
    /// Value present but fails a range or format check.
    Invalid,
    /// Individually valid values that break a cross-field rule.
    Inconsistent,
    /// Value must be unique within its collection.
    Duplicate,
    /// Lookup by identifier failed.
    NotFound,
    /// Registration with an email that is already taken.
    DuplicateUser,
    /// Login credentials did not match.
    AuthFailed,
}

// =============================================================================
// Field Error
// =============================================================================

/// A single violated rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[error("{message}")]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        FieldError {
            kind,
            message: message.into(),
        }
    }

    /// `"{label} is required"`
    pub fn required(label: &str) -> Self {
        FieldError::new(ErrorKind::Required, format!("{} is required", label))
    }

    /// `"{label} must be at least {min} characters"`
    pub fn too_short(label: &str, min: usize) -> Self {
        FieldError::new(
            ErrorKind::TooShort,
            format!("{} must be at least {} characters", label, min),
        )
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        FieldError::new(ErrorKind::Invalid, message)
    }

    pub fn inconsistent(message: impl Into<String>) -> Self {
        FieldError::new(ErrorKind::Inconsistent, message)
    }

    /// `"{label} '{value}' already exists"`
    pub fn duplicate(label: &str, value: &str) -> Self {
        FieldError::new(
            ErrorKind::Duplicate,
            format!("{} '{}' already exists", label, value),
        )
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Field name → error, for every violated rule on a form.
///
/// An empty map means the record is acceptable. Keys are the camelCase
/// field names the screens bind their inputs to (`sku`, `sellPrice`, ...).
///
/// ## Inline Display
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │  SKU        [ AB          ]                 │
/// │             ⚠ SKU must be at least 3 chars  │  ← errors.get("sku")
/// │  Name       [ Laptop      ]                 │
/// │  Cost price [ 1200.00     ]                 │
/// │             ⚠ Cost price cannot exceed ...  │  ← errors.get("costPrice")
/// └─────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        ValidationErrors(BTreeMap::new())
    }

    /// Records an error for `field`.
    ///
    /// The first error recorded for a field wins, so rules are checked in
    /// priority order (e.g. `Required` before `TooShort`).
    pub fn add(&mut self, field: &str, error: FieldError) {
        self.0.entry(field.to_string()).or_insert(error);
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// Returns the kind of error recorded for `field`, if any.
    pub fn kind_of(&self, field: &str) -> Option<ErrorKind> {
        self.0.get(field).map(|e| e.kind)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merges another set of errors, keeping existing entries.
    pub fn extend(&mut self, other: ValidationErrors) {
        for (field, error) in other.0 {
            self.0.entry(field).or_insert(error);
        }
    }

    /// `Ok(())` when empty, otherwise `CoreError::Validation(self)`.
    pub fn into_result(self) -> CoreResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// One or more form fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A stock change would drive the quantity below zero.
    ///
    /// ## When This Occurs
    /// ```text
    /// Record OUT (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "SKU003", available: 3, change: -5 }
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, change {change}")]
    InsufficientStock {
        sku: String,
        available: i64,
        change: i64,
    },

    /// The amount given for a stock movement does not fit its type.
    #[error("Invalid stock change: {reason}")]
    InvalidStockChange { reason: String },

    /// A stock value or total left the range of `Money`.
    #[error("Amount out of range: {0}")]
    AmountOverflow(String),

    /// A file was selected for import with an extension we do not accept.
    #[error("Unsupported import file '{0}': expected .csv, .xls or .xlsx")]
    UnsupportedImportFormat(String),

    /// CSV text could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CoreError {
    /// Returns the validation errors if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            CoreError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            sku: "SKU003".to_string(),
            available: 3,
            change: -5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for SKU003: available 3, change -5"
        );
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(FieldError::required("SKU").to_string(), "SKU is required");
        assert_eq!(
            FieldError::too_short("SKU", 3).to_string(),
            "SKU must be at least 3 characters"
        );
        assert_eq!(
            FieldError::duplicate("SKU", "SKU001").to_string(),
            "SKU 'SKU001' already exists"
        );
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("sku", FieldError::required("SKU"));
        errors.add("sku", FieldError::too_short("SKU", 3));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.kind_of("sku"), Some(ErrorKind::Required));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("name", FieldError::required("Name"));
        let err = errors.into_result().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(
            err.validation_errors().and_then(|e| e.kind_of("name")),
            Some(ErrorKind::Required)
        );
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("sellPrice", FieldError::invalid("Selling price must be a positive number"));

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["sellPrice"]["kind"], "INVALID");
        assert_eq!(
            json["sellPrice"]["message"],
            "Selling price must be a positive number"
        );
    }
}
