//! # API Error Type
//!
//! Unified error type for dashboard commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Screen                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  submit item form                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Lookup failed? ──── StoreError::NotFound ─────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule broken? ────── CoreError::Validation ───── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  code = VALIDATION_ERROR  → fieldErrors shown inline on the form        │
//! │  code = NOT_FOUND         → "not found" screen state                    │
//! │  anything else            → blocking alert with `message`               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockroom_core::{CoreError, ValidationErrors};
use stockroom_store::StoreError;

use crate::state::{ConfigError, SessionError};

/// API error returned from dashboard commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Validation failed: sku: SKU is required",
///   "fieldErrors": { "sku": { "kind": "REQUIRED", "message": "SKU is required" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field errors, present only for `VALIDATION_ERROR`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<ValidationErrors>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record lookup by id failed
    NotFound,

    /// One or more form fields failed validation
    ValidationError,

    /// Email and password did not match an account
    AuthFailed,

    /// Registration with an email that already has an account
    DuplicateUser,

    /// Screen requires a signed-in user
    Unauthenticated,

    /// Another submission is still in flight
    Busy,

    /// Stock movement would take the quantity below zero
    InsufficientStock,

    /// Import file rejected before any row was read
    ImportError,

    /// Session, export or import file could not be read or written
    IoError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field_errors: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error carrying the per-field map.
    pub fn validation(errors: ValidationErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: format!("Validation failed: {}", errors),
            field_errors: Some(errors),
        }
    }

    pub fn auth_failed() -> Self {
        ApiError::new(ErrorCode::AuthFailed, "Invalid email or password")
    }

    pub fn unauthenticated() -> Self {
        ApiError::new(ErrorCode::Unauthenticated, "Please sign in to continue")
    }

    pub fn busy() -> Self {
        ApiError::new(
            ErrorCode::Busy,
            "A submission is already in progress, please wait",
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Result type for dashboard commands.
pub type ApiResult<T> = Result<T, ApiError>;

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::DuplicateUser { email } => ApiError::new(
                ErrorCode::DuplicateUser,
                format!("User already exists: {}", email),
            ),
            StoreError::Core(e) => ApiError::from(e),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => ApiError::validation(errors),
            e @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, e.to_string())
            }
            e @ CoreError::InvalidStockChange { .. } => {
                ApiError::new(ErrorCode::ValidationError, e.to_string())
            }
            e @ CoreError::AmountOverflow(_) => {
                tracing::error!("Stock value overflow: {}", e);
                ApiError::internal(e.to_string())
            }
            e @ CoreError::UnsupportedImportFormat(_) => {
                ApiError::new(ErrorCode::ImportError, e.to_string())
            }
            CoreError::Csv(e) => {
                tracing::error!("CSV processing failed: {}", e);
                ApiError::new(ErrorCode::ImportError, format!("Could not read CSV: {}", e))
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        tracing::error!("Session storage failed: {}", err);
        ApiError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("File operation failed: {}", err);
        ApiError::new(ErrorCode::IoError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{ErrorKind, FieldError};

    #[test]
    fn test_validation_error_carries_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("sku", FieldError::required("SKU"));
        let api = ApiError::from(StoreError::Core(CoreError::Validation(errors)));

        assert_eq!(api.code, ErrorCode::ValidationError);
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["fieldErrors"]["sku"]["kind"], "REQUIRED");
        assert_eq!(
            api.field_errors.unwrap().kind_of("sku"),
            Some(ErrorKind::Required)
        );
    }

    #[test]
    fn test_not_found_mapping() {
        let api = ApiError::from(StoreError::not_found("Item", "99"));
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "Item not found: 99");

        let json = serde_json::to_value(&api).unwrap();
        assert!(json.get("fieldErrors").is_none());
    }

    #[test]
    fn test_stock_errors() {
        let api = ApiError::from(CoreError::InsufficientStock {
            sku: "SKU003".into(),
            available: 3,
            change: -5,
        });
        assert_eq!(api.code, ErrorCode::InsufficientStock);

        let api = ApiError::from(StoreError::DuplicateUser {
            email: "admin@example.com".into(),
        });
        assert_eq!(api.code, ErrorCode::DuplicateUser);
    }
}
