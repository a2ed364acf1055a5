//! # Validation Module
//!
//! Form validation rules for items, suppliers, categories and sign-up.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (screen)                                                 │
//! │  └── Clears a field's error as soon as the user edits it               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (on submit)                                       │
//! │  ├── Required fields, lengths, numeric bounds                          │
//! │  └── Cross-field rules (cost price ≤ sell price)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                         │
//! │  └── Uniqueness against the live collection (SKU)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure and returns a [`ValidationErrors`] map with
//! one entry per failing field. Rules for one field never stop the others
//! from being checked, so the form can show every problem at once.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::error::ErrorKind;
//! use stockroom_core::types::ItemDraft;
//! use stockroom_core::validation::validate_item;
//!
//! let errors = validate_item(&ItemDraft {
//!     sku: Some("AB".into()),
//!     ..Default::default()
//! });
//! assert_eq!(errors.kind_of("sku"), Some(ErrorKind::TooShort));
//! assert_eq!(errors.kind_of("name"), Some(ErrorKind::Required));
//! ```

use crate::error::{FieldError, ValidationErrors};
use crate::money::Money;
use crate::types::{Category, CategoryDraft, ItemDraft, SupplierDraft};

/// Minimum SKU length in characters.
pub const MIN_SKU_LENGTH: usize = 3;

/// Largest quantity or reorder level an item may hold.
pub const MAX_QUANTITY: i64 = 1_000_000_000;

/// Largest selling or cost price, 10,000,000.00.
///
/// `MAX_QUANTITY × MAX_PRICE` fits in `i64` cents with room to spare.
pub const MAX_PRICE: Money = Money::from_cents(1_000_000_000);

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn check_non_negative_count(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<i64>,
) {
    match value {
        Some(v) if v > MAX_QUANTITY => errors.add(
            field,
            FieldError::invalid(format!("{} must be at most {}", label, MAX_QUANTITY)),
        ),
        Some(v) if v >= 0 => {}
        _ => errors.add(
            field,
            FieldError::invalid(format!("{} must be a positive number", label)),
        ),
    }
}

fn price_too_large(price: Money) -> bool {
    price > MAX_PRICE
}

// =============================================================================
// Item Rules
// =============================================================================

/// Validates an item form.
///
/// ## Rules
/// | field          | rule                                   | kind           |
/// |----------------|----------------------------------------|----------------|
/// | `sku`          | not blank                              | `Required`     |
/// | `sku`          | at least 3 characters                  | `TooShort`     |
/// | `name`         | not blank                              | `Required`     |
/// | `quantity`     | present, 0 ..= `MAX_QUANTITY`          | `Invalid`      |
/// | `reorderLevel` | present, 0 ..= `MAX_QUANTITY`          | `Invalid`      |
/// | `sellPrice`    | present, 0 ..= `MAX_PRICE`             | `Invalid`      |
/// | `costPrice`    | 0 ..= `MAX_PRICE` when present         | `Invalid`      |
/// | `costPrice`    | ≤ sell price when both present         | `Inconsistent` |
pub fn validate_item(draft: &ItemDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match draft.sku.as_deref().map(str::trim) {
        None | Some("") => errors.add("sku", FieldError::required("SKU")),
        Some(sku) if sku.chars().count() < MIN_SKU_LENGTH => {
            errors.add("sku", FieldError::too_short("SKU", MIN_SKU_LENGTH))
        }
        Some(_) => {}
    }

    if is_blank(draft.name.as_deref()) {
        errors.add("name", FieldError::required("Name"));
    }

    check_non_negative_count(&mut errors, "quantity", "Quantity", draft.quantity);
    check_non_negative_count(
        &mut errors,
        "reorderLevel",
        "Reorder level",
        draft.reorder_level,
    );

    match draft.sell_price {
        Some(price) if price_too_large(price) => errors.add(
            "sellPrice",
            FieldError::invalid(format!(
                "Selling price must be at most {}",
                MAX_PRICE.to_decimal_string()
            )),
        ),
        Some(price) if !price.is_negative() => {}
        _ => errors.add(
            "sellPrice",
            FieldError::invalid("Selling price must be a positive number"),
        ),
    }

    if let Some(cost) = draft.cost_price {
        if cost.is_negative() {
            errors.add(
                "costPrice",
                FieldError::invalid("Cost price must be a positive number"),
            );
        } else if price_too_large(cost) {
            errors.add(
                "costPrice",
                FieldError::invalid(format!(
                    "Cost price must be at most {}",
                    MAX_PRICE.to_decimal_string()
                )),
            );
        } else if cost_exceeds_sell(Some(cost), draft.sell_price) {
            errors.add(
                "costPrice",
                FieldError::inconsistent("Cost price cannot exceed selling price"),
            );
        }
    }

    errors
}

/// The cross-field price rule: true iff both prices are present and the
/// cost is strictly greater than the selling price.
pub fn cost_exceeds_sell(cost: Option<Money>, sell: Option<Money>) -> bool {
    matches!((cost, sell), (Some(c), Some(s)) if c > s)
}

// =============================================================================
// Supplier Rules
// =============================================================================

/// Validates a supplier form.
///
/// ## Rules
/// - `name`: required
/// - `email`: optional; when present must look like `local@domain.tld`
pub fn validate_supplier(draft: &SupplierDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if is_blank(draft.name.as_deref()) {
        errors.add("name", FieldError::required("Name"));
    }

    if let Some(email) = draft.email.as_deref().map(str::trim) {
        if !email.is_empty() && !is_valid_email(email) {
            errors.add(
                "email",
                FieldError::invalid("Email must be a valid email address"),
            );
        }
    }

    errors
}

/// Basic address check: `local@domain.tld`.
///
/// - no whitespace anywhere
/// - exactly one `@` with at least one character on each side
/// - the domain contains a `.` with at least one character before and after
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::is_valid_email;
///
/// assert!(is_valid_email("sales@techsupplies.com"));
/// assert!(!is_valid_email("sales@localhost"));
/// assert!(!is_valid_email("@techsupplies.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// =============================================================================
// Category Rules
// =============================================================================

/// Validates a category form against the existing categories.
///
/// ## Rules
/// - `name`: required
/// - `name`: unique within the set, ignoring case; the category with
///   `own_id` is skipped so an edit can keep its own name
pub fn validate_category(
    draft: &CategoryDraft,
    own_id: &str,
    existing: &[Category],
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match draft.name.as_deref().map(str::trim) {
        None | Some("") => errors.add("name", FieldError::required("Name")),
        Some(name) => {
            let lowered = name.to_lowercase();
            let taken = existing
                .iter()
                .any(|c| c.id != own_id && c.name.trim().to_lowercase() == lowered);
            if taken {
                errors.add("name", FieldError::duplicate("Category", name));
            }
        }
    }

    errors
}

// =============================================================================
// Registration Rules
// =============================================================================

/// Minimum password length for self-registered accounts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validates the sign-up form: name required, email well-formed, password
/// at least [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_registration(name: &str, email: &str, password: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if name.trim().is_empty() {
        errors.add("name", FieldError::required("Name"));
    }

    let email = email.trim();
    if email.is_empty() {
        errors.add("email", FieldError::required("Email"));
    } else if !is_valid_email(email) {
        errors.add(
            "email",
            FieldError::invalid("Email must be a valid email address"),
        );
    }

    if password.is_empty() {
        errors.add("password", FieldError::required("Password"));
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add(
            "password",
            FieldError::too_short("Password", MIN_PASSWORD_LENGTH),
        );
    }

    errors
}

// =============================================================================
// Unit Tests
// =============================================================================
