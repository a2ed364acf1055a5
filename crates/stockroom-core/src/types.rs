//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    Category     │   │    Supplier     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  id             │   │  id             │       │
//! │  │  sku (business) │   │  name (unique)  │   │  name           │       │
//! │  │  quantity       │──────────────────────► │  email          │       │
//! │  │  reorder_level  │   └─────────────────┘   └─────────────────┘       │
//! │  │  sell_price     │                                                    │
//! │  └────────▲────────┘   ┌─────────────────┐   ┌─────────────────┐       │
//! │           │            │  Transaction    │   │      User       │       │
//! │           └────────────│  kind, change   │   │  email, role    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Drafts
//! Every editable entity has a `*Draft` counterpart where every field is an
//! `Option`. Drafts model a form that is still being filled in; they are
//! validated (see [`crate::validation`]) and only then turned into records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, FieldError, ValidationErrors};
use crate::money::Money;
use crate::stock;
use crate::validation;

/// Generates a new record identifier (UUID v4).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trims a free-text form value, mapping blank input to `None`.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

// =============================================================================
// Item
// =============================================================================

/// An inventory item.
///
/// `is_low_stock` is deliberately not a field: it is derived on every read
/// through [`stock::is_low_stock`] so that no screen can show a stale flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier, unique, at least 3 chars.
    pub sku: String,

    pub name: String,

    pub description: Option<String>,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Restock threshold. At or below this the item is low stock.
    pub reorder_level: i64,

    /// Selling price in cents.
    pub sell_price: Money,

    /// Purchase cost in cents. Never above `sell_price`.
    pub cost_price: Option<Money>,

    pub category_id: Option<String>,

    pub supplier_id: Option<String>,

    /// Storage location, e.g. "Warehouse A - Shelf 1".
    pub location: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Whether the item is at or below its reorder level.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        stock::is_low_stock(self.quantity, self.reorder_level)
    }

    /// `quantity × sell_price`.
    pub fn stock_value(&self) -> CoreResult<Money> {
        self.sell_price
            .multiply_quantity(self.quantity)
            .ok_or_else(|| CoreError::AmountOverflow(format!("stock value of {}", self.sku)))
    }

    /// Profit margin in percent with one decimal, e.g. `25.0`.
    pub fn profit_margin(&self) -> f64 {
        stock::profit_margin(self.sell_price, self.cost_price)
    }

    /// Overwrites the editable fields from a validated draft.
    ///
    /// ## Returns
    /// * `Ok(())` - fields replaced, `updated_at` bumped
    /// * `Err(CoreError::Validation)` - draft rejected, item untouched
    pub fn apply_draft(&mut self, draft: ItemDraft, now: DateTime<Utc>) -> CoreResult<()> {
        let fields = ItemFields::try_from(draft)?;
        self.sku = fields.sku;
        self.name = fields.name;
        self.description = fields.description;
        self.quantity = fields.quantity;
        self.reorder_level = fields.reorder_level;
        self.sell_price = fields.sell_price;
        self.cost_price = fields.cost_price;
        self.category_id = fields.category_id;
        self.supplier_id = fields.supplier_id;
        self.location = fields.location;
        self.updated_at = now;
        Ok(())
    }
}

/// Form state for creating or editing an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDraft {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub reorder_level: Option<i64>,
    pub sell_price: Option<Money>,
    pub cost_price: Option<Money>,
    pub category_id: Option<String>,
    pub supplier_id: Option<String>,
    pub location: Option<String>,
}

impl ItemDraft {
    /// Validates the draft and builds a new item with the given id.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use stockroom_core::money::Money;
    /// use stockroom_core::types::ItemDraft;
    ///
    /// let draft = ItemDraft {
    ///     sku: Some("ELEC-001".into()),
    ///     name: Some("Laptop".into()),
    ///     quantity: Some(15),
    ///     reorder_level: Some(5),
    ///     sell_price: Some(Money::from_cents(99999)),
    ///     ..Default::default()
    /// };
    /// let item = draft.into_item("1".into(), Utc::now()).unwrap();
    /// assert!(!item.is_low_stock());
    /// ```
    pub fn into_item(self, id: String, now: DateTime<Utc>) -> CoreResult<Item> {
        let fields = ItemFields::try_from(self)?;
        Ok(Item {
            id,
            sku: fields.sku,
            name: fields.name,
            description: fields.description,
            quantity: fields.quantity,
            reorder_level: fields.reorder_level,
            sell_price: fields.sell_price,
            cost_price: fields.cost_price,
            category_id: fields.category_id,
            supplier_id: fields.supplier_id,
            location: fields.location,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Pre-fills the edit form from an existing item.
impl From<&Item> for ItemDraft {
    fn from(item: &Item) -> Self {
        ItemDraft {
            sku: Some(item.sku.clone()),
            name: Some(item.name.clone()),
            description: item.description.clone(),
            quantity: Some(item.quantity),
            reorder_level: Some(item.reorder_level),
            sell_price: Some(item.sell_price),
            cost_price: item.cost_price,
            category_id: item.category_id.clone(),
            supplier_id: item.supplier_id.clone(),
            location: item.location.clone(),
        }
    }
}

/// The validated, normalized contents of an [`ItemDraft`].
struct ItemFields {
    sku: String,
    name: String,
    description: Option<String>,
    quantity: i64,
    reorder_level: i64,
    sell_price: Money,
    cost_price: Option<Money>,
    category_id: Option<String>,
    supplier_id: Option<String>,
    location: Option<String>,
}

impl TryFrom<ItemDraft> for ItemFields {
    type Error = CoreError;

    fn try_from(draft: ItemDraft) -> CoreResult<Self> {
        validation::validate_item(&draft).into_result()?;

        let (Some(sku), Some(name), Some(quantity), Some(reorder_level), Some(sell_price)) = (
            draft.sku,
            draft.name,
            draft.quantity,
            draft.reorder_level,
            draft.sell_price,
        ) else {
            // validate_item reports every missing required field above
            let mut errors = ValidationErrors::new();
            errors.add("item", FieldError::required("Item"));
            return Err(CoreError::Validation(errors));
        };

        Ok(ItemFields {
            sku: sku.trim().to_string(),
            name: name.trim().to_string(),
            description: normalize_text(draft.description),
            quantity,
            reorder_level,
            sell_price,
            cost_price: draft.cost_price,
            category_id: normalize_text(draft.category_id),
            supplier_id: normalize_text(draft.supplier_id),
            location: normalize_text(draft.location),
        })
    }
}

// =============================================================================
// Category
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    /// Unique within the set (case-insensitive).
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryDraft {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryDraft {
    /// Validates against the existing categories and builds the record.
    ///
    /// `id` is also used to skip the category itself in the uniqueness
    /// check when editing.
    pub fn into_category(self, id: String, existing: &[Category]) -> CoreResult<Category> {
        validation::validate_category(&self, &id, existing).into_result()?;
        Ok(Category {
            id,
            name: self.name.unwrap_or_default().trim().to_string(),
            description: normalize_text(self.description),
        })
    }
}

// =============================================================================
// Supplier
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierDraft {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl SupplierDraft {
    pub fn into_supplier(self, id: String) -> CoreResult<Supplier> {
        validation::validate_supplier(&self).into_result()?;
        Ok(Supplier {
            id,
            name: self.name.unwrap_or_default().trim().to_string(),
            contact_person: normalize_text(self.contact_person),
            email: normalize_text(self.email),
            phone: normalize_text(self.phone),
            address: normalize_text(self.address),
        })
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Goods received. Change is positive.
    In,
    /// Goods issued. Change is negative.
    Out,
    /// Stock count correction. Change is signed.
    Adjustment,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::In => write!(f, "IN"),
            TransactionKind::Out => write!(f, "OUT"),
            TransactionKind::Adjustment => write!(f, "ADJUSTMENT"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "IN" => Ok(TransactionKind::In),
            "OUT" => Ok(TransactionKind::Out),
            "ADJUSTMENT" => Ok(TransactionKind::Adjustment),
            other => Err(CoreError::InvalidStockChange {
                reason: format!(
                    "unknown transaction type '{}'. Valid options: IN, OUT, ADJUSTMENT",
                    other
                ),
            }),
        }
    }
}

/// A recorded stock movement against one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Signed quantity change applied to the item.
    pub change: i64,
    pub reason: Option<String>,
    pub performed_by: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// User
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    /// Role given to self-registered accounts.
    #[default]
    Viewer,
}

/// A dashboard user as exposed to the screens (never carries a password).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

// =============================================================================
// Theme
// =============================================================================

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the other theme.
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
