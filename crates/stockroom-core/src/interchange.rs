//! # CSV Interchange
//!
//! Item export to, and import from, CSV text. This module works on strings
//! only; reading and writing the actual files is done by the dashboard app.
//!
//! ## Export Layout
//! ```text
//! SKU,Name,Category,Quantity,Price,Location
//! SKU001,Laptop,Electronics,15,999.99,Warehouse A - Shelf 1
//! SKU004,Desk Lamp,,12,39.99,
//!                  └─ blank when absent ─┘
//! ```
//!
//! ## Import Pipeline
//! ```text
//! file name ──► ImportFormat::from_path   (.csv / .xls / .xlsx, else reject)
//!     │
//! file text ──► parse_import
//!     │           ├── record 1 → headers (trimmed, lower-cased)
//!     │           ├── blank records skipped
//!     │           └── header → value (short rows tolerated)
//!     ▼
//! Vec<ImportRow> ──► ImportRow::to_item_draft ──► validation
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::ItemDraft;
use crate::view::ItemView;

/// Export header row.
pub const EXPORT_HEADERS: [&str; 6] = ["SKU", "Name", "Category", "Quantity", "Price", "Location"];

// =============================================================================
// Export
// =============================================================================

/// Renders items as CSV text, one row per item in the given order.
///
/// Fields are quoted only when they contain a comma, quote or line break.
///
/// ## Example
/// ```rust
/// use stockroom_core::interchange::export_items_csv;
///
/// assert_eq!(
///     export_items_csv(&[]).unwrap(),
///     "SKU,Name,Category,Quantity,Price,Location\n"
/// );
/// ```
pub fn export_items_csv(items: &[ItemView]) -> CoreResult<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for view in items {
        let item = &view.item;
        let quantity = item.quantity.to_string();
        let price = item.sell_price.to_decimal_string();
        writer.write_record([
            item.sku.as_str(),
            item.name.as_str(),
            view.category_name.as_deref().unwrap_or(""),
            quantity.as_str(),
            price.as_str(),
            item.location.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Csv(csv::Error::from(e.into_error())))?;
    // Every field written above is a &str, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `items-export-<YYYY-MM-DD>.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("items-export-{}.csv", date.format("%Y-%m-%d"))
}

// =============================================================================
// Import
// =============================================================================

/// File types the import button accepts. All are read as CSV text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Xls,
    Xlsx,
}

impl ImportFormat {
    /// Picks the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(ImportFormat::Csv),
            Some("xls") => Ok(ImportFormat::Xls),
            Some("xlsx") => Ok(ImportFormat::Xlsx),
            _ => Err(CoreError::UnsupportedImportFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// One data record of an import file, keyed by lower-cased header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportRow {
    /// 1-based position among the data records (header excluded).
    pub line: usize,
    values: BTreeMap<String, String>,
}

impl ImportRow {
    pub fn new(line: usize, values: BTreeMap<String, String>) -> Self {
        ImportRow { line, values }
    }

    /// Trimmed value under `header`, `None` when absent or blank.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.values
            .get(header)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn first_of(&self, headers: &[&str]) -> Option<&str> {
        headers.iter().find_map(|h| self.get(h))
    }

    fn int(&self, headers: &[&str]) -> Option<i64> {
        self.first_of(headers).and_then(|v| v.parse().ok())
    }

    fn money(&self, headers: &[&str]) -> Option<Money> {
        self.first_of(headers).and_then(|v| v.parse().ok())
    }

    /// Category name as written in the file; the store resolves it to an id.
    pub fn category_name(&self) -> Option<&str> {
        self.get("category")
    }

    /// Maps the row onto an item form.
    ///
    /// Unparsable numbers are left as `None` so validation reports them
    /// against the right field. A missing reorder level defaults to 0, since
    /// the export layout has no such column.
    pub fn to_item_draft(&self) -> ItemDraft {
        let reorder_level = match self.first_of(&["reorder level", "reorderlevel"]) {
            Some(value) => value.parse::<i64>().ok(),
            None => Some(0),
        };

        ItemDraft {
            sku: self.get("sku").map(str::to_string),
            name: self.get("name").map(str::to_string),
            description: self.get("description").map(str::to_string),
            quantity: self.int(&["quantity"]),
            reorder_level,
            sell_price: self.money(&["price", "sell price", "sellprice"]),
            cost_price: self.money(&["cost price", "costprice"]),
            category_id: None,
            supplier_id: None,
            location: self.get("location").map(str::to_string),
        }
    }
}

/// Parses import text into rows.
///
/// ## Errors
/// `CoreError::Csv` if the text is not readable as CSV (e.g. invalid UTF-8
/// inside a record).
pub fn parse_import(text: &str) -> CoreResult<Vec<ImportRow>> {
    let text = text.trim_start_matches('\u{FEFF}');
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for (index, record) in records.enumerate() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let values = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        rows.push(ImportRow::new(index + 1, values));
    }

    Ok(rows)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Item};
    use crate::view::CatalogIndex;
    use crate::validation::validate_item;
    use chrono::Utc;

    fn item(sku: &str, name: &str, category: Option<&str>, location: Option<&str>) -> Item {
        Item {
            id: sku.into(),
            sku: sku.into(),
            name: name.into(),
            description: None,
            quantity: 15,
            reorder_level: 5,
            sell_price: Money::from_cents(99999),
            cost_price: None,
            category_id: category.map(Into::into),
            supplier_id: None,
            location: location.map(Into::into),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_export_layout() {
        let categories = vec![Category {
            id: "1".into(),
            name: "Electronics".into(),
            description: None,
        }];
        let index = CatalogIndex::new(&categories, &[]);
        let views = index.resolve_all(&[
            item("SKU001", "Laptop", Some("1"), Some("Warehouse A - Shelf 1")),
            item("SKU009", "Lamp", None, None),
        ]);

        let csv = export_items_csv(&views).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "SKU,Name,Category,Quantity,Price,Location");
        assert_eq!(lines[1], "SKU001,Laptop,Electronics,15,999.99,Warehouse A - Shelf 1");
        assert_eq!(lines[2], "SKU009,Lamp,,15,999.99,");
    }

    #[test]
    fn test_export_quotes_embedded_commas() {
        let index = CatalogIndex::new(&[], &[]);
        let views = index.resolve_all(&[item("SKU002", "Chair, Office", None, None)]);
        let csv = export_items_csv(&views).unwrap();
        assert!(csv.contains("SKU002,\"Chair, Office\",,15,999.99,"));
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(export_file_name(date), "items-export-2026-10-16.csv");
    }

    #[test]
    fn test_import_format_by_extension() {
        assert_eq!(
            ImportFormat::from_path(Path::new("items.CSV")).unwrap(),
            ImportFormat::Csv
        );
        assert_eq!(
            ImportFormat::from_path(Path::new("/tmp/stock.xlsx")).unwrap(),
            ImportFormat::Xlsx
        );
        assert!(matches!(
            ImportFormat::from_path(Path::new("items.json")),
            Err(CoreError::UnsupportedImportFormat(_))
        ));
        assert!(ImportFormat::from_path(Path::new("items")).is_err());
    }

    #[test]
    fn test_parse_import_rows() {
        let text = "\u{FEFF} SKU , Name,Quantity,Price\n\
                    SKU010,Stapler,4,12.50\n\
                    ,,,\n\
                    SKU011,Tape\n\
                    SKU012,Pens,100,1.99,extra\n";
        let rows = parse_import(text).unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[0].get("sku"), Some("SKU010"));
        assert_eq!(rows[0].get("price"), Some("12.50"));

        // Blank record skipped, but line numbers keep counting.
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[1].get("quantity"), None);

        assert_eq!(rows[2].get("name"), Some("Pens"));
    }

    #[test]
    fn test_exported_file_imports_cleanly() {
        let index = CatalogIndex::new(&[], &[]);
        let views = index.resolve_all(&[item("SKU001", "Laptop", None, Some("Shelf 1"))]);
        let rows = parse_import(&export_items_csv(&views).unwrap()).unwrap();

        let draft = rows[0].to_item_draft();
        assert!(validate_item(&draft).is_empty());
        assert_eq!(draft.sell_price, Some(Money::from_cents(99999)));
        assert_eq!(draft.quantity, Some(15));
    }

    #[test]
    fn test_empty_import_has_no_rows() {
        assert!(parse_import("").unwrap().is_empty());
        assert!(parse_import("sku,name\n").unwrap().is_empty());
    }

    #[test]
    fn test_row_to_item_draft() {
        let rows = parse_import(
            "sku,name,quantity,price,reorder level,category,location\n\
             SKU010,Stapler,4,12.50,10,Office Supplies,Aisle 3\n\
             SKU011,Tape,many,free,,,\n",
        )
        .unwrap();

        let draft = rows[0].to_item_draft();
        assert_eq!(draft.sku.as_deref(), Some("SKU010"));
        assert_eq!(draft.quantity, Some(4));
        assert_eq!(draft.reorder_level, Some(10));
        assert_eq!(draft.sell_price, Some(Money::from_cents(1250)));
        assert_eq!(draft.location.as_deref(), Some("Aisle 3"));
        assert_eq!(rows[0].category_name(), Some("Office Supplies"));

        let bad = rows[1].to_item_draft();
        assert_eq!(bad.quantity, None);
        assert_eq!(bad.sell_price, None);
        assert_eq!(bad.reorder_level, Some(0));
        assert_eq!(rows[1].category_name(), None);
    }
}
