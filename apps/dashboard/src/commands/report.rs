//! # Dashboard, Report and File Commands
//!
//! Everything here reads one [`snapshot`](stockroom_store::Database::snapshot)
//! of the store so the numbers on a screen agree with each other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  snapshot ──► CatalogIndex::resolve_all ──► Vec<ItemView>               │
//! │                                               │                         │
//! │          ┌────────────────────┬───────────────┼──────────────────┐      │
//! │          ▼                    ▼               ▼                  ▼      │
//! │     dashboard()        inventory_report()  export_items()   (import)   │
//! │     overview +         counts, value,      items-export-    rows ──►   │
//! │     distribution +     distribution,       YYYY-MM-DD.csv   store      │
//! │     10-day movement    low-stock list                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use stockroom_core::interchange::{self, ImportFormat};
use stockroom_core::report::{self, CategoryDistribution, InventoryReport, StockMovement};
use stockroom_core::{CatalogIndex, ItemView};
use stockroom_store::{Dataset, ImportOutcome};
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::DbState;

/// Headline numbers on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_items: usize,
    pub total_categories: usize,
    pub total_suppliers: usize,
    pub low_stock_count: usize,
    pub total_stock_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub overview: Overview,
    pub category_distribution: Vec<CategoryDistribution>,
    pub stock_movement: Vec<StockMovement>,
}

/// A written export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    pub path: PathBuf,
    pub rows: usize,
}

fn resolved_items(data: &Dataset) -> Vec<ItemView> {
    CatalogIndex::new(&data.categories, &data.suppliers).resolve_all(&data.items)
}

pub async fn dashboard(db: &DbState) -> ApiResult<DashboardData> {
    debug!("dashboard command");
    let data = db.inner().snapshot().await;
    let report = report::build_report(&resolved_items(&data))?;

    Ok(DashboardData {
        overview: Overview {
            total_items: report.total_items,
            total_categories: report.total_categories,
            total_suppliers: report.total_suppliers,
            low_stock_count: report.low_stock_count,
            total_stock_value: report.total_stock_value,
        },
        category_distribution: report.category_distribution,
        stock_movement: report::stock_movement(&data.transactions, report::MOVEMENT_DAYS),
    })
}

pub async fn inventory_report(db: &DbState) -> ApiResult<InventoryReport> {
    debug!("inventory_report command");
    let data = db.inner().snapshot().await;
    Ok(report::build_report(&resolved_items(&data))?)
}

/// Writes every item to `items-export-<today>.csv` inside `dir`.
pub async fn export_items(db: &DbState, dir: &Path) -> ApiResult<ExportedFile> {
    let data = db.inner().snapshot().await;
    let items = resolved_items(&data);
    let csv = interchange::export_items_csv(&items)?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(interchange::export_file_name(Utc::now().date_naive()));
    tokio::fs::write(&path, csv).await?;

    info!(path = ?path, rows = items.len(), "Items exported");
    Ok(ExportedFile {
        path,
        rows: items.len(),
    })
}

/// Imports items from a `.csv`, `.xls` or `.xlsx` file (read as CSV text).
///
/// Bad rows are reported in [`ImportOutcome::rejected`] with their line
/// number; good rows are imported regardless.
pub async fn import_items(db: &DbState, path: &Path) -> ApiResult<ImportOutcome> {
    let format = ImportFormat::from_path(path)?;
    debug!(path = ?path, format = ?format, "import_items command");

    let text = tokio::fs::read_to_string(path).await?;
    let rows = interchange::parse_import(&text)?;
    Ok(db.inner().items().import(&rows).await?)
}
