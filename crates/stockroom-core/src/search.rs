//! # Search, Filter & Paginate
//!
//! The list screens share one pipeline:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  collection ──► filter(query) ──► paginate(page) ──► Page<T>            │
//! │                                                                         │
//! │  filter:   case-insensitive substring, order preserved, "" matches all  │
//! │  paginate: 1-based, PAGE_SIZE = 10                                      │
//! │            total_pages = max(1, ceil(matches / 10))                     │
//! │            page outside [1, total_pages] → empty slice (no clamping)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clamping the Previous/Next buttons is the job of [`PageCursor`], not of
//! [`paginate`].
//!
//! ## Usage
//! ```rust
//! use stockroom_core::search::{paginate, total_pages};
//!
//! let numbers: Vec<u32> = (1..=25).collect();
//! let page = paginate(&numbers, 3);
//! assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
//! assert_eq!(page.total_pages, 3);
//! assert_eq!(total_pages(0), 1);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Category, Item, Supplier, Transaction, TransactionKind};
use crate::view::{CatalogIndex, ItemView};

/// Rows per list page.
pub const PAGE_SIZE: usize = 10;

// =============================================================================
// Searchable
// =============================================================================

/// Records that can be matched by the search box.
///
/// `needle` is already lower-cased and non-empty.
pub trait Searchable {
    fn matches(&self, needle: &str) -> bool;
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Searchable for Item {
    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle) || contains_ci(&self.sku, needle)
    }
}

impl Searchable for ItemView {
    fn matches(&self, needle: &str) -> bool {
        self.item.matches(needle)
    }
}

impl Searchable for Category {
    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
    }
}

impl Searchable for Supplier {
    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || self
                .contact_person
                .as_deref()
                .map_or(false, |c| contains_ci(c, needle))
    }
}

/// Keeps the records matching `query`, preserving order.
///
/// The query is matched as typed, so surrounding spaces are part of the
/// substring. Only the empty string matches everything.
pub fn filter<'a, T: Searchable>(records: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| r.matches(&needle)).collect()
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of a list screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The requested page, echoed back.
    pub page: usize,
    pub total_pages: usize,
    /// Number of records matching the query across all pages.
    pub total_matches: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_matches: self.total_matches,
        }
    }
}

/// `max(1, ceil(count / PAGE_SIZE))`.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// Slices `records` to the 1-based `page`.
pub fn paginate<T: Clone>(records: &[T], page: usize) -> Page<T> {
    let items = match page.checked_sub(1) {
        Some(index) => records
            .iter()
            .skip(index.saturating_mul(PAGE_SIZE))
            .take(PAGE_SIZE)
            .cloned()
            .collect(),
        None => Vec::new(),
    };
    Page {
        items,
        page,
        total_pages: total_pages(records.len()),
        total_matches: records.len(),
    }
}

/// Filters then paginates.
pub fn search<T: Searchable + Clone>(records: &[T], query: &str, page: usize) -> Page<T> {
    let matched: Vec<T> = filter(records, query).into_iter().cloned().collect();
    paginate(&matched, page)
}

/// The item list pipeline: filter by name/SKU, paginate, then resolve
/// references and stock status for the rows on the page.
pub fn search_items(
    items: &[Item],
    index: &CatalogIndex<'_>,
    query: &str,
    page: usize,
) -> Page<ItemView> {
    search(items, query, page).map(|item| ItemView::new(item, index))
}

// =============================================================================
// Page Cursor
// =============================================================================

/// State of a list screen's search box and Previous/Next control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    query: String,
    page: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        PageCursor {
            query: String::new(),
            page: 1,
        }
    }
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Typing in the search box resets to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page = 1;
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, total_pages: usize) -> bool {
        self.page < total_pages
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn next(&mut self, total_pages: usize) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    /// Runs the pipeline for the current cursor position.
    pub fn apply<T: Searchable + Clone>(&self, records: &[T]) -> Page<T> {
        search(records, &self.query, self.page)
    }
}

// =============================================================================
// Transaction Filter
// =============================================================================

/// Type dropdown on the transactions screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    #[default]
    All,
    Kind(TransactionKind),
}

impl TransactionFilter {
    pub fn accepts(&self, tx: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Kind(kind) => tx.kind == *kind,
        }
    }
}

impl fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionFilter::All => write!(f, "ALL"),
            TransactionFilter::Kind(kind) => write!(f, "{}", kind),
        }
    }
}

impl FromStr for TransactionFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(TransactionFilter::All)
        } else {
            s.parse().map(TransactionFilter::Kind)
        }
    }
}

/// Matching transactions, newest first.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: TransactionFilter,
) -> Vec<Transaction> {
    let mut matched: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| filter.accepts(tx))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::{Duration, Utc};

    fn item(n: usize) -> Item {
        Item {
            id: n.to_string(),
            sku: format!("SKU{:03}", n),
            name: format!("Widget {}", n),
            description: None,
            quantity: n as i64,
            reorder_level: 10,
            sell_price: Money::from_cents(100),
            cost_price: None,
            category_id: None,
            supplier_id: None,
            location: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (1..=n).map(item).collect()
    }

    #[test]
    fn test_twenty_five_items_three_pages() {
        let all = items(25);
        let page = search(&all, "", 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].sku, "SKU021");

        let beyond = search(&all, "", 4);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_pages, 3);

        assert!(search(&all, "", 0).items.is_empty());
    }

    #[test]
    fn test_no_matches_still_one_page() {
        let page = search(&items(5), "zzz", 1);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_matches, 0);
    }

    #[test]
    fn test_query_matches_name_or_sku_ignoring_case() {
        let mut all = items(3);
        all[1].name = "Wireless Mouse".into();

        let by_name = search(&all, "MOUSE", 1);
        assert_eq!(by_name.items.len(), 1);
        assert_eq!(by_name.items[0].id, "2");

        let by_sku = search(&all, "sku003", 1);
        assert_eq!(by_sku.items[0].id, "3");
    }

    #[test]
    fn test_lap_matches_only_laptop() {
        let mut all = items(2);
        all[0].sku = "SKU001".into();
        all[0].name = "Laptop".into();
        all[1].sku = "SKU002".into();
        all[1].name = "Office Chair".into();

        let page = search(&all, "lap", 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].sku, "SKU001");
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_query_spaces_are_matched_as_typed() {
        let mut all = items(2);
        all[0].name = "Laptop".into();
        all[1].name = "Office Chair".into();

        let office = search(&all, "Office ", 1);
        assert_eq!(office.items.len(), 1);
        assert_eq!(office.items[0].name, "Office Chair");

        assert!(search(&all, "Laptop ", 1).items.is_empty());
        assert_eq!(search(&all, " ", 1).items.len(), 1);
        assert_eq!(search(&all, "", 1).items.len(), 2);
    }

    #[test]
    fn test_search_items_annotates_low_stock() {
        let index = CatalogIndex::new(&[], &[]);
        let page = search_items(&items(12), &index, "", 1);
        assert_eq!(page.items.len(), 10);
        assert!(page.items[9].is_low_stock);
        assert_eq!(page.total_pages, 2);

        let second = search_items(&items(12), &index, "", 2);
        assert!(!second.items[0].is_low_stock);
    }

    #[test]
    fn test_supplier_matches_contact_person() {
        let suppliers = vec![Supplier {
            id: "1".into(),
            name: "Office Depot".into(),
            contact_person: Some("Jane Smith".into()),
            email: None,
            phone: None,
            address: None,
        }];
        assert_eq!(filter(&suppliers, "jane").len(), 1);
        assert_eq!(filter(&suppliers, "depot").len(), 1);
        assert!(filter(&suppliers, "bob").is_empty());
    }

    #[test]
    fn test_cursor_clamps_and_resets() {
        let mut cursor = PageCursor::new();
        cursor.prev();
        assert_eq!(cursor.page(), 1);

        cursor.next(3);
        cursor.next(3);
        cursor.next(3);
        assert_eq!(cursor.page(), 3);
        assert!(!cursor.has_next(3));
        assert!(cursor.has_prev());

        cursor.set_query("mouse");
        assert_eq!(cursor.page(), 1);

        cursor.next(0);
        assert_eq!(cursor.page(), 1);
    }

    #[test]
    fn test_transaction_filter_newest_first() {
        let now = Utc::now();
        let tx = |id: &str, kind, minutes| Transaction {
            id: id.into(),
            item_id: "1".into(),
            kind,
            change: 1,
            reason: None,
            performed_by: None,
            created_at: now - Duration::minutes(minutes),
        };
        let all = vec![
            tx("old-in", TransactionKind::In, 30),
            tx("out", TransactionKind::Out, 20),
            tx("new-in", TransactionKind::In, 10),
        ];

        let ins = filter_transactions(&all, "IN".parse().unwrap());
        let ids: Vec<_> = ins.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["new-in", "old-in"]);

        let every = filter_transactions(&all, TransactionFilter::All);
        assert_eq!(every[0].id, "new-in");
        assert_eq!(every.len(), 3);

        assert!("sideways".parse::<TransactionFilter>().is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: pages concatenate back to the matched sequence.
            #[test]
            fn pages_cover_all_matches(count in 0usize..60) {
                let all = items(count);
                let pages = total_pages(count);
                prop_assert!(pages >= 1);

                let mut seen = Vec::new();
                for p in 1..=pages {
                    let page = paginate(&all, p);
                    prop_assert!(page.items.len() <= PAGE_SIZE);
                    seen.extend(page.items.into_iter().map(|i| i.id));
                }
                let expected: Vec<String> = all.iter().map(|i| i.id.clone()).collect();
                prop_assert_eq!(seen, expected);
                prop_assert!(paginate(&all, pages + 1).items.is_empty());
            }
        }
    }
}
