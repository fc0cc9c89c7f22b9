//! Derived table view: search, sort and totals over the fetched rows.
//!
//! Pure functions of (rows, search term, sort). The source list is never
//! mutated; every call produces a fresh ordered view.

use super::dto::LineItem;
use super::sort::{natural_cmp, SortColumn, SortDirection, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Aggregates over the search-filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaleRowTotals {
    pub total_files: usize,
    pub total_size: u64,
    pub unique_sales: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SaleRowView {
    pub rows: Vec<LineItem>,
    pub totals: SaleRowTotals,
}

impl LineItem {
    /// Case-insensitive substring match on document number, contact name,
    /// description and file name. `term` must already be lower-cased.
    pub fn matches_search(&self, term: &str) -> bool {
        let fields = [
            self.document_number(),
            self.contact_name(),
            self.description.as_deref(),
            self.file_name(),
        ];
        fields
            .iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(term))
    }
}

/// Rows matching `search`. Blank search returns all rows in fetch order.
pub fn filter_rows(rows: &[LineItem], search: &str) -> Vec<LineItem> {
    if search.trim().is_empty() {
        return rows.to_vec();
    }
    let term = search.to_lowercase();
    rows.iter()
        .filter(|row| row.matches_search(&term))
        .cloned()
        .collect()
}

/// Stable sort; `None` keeps fetch order.
pub fn sort_rows(rows: &mut [LineItem], sort: Option<SortSpec>) {
    let Some(spec) = sort else {
        return;
    };
    rows.sort_by(|a, b| {
        let cmp = match spec.column {
            SortColumn::Document => natural_cmp(&a.document_label(), &b.document_label()),
            SortColumn::Size => a.file_size().cmp(&b.file_size()),
        };
        match spec.direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    });
}

pub fn compute_totals(rows: &[LineItem]) -> SaleRowTotals {
    let unique: HashSet<i64> = rows.iter().map(|r| r.parent_document_id).collect();
    SaleRowTotals {
        total_files: rows.len(),
        total_size: rows.iter().map(LineItem::file_size).sum(),
        unique_sales: unique.len(),
    }
}

/// Full pipeline: filter, total (membership only), then sort.
pub fn derive_view(rows: &[LineItem], search: &str, sort: Option<SortSpec>) -> SaleRowView {
    let mut filtered = filter_rows(rows, search);
    let totals = compute_totals(&filtered);
    sort_rows(&mut filtered, sort);
    SaleRowView {
        rows: filtered,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_sale_row_images::dto::{AttachedFile, ParentDocument};
    use crate::domain::a001_sale_row_images::sort::next_sort;

    fn row(id: i64, sale_id: i64, doc: &str, contact: &str, size: Option<u64>) -> LineItem {
        LineItem {
            id,
            parent_document_id: sale_id,
            description: Some(format!("Regel {}", id)),
            cover_image_id: id * 10,
            cover_image: Some(AttachedFile {
                id: id * 10,
                name: Some(format!("foto-{}.png", id)),
                size,
                token: Some(format!("tok{}", id)),
                ..Default::default()
            }),
            parent_document: Some(ParentDocument {
                id: sale_id,
                computed_friendly_id: Some(doc.to_string()),
                contact_name: Some(contact.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn sample() -> Vec<LineItem> {
        vec![
            row(1, 100, "DOC-10", "Bakkerij Peeters", Some(5_000)),
            row(2, 101, "DOC-2", "Klant BV", Some(1_200)),
            row(3, 100, "DOC-10", "Bakkerij Peeters", None),
            row(4, 102, "DOC-1", "Garage Janssens", Some(90_000)),
        ]
    }

    fn ids(rows: &[LineItem]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_blank_search_returns_everything_in_order() {
        let rows = sample();
        assert_eq!(filter_rows(&rows, ""), rows);
        assert_eq!(filter_rows(&rows, "   \t"), rows);
    }

    #[test]
    fn test_search_each_field_case_insensitive() {
        let rows = sample();
        assert_eq!(ids(&filter_rows(&rows, "doc-2")), vec![2]);
        assert_eq!(ids(&filter_rows(&rows, "PEETERS")), vec![1, 3]);
        assert_eq!(ids(&filter_rows(&rows, "regel 4")), vec![4]);
        assert_eq!(ids(&filter_rows(&rows, "FOTO-3")), vec![3]);
        assert!(filter_rows(&rows, "zzz").is_empty());
    }

    #[test]
    fn test_search_skips_missing_fields() {
        let mut bare = row(9, 900, "X", "Y", Some(1));
        bare.parent_document = None;
        bare.cover_image.as_mut().unwrap().name = None;
        bare.description = None;
        assert!(filter_rows(&[bare], "x").is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rows = sample();
        for term in ["doc", "klant", "", "foto-1", "nothing"] {
            let once = filter_rows(&rows, term);
            let twice = filter_rows(&once, term);
            assert_eq!(once, twice, "term {:?}", term);
        }
    }

    #[test]
    fn test_sort_by_size_treats_missing_as_zero() {
        let mut rows = sample();
        sort_rows(&mut rows, Some(SortSpec::asc(SortColumn::Size)));
        assert_eq!(ids(&rows), vec![3, 2, 1, 4]);
        let sizes: Vec<u64> = rows.iter().map(LineItem::file_size).collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]));

        sort_rows(&mut rows, Some(SortSpec::desc(SortColumn::Size)));
        let sizes: Vec<u64> = rows.iter().map(LineItem::file_size).collect();
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_sort_by_document_is_natural_and_stable() {
        let mut rows = sample();
        sort_rows(&mut rows, Some(SortSpec::asc(SortColumn::Document)));
        assert_eq!(ids(&rows), vec![4, 2, 1, 3]);
        sort_rows(&mut rows, Some(SortSpec::desc(SortColumn::Document)));
        assert_eq!(ids(&rows)[..2], [1, 3]);
    }

    #[test]
    fn test_sort_by_document_uses_displayed_label() {
        let mut rows = vec![
            row(1, 100, "DOC-10", "A", Some(1)),
            row(2, 20, "", "B", Some(1)),
            row(3, 9, "", "C", Some(1)),
            row(4, 5, "DOC-2", "D", Some(1)),
        ];
        rows[2].parent_document = None;
        assert_eq!(rows[1].document_label(), "20");
        assert_eq!(rows[2].document_label(), "9");

        sort_rows(&mut rows, Some(SortSpec::asc(SortColumn::Document)));
        assert_eq!(ids(&rows), vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_three_clicks_restore_fetch_order() {
        let rows = sample();
        let mut sort = None;
        for _ in 0..3 {
            sort = next_sort(sort, SortColumn::Size);
        }
        let view = derive_view(&rows, "", sort);
        assert_eq!(view.rows, rows);
    }

    #[test]
    fn test_totals_over_filtered_rows() {
        let rows = sample();
        let view = derive_view(&rows, "peeters", Some(SortSpec::asc(SortColumn::Size)));
        assert_eq!(
            view.totals,
            SaleRowTotals {
                total_files: 2,
                total_size: 5_000,
                unique_sales: 1,
            }
        );

        let all = derive_view(&rows, "", None);
        assert_eq!(all.totals.total_files, 4);
        assert_eq!(all.totals.total_size, 96_200);
        assert_eq!(all.totals.unique_sales, 3);
    }

    #[test]
    fn test_search_by_contact_scenario() {
        let rows = vec![
            row(1, 10, "VF-1", "Klant Janssens", Some(4_321)),
            row(2, 11, "VF-2", "Leverancier", Some(999)),
        ];
        let view = derive_view(&rows, "klant", None);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(
            view.totals,
            SaleRowTotals {
                total_files: 1,
                total_size: 4_321,
                unique_sales: 1,
            }
        );
    }

    #[test]
    fn test_derive_does_not_touch_source() {
        let rows = sample();
        let before = rows.clone();
        let _ = derive_view(&rows, "doc", Some(SortSpec::desc(SortColumn::Document)));
        assert_eq!(rows, before);
    }
}
