//! Filter, sort and pagination types shared by every list endpoint

use crate::core::field::{FieldValue, IntoFieldValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied by a [`Filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Like,
}

impl FilterOp {
    /// SQL operator rendered into the query text
    pub fn as_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Like => "LIKE",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A single `field op value` predicate
///
/// `field` is a static column name; stores still check it against the
/// record's allow-list. The value is always bound, never interpolated.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: &'static str,
    pub op: FilterOp,
    pub value: FieldValue,
}

impl Filter {
    pub fn new(field: &'static str, op: FilterOp, value: FieldValue) -> Self {
        Self { field, op, value }
    }

    /// `field = value`
    pub fn eq(field: &'static str, value: impl IntoFieldValue) -> Self {
        Self::new(field, FilterOp::Eq, value.into_field_value())
    }

    /// `field LIKE %needle%`
    pub fn contains(field: &'static str, needle: &str) -> Self {
        Self::new(
            field,
            FilterOp::Like,
            FieldValue::String(format!("%{}%", needle)),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Filters (AND-combined) and sorts (applied in order) for one query
///
/// Built per request and discarded afterwards. An empty criteria matches
/// every live row in id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub filters: Vec<Filter>,
    pub sorts: Vec<Sort>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.sorts.is_empty()
    }
}

/// A 1-based page request as received from a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// The page actually served. Anything below 1 is the first page.
    pub fn effective_page(&self) -> i64 {
        self.page.max(1)
    }

    /// The limit actually served. Anything below 1 becomes 1.
    pub fn effective_limit(&self) -> i64 {
        self.limit.max(1)
    }

    /// Rows to skip
    pub fn offset(&self) -> u64 {
        ((self.effective_page() - 1) as u64).saturating_mul(self.fetch_limit())
    }

    /// Rows to take
    pub fn fetch_limit(&self) -> u64 {
        self.effective_limit() as u64
    }

    /// Metadata for this request over `total_rows` matches
    pub fn pagination(&self, total_rows: u64) -> Pagination {
        Pagination::compute(self.page, self.limit, total_rows)
    }
}

/// Pagination metadata returned alongside a list page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total_pages: u64,
}

impl Pagination {
    /// Compute metadata for `total_rows` matches.
    ///
    /// A limit of zero or less is coerced to 1 and a page below 1 to 1; the
    /// coerced values are the ones reported. `total_pages` is the ceiling of
    /// rows over limit and is never below 1, so an empty result still has one
    /// (empty) page.
    pub fn compute(page: i64, limit: i64, total_rows: u64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = total_rows.div_ceil(limit as u64).max(1);

        Self {
            page,
            limit,
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_contains_wraps_needle() {
        let filter = Filter::contains("title", "rock");
        assert_eq!(filter.op, FilterOp::Like);
        assert_eq!(filter.value, FieldValue::String("%rock%".to_string()));
    }

    #[test]
    fn test_filter_eq_converts_value() {
        let filter = Filter::eq("category_id", 3u64);
        assert_eq!(filter.op.as_sql(), "=");
        assert_eq!(filter.value, FieldValue::Integer(3));
    }

    #[test]
    fn test_criteria_builder_keeps_order() {
        let criteria = Criteria::new()
            .filter(Filter::eq("user_id", 1u64))
            .sort(Sort::desc("title"))
            .sort(Sort::asc("location"));

        assert_eq!(criteria.filters.len(), 1);
        assert_eq!(criteria.sorts[0], Sort::desc("title"));
        assert_eq!(criteria.sorts[1].field, "location");
        assert!(Criteria::new().is_empty());
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(1, 5).offset(), 0);
        assert_eq!(PageRequest::new(2, 5).offset(), 5);
        assert_eq!(PageRequest::new(0, 5).offset(), 0);
        assert_eq!(PageRequest::new(-3, 5).offset(), 0);
    }

    #[test]
    fn test_page_request_agrees_with_pagination() {
        for (page, limit) in [(1, 0), (1, -4), (0, 2), (-3, 2), (0, 0)] {
            let request = PageRequest::new(page, limit);
            let pagination = request.pagination(7);

            assert_eq!(request.fetch_limit(), pagination.limit as u64);
            assert_eq!(request.effective_page(), pagination.page);
            assert_eq!(
                request.offset(),
                (pagination.page as u64 - 1) * pagination.limit as u64
            );
        }

        assert_eq!(PageRequest::new(3, 0).fetch_limit(), 1);
        assert_eq!(PageRequest::new(3, -2).offset(), 2);
    }

    #[test]
    fn test_pagination_clamps_page_below_one() {
        let zero = Pagination::compute(0, 2, 5);
        let negative = Pagination::compute(-3, 2, 5);

        assert_eq!(zero.page, 1);
        assert_eq!(negative, zero);
        assert!(!zero.has_prev());
        assert!(zero.has_next());
    }

    #[test]
    fn test_pagination_ceiling() {
        assert_eq!(Pagination::compute(1, 5, 20).total_pages, 4);
        assert_eq!(Pagination::compute(1, 3, 20).total_pages, 7);
        assert_eq!(Pagination::compute(1, 1, 20).total_pages, 20);
        assert_eq!(Pagination::compute(1, 20, 20).total_pages, 1);
    }

    #[test]
    fn test_pagination_minimum_one_page() {
        assert_eq!(Pagination::compute(1, 5, 0).total_pages, 1);
        assert_eq!(Pagination::compute(4, 10, 0).total_pages, 1);
    }

    #[test]
    fn test_pagination_coerces_non_positive_limit() {
        let zero = Pagination::compute(1, 0, 7);
        let negative = Pagination::compute(1, -4, 7);
        let one = Pagination::compute(1, 1, 7);

        assert_eq!(zero.limit, 1);
        assert_eq!(zero, one);
        assert_eq!(negative, one);
        assert_eq!(one.total_pages, 7);
    }

    #[test]
    fn test_pagination_neighbours() {
        let first = Pagination::compute(1, 5, 12);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = Pagination::compute(3, 5, 12);
        assert!(last.has_prev());
        assert!(!last.has_next());
    }

    #[test]
    fn test_pagination_serializes_fields() {
        let json = serde_json::to_value(Pagination::compute(2, 5, 11)).unwrap();
        assert_eq!(json["page"], 2);
        assert_eq!(json["limit"], 5);
        assert_eq!(json["total_pages"], 3);
    }
}
