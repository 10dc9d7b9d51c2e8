//! Query-string parsing for list endpoints

use crate::core::error::AppError;
use crate::core::query::{Criteria, Filter, PageRequest, Sort};
use serde::Deserialize;

/// Raw list parameters. Everything stays a string until the endpoint
/// decides how strict to be.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub category_id: Option<String>,
    #[serde(rename = "sortLocation")]
    pub sort_location: Option<String>,
    #[serde(rename = "sortTitle")]
    pub sort_title: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

pub const DEFAULT_COMMENT_LIMIT: i64 = 50;

fn parse_int(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

impl ListQuery {
    /// `limit` and `page` must both be integers
    pub fn strict_page(&self) -> Result<PageRequest, AppError> {
        let limit = parse_int(self.limit.as_deref())
            .ok_or_else(|| AppError::bad_request("Limit Parameter format is invalid"))?;
        let page = parse_int(self.page.as_deref())
            .ok_or_else(|| AppError::bad_request("page Parameter format is invalid"))?;
        Ok(PageRequest::new(page, limit))
    }

    /// Missing or unparsable values fall back to the defaults
    pub fn lenient_page(&self, default_limit: i64) -> PageRequest {
        PageRequest::new(
            parse_int(self.page.as_deref()).unwrap_or(1),
            parse_int(self.limit.as_deref()).unwrap_or(default_limit),
        )
    }

    fn search(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }

    /// Event list: `q` on title, `category_id` equality, `sortLocation` on title
    pub fn event_criteria(&self) -> Result<Criteria, AppError> {
        let mut criteria = Criteria::new();

        if let Some(q) = self.search() {
            criteria = criteria.filter(Filter::contains("title", q));
        }
        if let Some(raw) = self.category_id.as_deref().filter(|c| !c.is_empty()) {
            let category_id: u64 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::bad_request("category_id Parameter format is invalid"))?;
            criteria = criteria.filter(Filter::eq("category_id", category_id));
        }

        Ok(with_sort(criteria, "title", self.sort_location.as_deref()))
    }

    /// Events owned by one user: `q` on title, `sortLocation` on location
    pub fn user_event_criteria(&self, user_id: u64) -> Criteria {
        let mut criteria = Criteria::new().filter(Filter::eq("user_id", user_id));

        if let Some(q) = self.search() {
            criteria = criteria.filter(Filter::contains("title", q));
        }

        with_sort(criteria, "location", self.sort_location.as_deref())
    }

    /// Category list: `q` on title, `sortTitle` on title
    pub fn category_criteria(&self) -> Criteria {
        let mut criteria = Criteria::new();

        if let Some(q) = self.search() {
            criteria = criteria.filter(Filter::contains("title", q));
        }

        with_sort(criteria, "title", self.sort_title.as_deref())
    }
}

/// "1" sorts descending, "0" ascending, anything else leaves order alone
fn with_sort(criteria: Criteria, field: &'static str, flag: Option<&str>) -> Criteria {
    match flag {
        Some("1") => criteria.sort(Sort::desc(field)),
        Some("0") => criteria.sort(Sort::asc(field)),
        _ => criteria,
    }
}

/// Path ids are parsed by hand so a bad id gets the usual error envelope
pub fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::bad_request("id Parameter format is invalid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;
    use crate::core::query::{FilterOp, SortDirection};

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        };
        ListQuery {
            q: get("q"),
            category_id: get("category_id"),
            sort_location: get("sortLocation"),
            sort_title: get("sortTitle"),
            limit: get("limit"),
            page: get("page"),
        }
    }

    #[test]
    fn test_strict_page_requires_integers() {
        let err = query(&[("page", "1")]).strict_page().unwrap_err();
        assert_eq!(err.to_string(), "Limit Parameter format is invalid");

        let err = query(&[("limit", "5"), ("page", "x")]).strict_page().unwrap_err();
        assert_eq!(err.to_string(), "page Parameter format is invalid");

        let page = query(&[("limit", "5"), ("page", "2")]).strict_page().unwrap();
        assert_eq!(page, PageRequest::new(2, 5));
    }

    #[test]
    fn test_lenient_page_defaults() {
        let page = query(&[("limit", "abc")]).lenient_page(DEFAULT_COMMENT_LIMIT);
        assert_eq!(page, PageRequest::new(1, 50));
    }

    #[test]
    fn test_event_criteria() {
        let criteria = query(&[("q", "jazz"), ("category_id", "3"), ("sortLocation", "1")])
            .event_criteria()
            .unwrap();

        assert_eq!(criteria.filters.len(), 2);
        assert_eq!(criteria.filters[0].op, FilterOp::Like);
        assert_eq!(criteria.filters[1].value, FieldValue::Integer(3));
        assert_eq!(criteria.sorts[0].field, "title");
        assert_eq!(criteria.sorts[0].direction, SortDirection::Desc);
    }

    #[test]
    fn test_event_criteria_rejects_bad_category() {
        assert!(query(&[("category_id", "music")]).event_criteria().is_err());
    }

    #[test]
    fn test_unknown_sort_flag_is_ignored() {
        let criteria = query(&[("sortTitle", "2")]).category_criteria();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_user_events_sort_on_location() {
        let criteria = query(&[("sortLocation", "0")]).user_event_criteria(7);
        assert_eq!(criteria.sorts[0].field, "location");
        assert_eq!(criteria.filters[0].field, "user_id");
    }
}
