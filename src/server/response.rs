//! Response envelope and HATEOAS links
//!
//! Every response, success or failure, carries `status`, `code`, `error` and
//! `links`. List responses add `pagination`.

use crate::core::error::AppError;
use crate::core::query::Pagination;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;

/// Successful response body
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub code: u16,
    pub error: Option<String>,
    pub links: BTreeMap<String, String>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T, links: Links) -> Self {
        Self {
            status: "OK",
            code: StatusCode::OK.as_u16(),
            error: None,
            links: links.into_map(),
            data,
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Link map rooted at the configured base URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    base_url: String,
    links: BTreeMap<String, String>,
}

impl Links {
    /// Links with only `self` set to `base_url` + `path`
    pub fn new(base_url: &str, path: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let mut links = BTreeMap::new();
        links.insert("self".to_string(), format!("{}{}", base_url, path));
        Self { base_url, links }
    }

    /// `first`/`last`/`prev`/`next` for a list at `path`.
    ///
    /// `prev` only appears past the first page and `next` only before the
    /// last one.
    pub fn paginated(mut self, path: &str, pagination: &Pagination) -> Self {
        let page_url = |page: i64| {
            format!(
                "{}{}?limit={}&page={}",
                self.base_url, path, pagination.limit, page
            )
        };

        let mut extra = vec![
            ("first", page_url(1)),
            ("last", page_url(pagination.total_pages as i64)),
        ];
        if pagination.has_prev() {
            extra.push(("prev", page_url(pagination.page - 1)));
        }
        if pagination.has_next() {
            extra.push(("next", page_url(pagination.page + 1)));
        }

        for (name, url) in extra {
            self.links.insert(name.to_string(), url);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.links
    }
}

/// An [`AppError`] rendered with the links of the request that failed
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub links: Links,
}

impl ApiError {
    pub fn new(error: impl Into<AppError>, links: Links) -> Self {
        Self {
            error: error.into(),
            links,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            links: Links::default(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.error.into_response_with_links(self.links.into_map())
    }
}

/// Attach request links to a service error
pub trait ResultExt<T> {
    fn with_links(self, links: &Links) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn with_links(self, links: &Links) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::new(error, links.clone()))
    }
}

pub type ApiResult<T> = Result<Envelope<T>, ApiError>;
