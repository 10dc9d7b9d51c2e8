//! Typed error handling for the tupulung backend
//!
//! Errors are layered the same way the code is:
//!
//! - [`StoreError`]: a record store failed; carries the HTTP code to report
//! - [`MembershipError`]: a participation/like transition was rejected
//! - [`RequestError`]: the request itself is unusable (bad input, no token)
//! - [`AppError`]: the top-level enum every service returns
//!
//! Dispatch is always a `match` on the variant. The HTTP layer turns an
//! [`AppError`] into the standard error envelope via [`AppError::to_response`].

use crate::core::membership::Relation;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Store Errors
// =============================================================================

/// A record store failure
///
/// `code` is the HTTP status the caller should report: 400 for a lookup that
/// found nothing, 500 for anything the backend itself failed on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub code: u16,
    pub message: String,
}

impl StoreError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// No live row of `resource` has the requested id
    pub fn not_found(resource: &str) -> Self {
        Self::new(
            400,
            format!("cannot get {} data with specified id", resource),
        )
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    /// A query named a column outside the record's allow-list
    pub fn unknown_field(resource: &str, field: &str) -> Self {
        Self::internal(format!("{} has no queryable field '{}'", resource, field))
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

// =============================================================================
// Membership Errors
// =============================================================================

/// Rejected membership transitions
///
/// Conflict and NotFound are client errors and are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// The user already holds this relation to the event
    Conflict(Relation),

    /// The user does not hold this relation to the event
    NotFound(Relation),

    /// The backing store failed
    Store(StoreError),
}

impl fmt::Display for MembershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipError::Conflict(relation) => f.write_str(relation.conflict_message()),
            MembershipError::NotFound(relation) => f.write_str(relation.missing_message()),
            MembershipError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MembershipError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MembershipError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl MembershipError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MembershipError::Conflict(_) | MembershipError::NotFound(_) => StatusCode::BAD_REQUEST,
            MembershipError::Store(e) => e.status_code(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            MembershipError::Conflict(_) => "MEMBERSHIP_CONFLICT",
            MembershipError::NotFound(_) => "MEMBERSHIP_NOT_FOUND",
            MembershipError::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<StoreError> for MembershipError {
    fn from(err: StoreError) -> Self {
        MembershipError::Store(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors caused by the shape of the incoming request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RequestError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::BadRequest(_) => "BAD_REQUEST",
            RequestError::Unauthorized(_) => "UNAUTHORIZED",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// One failed input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
        }
    }
}

/// Flatten `validator` output into per-field messages, sorted by field name
/// so responses are deterministic.
pub fn field_errors(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} field is invalid", field));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

// =============================================================================
// Application Error
// =============================================================================

/// The error type every service returns
#[derive(Debug)]
pub enum AppError {
    Store(StoreError),

    Membership(MembershipError),

    /// Input failed validation; one entry per offending field
    Validation(Vec<FieldError>),

    Request(RequestError),

    /// Unexpected failures (token signing, password hashing)
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Store(e) => write!(f, "{}", e),
            AppError::Membership(e) => write!(f, "{}", e),
            AppError::Validation(_) => f.write_str("Validation error"),
            AppError::Request(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Store(e) => Some(e),
            AppError::Membership(e) => Some(e),
            AppError::Request(e) => Some(e),
            AppError::Validation(_) | AppError::Internal(_) => None,
        }
    }
}

/// Body of every failed response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: u16,
    pub error: String,
    pub links: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::Request(RequestError::BadRequest(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Request(RequestError::Unauthorized(message.into()))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Store(e) => e.status_code(),
            AppError::Membership(e) => e.status_code(),
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Request(e) => e.status_code(),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Store(_) => "STORE_ERROR",
            AppError::Membership(e) => e.error_code(),
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Request(e) => e.error_code(),
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to the error envelope, attaching `links`
    pub fn to_response(&self, links: BTreeMap<String, String>) -> ErrorResponse {
        let errors = match self {
            AppError::Validation(errors) => Some(errors.clone()),
            _ => None,
        };

        ErrorResponse {
            status: "ERROR",
            code: self.status_code().as_u16(),
            error: self.to_string(),
            links,
            errors,
        }
    }

    /// Build the HTTP response, logging server-side failures
    pub fn into_response_with_links(self, links: BTreeMap<String, String>) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error_code = self.error_code(), "{}", self);
        } else {
            tracing::debug!(error_code = self.error_code(), "{}", self);
        }
        (status, Json(self.to_response(links))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with_links(BTreeMap::new())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<MembershipError> for AppError {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::Store(e) => AppError::Store(e),
            other => AppError::Membership(other),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        AppError::Request(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(field_errors(&err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
