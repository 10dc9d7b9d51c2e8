//! HTTP handlers, one module per resource
//!
//! Handlers parse the request, call a service and wrap the result in an
//! [`Envelope`](super::response::Envelope). Business rules live in the
//! services.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod events;
pub mod memberships;
pub mod users;

use super::response::{ApiError, Links};
use crate::core::error::AppError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;

/// Unwrap a JSON body, turning a malformed payload into an enveloped 400
pub(crate) fn body<T>(
    payload: Result<Json<T>, JsonRejection>,
    links: &Links,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected request body");
            Err(ApiError::new(
                AppError::bad_request(rejection.body_text()),
                links.clone(),
            ))
        }
    }
}

/// Data returned by delete endpoints
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: u64,
}
