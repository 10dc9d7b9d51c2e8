//! Axum extractors for authenticated requests

use super::host::AppState;
use super::response::{ApiError, Links};
use crate::core::error::AppError;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// The caller identified by a valid `Authorization: Bearer` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: u64,
    /// The raw token, echoed back by `/api/auth/me`
    pub token: String,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let links = Links::new(state.base_url(), parts.uri.path());

        let Some(token) = bearer_token(parts) else {
            return Err(ApiError::new(AppError::unauthorized("missing or malformed jwt"), links));
        };

        match state.tokens.verify(token) {
            Ok(claims) => Ok(AuthUser {
                user_id: claims.user_id,
                token: token.to_string(),
            }),
            Err(e) => {
                tracing::debug!(error = %e, "rejected bearer token");
                Err(ApiError::new(AppError::unauthorized("invalid or expired jwt"), links))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/events");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc.def"))), Some("abc.def"));
        assert_eq!(bearer_token(&parts(Some("bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(None)), None);
    }
}
