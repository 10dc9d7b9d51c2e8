use super::body;
use crate::server::extract::AuthUser;
use crate::server::host::AppState;
use crate::server::response::{ApiResult, Envelope, Links, ResultExt};
use crate::services::{AuthResponse, LoginRequest};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let links = Links::new(state.base_url(), "/api/auth");

    let request = body(payload, &links)?;
    let auth = state.auth.login(request).await.with_links(&links)?;

    Ok(Envelope::ok(auth, links))
}

pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<AuthResponse> {
    let links = Links::new(state.base_url(), "/api/auth/me");

    let current = state
        .auth
        .me(auth.user_id, auth.token)
        .await
        .with_links(&links)?;

    Ok(Envelope::ok(current, links))
}
