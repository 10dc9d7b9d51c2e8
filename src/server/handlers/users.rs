use super::{Deleted, body};
use crate::entities::UserResponse;
use crate::server::extract::AuthUser;
use crate::server::host::AppState;
use crate::server::params::parse_id;
use crate::server::response::{ApiResult, Envelope, Links, ResultExt};
use crate::services::{AuthResponse, UserRequest, UserUpdateRequest};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

fn user_path(id: &str) -> String {
    format!("/api/users/{}", id)
}

pub async fn store(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let links = Links::new(state.base_url(), "/api/users");

    let request = body(payload, &links)?;
    let registered = state.users.create(request).await.with_links(&links)?;

    let links = Links::new(state.base_url(), &user_path(&registered.user.id.to_string()));
    Ok(Envelope::ok(registered, links))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    let links = Links::new(state.base_url(), &user_path(&id));

    let id = parse_id(&id).with_links(&links)?;
    let user = state.users.find(id).await.with_links(&links)?;

    Ok(Envelope::ok(user, links))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UserUpdateRequest>, JsonRejection>,
) -> ApiResult<UserResponse> {
    let links = Links::new(state.base_url(), &user_path(&id));

    let id = parse_id(&id).with_links(&links)?;
    let request = body(payload, &links)?;
    let user = state
        .users
        .update(auth.user_id, id, request)
        .await
        .with_links(&links)?;

    Ok(Envelope::ok(user, links))
}

pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Deleted> {
    let links = Links::new(state.base_url(), &user_path(&id));

    let id = parse_id(&id).with_links(&links)?;
    state.users.delete(auth.user_id, id).await.with_links(&links)?;

    Ok(Envelope::ok(Deleted { id }, links))
}
