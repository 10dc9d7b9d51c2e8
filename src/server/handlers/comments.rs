use super::{Deleted, body};
use crate::entities::CommentResponse;
use crate::server::extract::AuthUser;
use crate::server::host::AppState;
use crate::server::params::{DEFAULT_COMMENT_LIMIT, ListQuery, parse_id};
use crate::server::response::{ApiResult, Envelope, Links, ResultExt};
use crate::services::CommentRequest;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};

fn event_comments(event_id: &str) -> String {
    format!("/api/events/{}/comments", event_id)
}

fn comment_path(id: &str) -> String {
    format!("/api/comments/{}", id)
}

pub async fn index(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<CommentResponse>> {
    let path = event_comments(&event_id);
    let links = Links::new(state.base_url(), &path);

    let event_id = parse_id(&event_id).with_links(&links)?;
    let page = query.lenient_page(DEFAULT_COMMENT_LIMIT);
    let list = state.comments.list(event_id, page).await.with_links(&links)?;

    let links = links.paginated(&path, &list.pagination);
    Ok(Envelope::ok(list.items, links).with_pagination(list.pagination))
}

pub async fn store(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> ApiResult<CommentResponse> {
    let links = Links::new(state.base_url(), &event_comments(&event_id));

    let event_id = parse_id(&event_id).with_links(&links)?;
    let request = body(payload, &links)?;
    let comment = state
        .comments
        .create(auth.user_id, event_id, request)
        .await
        .with_links(&links)?;

    Ok(Envelope::ok(comment, links))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> ApiResult<CommentResponse> {
    let links = Links::new(state.base_url(), &comment_path(&id));

    let id = parse_id(&id).with_links(&links)?;
    let request = body(payload, &links)?;
    let comment = state
        .comments
        .update(auth.user_id, id, request)
        .await
        .with_links(&links)?;

    Ok(Envelope::ok(comment, links))
}

pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Deleted> {
    let links = Links::new(state.base_url(), &comment_path(&id));

    let id = parse_id(&id).with_links(&links)?;
    state
        .comments
        .delete(auth.user_id, id)
        .await
        .with_links(&links)?;

    Ok(Envelope::ok(Deleted { id }, links))
}
