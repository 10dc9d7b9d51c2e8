use super::{Deleted, body};
use crate::entities::EventResponse;
use crate::server::extract::AuthUser;
use crate::server::host::AppState;
use crate::server::params::{ListQuery, parse_id};
use crate::server::response::{ApiResult, Envelope, Links, ResultExt};
use crate::services::EventRequest;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};

const EVENTS: &str = "/api/events";

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<EventResponse>> {
    let links = Links::new(state.base_url(), EVENTS);

    let page = query.strict_page().with_links(&links)?;
    let criteria = query.event_criteria().with_links(&links)?;
    let list = state.events.list(page, &criteria).await.with_links(&links)?;

    let links = links.paginated(EVENTS, &list.pagination);
    Ok(Envelope::ok(list.items, links).with_pagination(list.pagination))
}

/// Events owned by one user
pub async fn index_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<EventResponse>> {
    let path = format!("/api/users/{}/events", user_id);
    let links = Links::new(state.base_url(), &path);

    let user_id = parse_id(&user_id).with_links(&links)?;
    let page = query.strict_page().with_links(&links)?;
    let criteria = query.user_event_criteria(user_id);
    let list = state.events.list(page, &criteria).await.with_links(&links)?;

    let links = links.paginated(&path, &list.pagination);
    Ok(Envelope::ok(list.items, links).with_pagination(list.pagination))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EventResponse> {
    let links = Links::new(state.base_url(), &format!("{}/{}", EVENTS, id));

    let id = parse_id(&id).with_links(&links)?;
    let event = state.events.find(id).await.with_links(&links)?;

    Ok(Envelope::ok(event, links))
}

pub async fn store(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> ApiResult<EventResponse> {
    let links = Links::new(state.base_url(), EVENTS);

    let request = body(payload, &links)?;
    let event = state
        .events
        .create(auth.user_id, request)
        .await
        .with_links(&links)?;

    let links = Links::new(state.base_url(), &format!("{}/{}", EVENTS, event.id));
    Ok(Envelope::ok(event, links))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> ApiResult<EventResponse> {
    let links = Links::new(state.base_url(), &format!("{}/{}", EVENTS, id));

    let id = parse_id(&id).with_links(&links)?;
    let request = body(payload, &links)?;
    let event = state
        .events
        .update(auth.user_id, id, request)
        .await
        .with_links(&links)?;

    Ok(Envelope::ok(event, links))
}

pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Deleted> {
    let links = Links::new(state.base_url(), EVENTS);

    let id = parse_id(&id).with_links(&links)?;
    state
        .events
        .delete(auth.user_id, id)
        .await
        .with_links(&links)?;

    Ok(Envelope::ok(Deleted { id }, links))
}
