use super::{Deleted, body};
use crate::entities::CategoryResponse;
use crate::server::host::AppState;
use crate::server::params::{ListQuery, parse_id};
use crate::server::response::{ApiResult, Envelope, Links, ResultExt};
use crate::services::CategoryRequest;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};

const CATEGORIES: &str = "/api/categories";

fn category_path(id: &str) -> String {
    format!("{}/{}", CATEGORIES, id)
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<CategoryResponse>> {
    let links = Links::new(state.base_url(), CATEGORIES);

    let page = query.strict_page().with_links(&links)?;
    let criteria = query.category_criteria();
    let list = state.categories.list(page, &criteria).await.with_links(&links)?;

    let links = links.paginated(CATEGORIES, &list.pagination);
    Ok(Envelope::ok(list.items, links).with_pagination(list.pagination))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CategoryResponse> {
    let links = Links::new(state.base_url(), &category_path(&id));

    let id = parse_id(&id).with_links(&links)?;
    let category = state.categories.find(id).await.with_links(&links)?;

    Ok(Envelope::ok(category, links))
}

pub async fn store(
    State(state): State<AppState>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<CategoryResponse> {
    let links = Links::new(state.base_url(), CATEGORIES);

    let request = body(payload, &links)?;
    let category = state.categories.create(request).await.with_links(&links)?;

    let links = Links::new(state.base_url(), &category_path(&category.id.to_string()));
    Ok(Envelope::ok(category, links))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<CategoryResponse> {
    let links = Links::new(state.base_url(), &category_path(&id));

    let id = parse_id(&id).with_links(&links)?;
    let request = body(payload, &links)?;
    let category = state.categories.update(id, request).await.with_links(&links)?;

    Ok(Envelope::ok(category, links))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Deleted> {
    let links = Links::new(state.base_url(), CATEGORIES);

    let id = parse_id(&id).with_links(&links)?;
    state.categories.delete(id).await.with_links(&links)?;

    Ok(Envelope::ok(Deleted { id }, links))
}
