//! Route table
//!
//! - `/api/auth`: login and current session
//! - `/api/users`: registration, profiles, a user's events
//! - `/api/events`: events plus their participants, likes and comments
//! - `/api/comments/{id}`: comment edits
//! - `/api/categories`: category CRUD
//! - `/health`: liveness

use super::handlers::{auth, categories, comments, events, memberships, users};
use super::host::AppState;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/users", post(users::store))
        .route(
            "/users/{id}",
            get(users::show).put(users::update).delete(users::destroy),
        )
        .route("/users/{id}/events", get(events::index_for_user))
        .route("/events", get(events::index).post(events::store))
        .route(
            "/events/{id}",
            get(events::show).put(events::update).delete(events::destroy),
        )
        .route(
            "/events/{id}/participants",
            post(memberships::join).delete(memberships::leave),
        )
        .route(
            "/events/{id}/likes",
            post(memberships::like).delete(memberships::unlike),
        )
        .route(
            "/events/{id}/comments",
            get(comments::index).post(comments::store),
        )
        .route(
            "/comments/{id}",
            put(comments::update).delete(comments::destroy),
        )
        .route("/categories", get(categories::index).post(categories::store))
        .route(
            "/categories/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::destroy),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tupulung"
    }))
}
