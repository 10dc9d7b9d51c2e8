//! Join/leave and like/unlike endpoints
//!
//! All four share one shape: resolve the caller, parse the event id, apply
//! one membership transition and answer with a short message.

use crate::core::membership::Relation;
use crate::server::extract::AuthUser;
use crate::server::host::AppState;
use crate::server::params::parse_id;
use crate::server::response::{ApiResult, Envelope, Links, ResultExt};
use axum::extract::{Path, State};

#[derive(Debug, Clone, Copy)]
enum Transition {
    Append,
    Delete,
}

fn success_message(relation: Relation, transition: Transition) -> &'static str {
    match (relation, transition) {
        (Relation::Participation, Transition::Append) => "Success joined this event",
        (Relation::Participation, Transition::Delete) => "Success leave this event",
        (Relation::Like, Transition::Append) => "Success like this event",
        (Relation::Like, Transition::Delete) => "Success dislike this event",
    }
}

fn resource(relation: Relation) -> &'static str {
    match relation {
        Relation::Participation => "participants",
        Relation::Like => "likes",
    }
}

async fn apply(
    state: AppState,
    auth: AuthUser,
    event_id: String,
    relation: Relation,
    transition: Transition,
) -> ApiResult<&'static str> {
    let links = Links::new(
        state.base_url(),
        &format!("/api/events/{}/{}", event_id, resource(relation)),
    );
    let event_id = parse_id(&event_id).with_links(&links)?;

    let result = match transition {
        Transition::Append => state.memberships.append(relation, auth.user_id, event_id).await,
        Transition::Delete => state.memberships.delete(relation, auth.user_id, event_id).await,
    };
    result.with_links(&links)?;

    Ok(Envelope::ok(success_message(relation, transition), links))
}

pub async fn join(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> ApiResult<&'static str> {
    apply(state, auth, event_id, Relation::Participation, Transition::Append).await
}

pub async fn leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> ApiResult<&'static str> {
    apply(state, auth, event_id, Relation::Participation, Transition::Delete).await
}

pub async fn like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> ApiResult<&'static str> {
    apply(state, auth, event_id, Relation::Like, Transition::Append).await
}

pub async fn unlike(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> ApiResult<&'static str> {
    apply(state, auth, event_id, Relation::Like, Transition::Delete).await
}
