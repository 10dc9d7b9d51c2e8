//! Events: the central resource users join, like and comment on

use super::category::CategoryResponse;
use super::macros::impl_record;
use super::user::UserResponse;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

impl_record!(
    Event,
    "event",
    "events",
    filterable: ["title", "category_id", "user_id", "location"],
    sortable: ["title", "location", "datetime_event", "created_at"],
    {
        title: String,
        hosted_by: String,
        cover: String,
        user_id: u64,
        category_id: u64,
        datetime_event: DateTime<Utc>,
        location: String,
        description: String,
    }
);

/// Parse the `YYYY-MM-DD` form used by clients into midnight UTC
pub fn parse_event_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// An event with its owner, category and membership aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: u64,
    pub title: String,
    pub hosted_by: String,
    pub cover: String,
    pub datetime_event: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub category_id: u64,
    pub category: Option<CategoryResponse>,
    pub user_id: u64,
    pub user: Option<UserResponse>,
    pub likes: u64,
    pub participants: Vec<UserResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventResponse {
    /// Bare response; relations are filled in by the event service
    pub fn new(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            hosted_by: event.hosted_by.clone(),
            cover: event.cover.clone(),
            datetime_event: event.datetime_event,
            location: event.location.clone(),
            description: event.description.clone(),
            category_id: event.category_id,
            category: None,
            user_id: event.user_id,
            user: None,
            likes: 0,
            participants: Vec::new(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}
