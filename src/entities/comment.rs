//! Comments posted on events

use super::macros::impl_record;
use super::user::UserResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

impl_record!(
    Comment,
    "comment",
    "comments",
    filterable: ["event_id", "user_id"],
    sortable: ["created_at"],
    {
        event_id: u64,
        user_id: u64,
        comment: String,
    }
);

/// A comment with its author embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: u64,
    pub event_id: u64,
    pub user_id: u64,
    pub user: Option<UserResponse>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(comment: &Comment, user: Option<UserResponse>) -> Self {
        Self {
            id: comment.id,
            event_id: comment.event_id,
            user_id: comment.user_id,
            user,
            comment: comment.comment.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
