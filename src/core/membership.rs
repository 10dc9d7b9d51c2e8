//! User ↔ event associations: participation and likes

use crate::core::error::{MembershipError, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of association a user holds to an event
///
/// Each `(user, event, relation)` triple is either absent or present; a
/// user can join an event and like it independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Participation,
    Like,
}

impl Relation {
    /// Value stored in the `relation` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Participation => "participation",
            Relation::Like => "like",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "participation" => Some(Relation::Participation),
            "like" => Some(Relation::Like),
            _ => None,
        }
    }

    pub fn conflict_message(&self) -> &'static str {
        match self {
            Relation::Participation => "you have joined this event",
            Relation::Like => "you have liked this event",
        }
    }

    pub fn missing_message(&self) -> &'static str {
        match self {
            Relation::Participation => "you haven't joined this event",
            Relation::Like => "you haven't liked this event",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored association. Created on append, removed on delete, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: u64,
    pub relation: Relation,
    pub user_id: u64,
    pub event_id: u64,
    pub created_at: DateTime<Utc>,
}

/// Storage for memberships
///
/// Uniqueness of `(relation, user_id, event_id)` is enforced by the store
/// itself, so two concurrent appends for the same triple yield exactly one
/// success and one [`MembershipError::Conflict`].
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Add the association, or fail with `Conflict` if it already exists
    async fn append(
        &self,
        relation: Relation,
        user_id: u64,
        event_id: u64,
    ) -> Result<(), MembershipError>;

    /// Remove the association, or fail with `NotFound` if it is absent
    async fn delete(
        &self,
        relation: Relation,
        user_id: u64,
        event_id: u64,
    ) -> Result<(), MembershipError>;

    async fn exists(
        &self,
        relation: Relation,
        user_id: u64,
        event_id: u64,
    ) -> Result<bool, StoreError>;

    /// Number of users holding `relation` to the event
    async fn count_for_event(&self, relation: Relation, event_id: u64) -> Result<u64, StoreError>;

    /// User ids holding `relation` to the event, oldest membership first
    async fn users_for_event(
        &self,
        relation: Relation,
        event_id: u64,
    ) -> Result<Vec<u64>, StoreError>;

    /// Event ids the user holds `relation` to, oldest membership first
    async fn events_for_user(
        &self,
        relation: Relation,
        user_id: u64,
    ) -> Result<Vec<u64>, StoreError>;

    /// Drop every membership of an event (any relation)
    async fn delete_by_event(&self, event_id: u64) -> Result<u64, StoreError>;

    /// Drop every membership of a user (any relation)
    async fn delete_by_user(&self, user_id: u64) -> Result<u64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_round_trips_through_column_value() {
        for relation in [Relation::Participation, Relation::Like] {
            assert_eq!(Relation::parse(relation.as_str()), Some(relation));
        }
        assert_eq!(Relation::parse("follow"), None);
    }

    #[test]
    fn test_relation_messages() {
        assert_eq!(
            Relation::Participation.conflict_message(),
            "you have joined this event"
        );
        assert_eq!(Relation::Like.missing_message(), "you haven't liked this event");
    }
}
