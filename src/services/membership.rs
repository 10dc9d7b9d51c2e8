//! Joining, leaving, liking and unliking events

use super::{Stores, require_user};
use crate::core::error::{AppError, MembershipError};
use crate::core::membership::Relation;

#[derive(Clone)]
pub struct MembershipService {
    stores: Stores,
}

impl MembershipService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Record `relation` between the user and the event.
    ///
    /// Both ends must exist. A second append of the same triple fails with
    /// a conflict and leaves the store unchanged.
    pub async fn append(
        &self,
        relation: Relation,
        user_id: u64,
        event_id: u64,
    ) -> Result<(), AppError> {
        self.check_ends(user_id, event_id).await?;

        match self.stores.memberships.append(relation, user_id, event_id).await {
            Ok(()) => {
                tracing::info!(%relation, user_id, event_id, "membership added");
                Ok(())
            }
            Err(e) => Err(reject(e, relation, user_id, event_id)),
        }
    }

    /// Remove `relation` between the user and the event
    pub async fn delete(
        &self,
        relation: Relation,
        user_id: u64,
        event_id: u64,
    ) -> Result<(), AppError> {
        self.check_ends(user_id, event_id).await?;

        match self.stores.memberships.delete(relation, user_id, event_id).await {
            Ok(()) => {
                tracing::info!(%relation, user_id, event_id, "membership removed");
                Ok(())
            }
            Err(e) => Err(reject(e, relation, user_id, event_id)),
        }
    }

    async fn check_ends(&self, user_id: u64, event_id: u64) -> Result<(), AppError> {
        require_user(&self.stores, user_id).await?;
        self.stores
            .events
            .find(event_id)
            .await
            .map_err(|_| AppError::bad_request("Event is not exist"))?;
        Ok(())
    }
}

fn reject(err: MembershipError, relation: Relation, user_id: u64, event_id: u64) -> AppError {
    if !matches!(err, MembershipError::Store(_)) {
        tracing::warn!(%relation, user_id, event_id, "{}", err);
    }
    err.into()
}
