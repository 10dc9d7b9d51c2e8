//! Event listing, hydration and owner-only mutations

use super::{ListPage, RECORD_MISSING, Stores, paginate, require_user};
use crate::core::entity::Record;
use crate::core::error::AppError;
use crate::core::membership::Relation;
use crate::core::query::{Criteria, PageRequest};
use crate::entities::{CategoryResponse, Event, EventResponse, UserResponse, parse_event_date};
use serde::Deserialize;
use validator::Validate;

/// Create/update payload
///
/// On update, empty strings and a missing `category_id` leave the stored
/// value untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EventRequest {
    #[validate(length(min = 1, message = "Title field must be filled"))]
    pub title: String,

    #[validate(length(min = 1, message = "HostedBy field must be filled"))]
    pub hosted_by: String,

    pub cover: String,

    /// `YYYY-MM-DD`
    #[validate(length(min = 1, message = "DatetimeEvent field must be filled"))]
    pub datetime_event: String,

    #[validate(required(message = "CategoryID field must be filled"))]
    pub category_id: Option<u64>,

    #[validate(length(min = 1, message = "Location field must be filled"))]
    pub location: String,

    #[validate(length(min = 1, message = "Description field must be filled"))]
    pub description: String,
}

const NOT_OWNER: &str = "Cannot update event that belongs to someone else";
const DATE_INVALID: &str = "date time event format is invalid";

#[derive(Clone)]
pub struct EventService {
    stores: Stores,
}

impl EventService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// One page of events, each hydrated with likes and participants
    pub async fn list(
        &self,
        page: PageRequest,
        criteria: &Criteria,
    ) -> Result<ListPage<EventResponse>, AppError> {
        let events = paginate(self.stores.events.as_ref(), page, criteria).await?;

        let mut items = Vec::with_capacity(events.items.len());
        for event in &events.items {
            items.push(self.hydrate(event).await);
        }

        Ok(ListPage {
            items,
            pagination: events.pagination,
        })
    }

    pub async fn find(&self, id: u64) -> Result<EventResponse, AppError> {
        let event = self.stores.events.find(id).await?;
        Ok(self.hydrate(&event).await)
    }

    pub async fn create(
        &self,
        user_id: u64,
        request: EventRequest,
    ) -> Result<EventResponse, AppError> {
        request.validate()?;
        let user = require_user(&self.stores, user_id).await?;

        let datetime_event = parse_event_date(&request.datetime_event)
            .ok_or_else(|| AppError::bad_request(DATE_INVALID))?;
        let category_id = request.category_id.unwrap_or_default();
        self.stores.categories.find(category_id).await?;

        let event = Event::new(
            request.title,
            request.hosted_by,
            request.cover,
            user.id,
            category_id,
            datetime_event,
            request.location,
            request.description,
        );
        let event = self.stores.events.store(event).await?;

        tracing::info!(event_id = event.id, user_id, "event created");
        Ok(self.hydrate(&event).await)
    }

    pub async fn update(
        &self,
        user_id: u64,
        id: u64,
        request: EventRequest,
    ) -> Result<EventResponse, AppError> {
        let mut event = self.owned_event(user_id, id).await?;

        if !request.datetime_event.is_empty() {
            event.datetime_event = parse_event_date(&request.datetime_event)
                .ok_or_else(|| AppError::bad_request(DATE_INVALID))?;
        }
        if let Some(category_id) = request.category_id {
            self.stores.categories.find(category_id).await?;
            event.category_id = category_id;
        }
        for (target, value) in [
            (&mut event.title, request.title),
            (&mut event.hosted_by, request.hosted_by),
            (&mut event.cover, request.cover),
            (&mut event.location, request.location),
            (&mut event.description, request.description),
        ] {
            if !value.is_empty() {
                *target = value;
            }
        }
        event.touch();

        let event = self.stores.events.update(event).await?;

        tracing::info!(event_id = event.id, user_id, "event updated");
        Ok(self.hydrate(&event).await)
    }

    /// Soft delete the event and drop its memberships
    pub async fn delete(&self, user_id: u64, id: u64) -> Result<(), AppError> {
        self.owned_event(user_id, id).await?;

        self.stores.events.delete(id).await?;
        let removed = self.stores.memberships.delete_by_event(id).await?;

        tracing::info!(event_id = id, user_id, memberships = removed, "event deleted");
        Ok(())
    }

    async fn owned_event(&self, user_id: u64, id: u64) -> Result<Event, AppError> {
        let event = self
            .stores
            .events
            .find(id)
            .await
            .map_err(|_| AppError::bad_request(RECORD_MISSING))?;
        let user = require_user(&self.stores, user_id).await?;

        if event.user_id != user.id {
            tracing::warn!(event_id = id, user_id, "rejected change to someone else's event");
            return Err(AppError::unauthorized(NOT_OWNER));
        }

        Ok(event)
    }

    /// Attach owner, category, like count and participants.
    ///
    /// Aggregates are best effort: a failed count reads as zero and
    /// unresolvable users are skipped.
    async fn hydrate(&self, event: &Event) -> EventResponse {
        let mut response = EventResponse::new(event);

        response.likes = match self
            .stores
            .memberships
            .count_for_event(Relation::Like, event.id)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(event_id = event.id, error = %e, "like count unavailable");
                0
            }
        };

        let participant_ids = self
            .stores
            .memberships
            .users_for_event(Relation::Participation, event.id)
            .await
            .unwrap_or_default();
        for user_id in participant_ids {
            if let Ok(user) = self.stores.users.find(user_id).await {
                response.participants.push(UserResponse::from(&user));
            }
        }

        response.user = self
            .stores
            .users
            .find(event.user_id)
            .await
            .ok()
            .map(|user| UserResponse::from(&user));
        response.category = self
            .stores
            .categories
            .find(event.category_id)
            .await
            .ok()
            .map(|category| CategoryResponse::from(&category));

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{Filter, Sort};
    use crate::entities::{Category, User};

    async fn setup() -> (EventService, Stores, u64, u64) {
        let stores = Stores::in_memory();
        let owner = stores
            .users
            .store(User::new(
                "Owner".to_string(),
                "owner@example.com".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                None,
                false,
            ))
            .await
            .unwrap();
        let category = stores
            .categories
            .store(Category::new("Music".to_string()))
            .await
            .unwrap();

        (EventService::new(stores.clone()), stores, owner.id, category.id)
    }

    fn request(title: &str, category_id: u64) -> EventRequest {
        EventRequest {
            title: title.to_string(),
            hosted_by: "Host".to_string(),
            cover: String::new(),
            datetime_event: "2024-08-17".to_string(),
            category_id: Some(category_id),
            location: "Jakarta".to_string(),
            description: "desc".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_validates_required_fields() {
        let (service, _, owner, _) = setup().await;

        let err = service.create(owner, EventRequest::default()).await.unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.error == "Title field must be filled"));
                assert!(errors.iter().any(|e| e.field == "category_id"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_bad_date() {
        let (service, _, owner, category) = setup().await;
        let mut req = request("Gig", category);
        req.datetime_event = "17-08-2024".to_string();

        let err = service.create(owner, req).await.unwrap_err();
        assert_eq!(err.to_string(), DATE_INVALID);
    }

    #[tokio::test]
    async fn test_create_hydrates_owner_and_category() {
        let (service, _, owner, category) = setup().await;

        let created = service.create(owner, request("Gig", category)).await.unwrap();
        assert_eq!(created.user.as_ref().map(|u| u.id), Some(owner));
        assert_eq!(created.category.as_ref().map(|c| c.title.as_str()), Some("Music"));
        assert_eq!(created.likes, 0);
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_unauthorized() {
        let (service, stores, owner, category) = setup().await;
        let created = service.create(owner, request("Gig", category)).await.unwrap();
        let intruder = stores
            .users
            .store(User::new(
                "Other".to_string(),
                "other@example.com".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                None,
                false,
            ))
            .await
            .unwrap();

        let err = service
            .update(intruder.id, created.id, EventRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code().as_u16(), 401);
        assert_eq!(err.to_string(), NOT_OWNER);
    }

    #[tokio::test]
    async fn test_update_ignores_empty_fields() {
        let (service, _, owner, category) = setup().await;
        let created = service.create(owner, request("Gig", category)).await.unwrap();

        let patch = EventRequest {
            location: "Bandung".to_string(),
            ..EventRequest::default()
        };
        let updated = service.update(owner, created.id, patch).await.unwrap();

        assert_eq!(updated.title, "Gig");
        assert_eq!(updated.location, "Bandung");
    }

    #[tokio::test]
    async fn test_list_sorts_and_counts_likes() {
        let (service, stores, owner, category) = setup().await;
        for title in ["Alpha", "Charlie", "Bravo"] {
            service.create(owner, request(title, category)).await.unwrap();
        }
        stores.memberships.append(Relation::Like, owner, 2).await.unwrap();

        let criteria = Criteria::new()
            .filter(Filter::eq("category_id", category))
            .sort(Sort::desc("title"));
        let page = service.list(PageRequest::new(1, 10), &criteria).await.unwrap();

        let titles: Vec<&str> = page.items.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Charlie", "Bravo", "Alpha"]);
        assert_eq!(page.items[0].likes, 1);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_memberships() {
        let (service, stores, owner, category) = setup().await;
        let created = service.create(owner, request("Gig", category)).await.unwrap();
        stores
            .memberships
            .append(Relation::Participation, owner, created.id)
            .await
            .unwrap();

        service.delete(owner, created.id).await.unwrap();

        assert!(service.find(created.id).await.is_err());
        assert_eq!(
            stores
                .memberships
                .count_for_event(Relation::Participation, created.id)
                .await
                .unwrap(),
            0
        );
    }
}
