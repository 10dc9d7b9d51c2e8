//! Comments on events

use super::{ListPage, RECORD_MISSING, Stores, paginate, require_user};
use crate::core::entity::Record;
use crate::core::error::AppError;
use crate::core::query::{Criteria, Filter, PageRequest, Sort};
use crate::entities::{Comment, CommentResponse, UserResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CommentRequest {
    #[validate(length(min = 1, message = "Comment field must be filled"))]
    pub comment: String,
}

#[derive(Clone)]
pub struct CommentService {
    stores: Stores,
}

impl CommentService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Comments of one event, oldest first
    pub async fn list(
        &self,
        event_id: u64,
        page: PageRequest,
    ) -> Result<ListPage<CommentResponse>, AppError> {
        let criteria = Criteria::new()
            .filter(Filter::eq("event_id", event_id))
            .sort(Sort::asc("created_at"));
        let comments = paginate(self.stores.comments.as_ref(), page, &criteria).await?;

        let mut items = Vec::with_capacity(comments.items.len());
        for comment in &comments.items {
            items.push(self.with_author(comment).await);
        }

        Ok(ListPage {
            items,
            pagination: comments.pagination,
        })
    }

    pub async fn find(&self, id: u64) -> Result<CommentResponse, AppError> {
        let comment = self.stores.comments.find(id).await?;
        Ok(self.with_author(&comment).await)
    }

    pub async fn create(
        &self,
        user_id: u64,
        event_id: u64,
        request: CommentRequest,
    ) -> Result<CommentResponse, AppError> {
        request.validate()?;
        let user = require_user(&self.stores, user_id).await?;
        self.stores
            .events
            .find(event_id)
            .await
            .map_err(|_| AppError::bad_request("Event is not exist"))?;

        let comment = self
            .stores
            .comments
            .store(Comment::new(event_id, user.id, request.comment))
            .await?;

        tracing::info!(comment_id = comment.id, event_id, user_id, "comment posted");
        Ok(CommentResponse::new(&comment, Some(UserResponse::from(&user))))
    }

    pub async fn update(
        &self,
        user_id: u64,
        id: u64,
        request: CommentRequest,
    ) -> Result<CommentResponse, AppError> {
        request.validate()?;
        let mut comment = self
            .authored_comment(
                user_id,
                id,
                "Unauthorized user, cannot update someone else's comment",
            )
            .await?;

        comment.comment = request.comment;
        comment.touch();
        let comment = self.stores.comments.update(comment).await?;

        Ok(self.with_author(&comment).await)
    }

    pub async fn delete(&self, user_id: u64, id: u64) -> Result<(), AppError> {
        self.authored_comment(
            user_id,
            id,
            "Unauthorized user, cannot Delete someone else's comment",
        )
        .await?;
        self.stores.comments.delete(id).await?;

        tracing::info!(comment_id = id, user_id, "comment deleted");
        Ok(())
    }

    async fn authored_comment(
        &self,
        user_id: u64,
        id: u64,
        denied: &'static str,
    ) -> Result<Comment, AppError> {
        let comment = self
            .stores
            .comments
            .find(id)
            .await
            .map_err(|_| AppError::bad_request(RECORD_MISSING))?;

        if comment.user_id != user_id {
            return Err(AppError::unauthorized(denied));
        }
        Ok(comment)
    }

    async fn with_author(&self, comment: &Comment) -> CommentResponse {
        let author = self
            .stores
            .users
            .find(comment.user_id)
            .await
            .ok()
            .map(|user| UserResponse::from(&user));
        CommentResponse::new(comment, author)
    }
}
