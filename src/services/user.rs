//! Registration and profile management

use super::auth::AuthResponse;
use super::{Stores, require_user};
use crate::core::auth::{TokenService, hash_password};
use crate::core::entity::Record;
use crate::core::error::AppError;
use crate::core::field::FieldValue;
use crate::entities::{User, UserResponse, parse_event_date};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Registration payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UserRequest {
    #[validate(length(min = 1, message = "Name field must be filled"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email field must be filled"),
        email(message = "Email field is not an email")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password field must be filled"))]
    pub password: String,

    pub gender: String,
    pub address: String,
    pub avatar: String,

    /// `YYYY-MM-DD`
    pub dob: Option<String>,
}

/// Profile patch; empty strings and absent fields keep the stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserUpdateRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub address: String,
    pub avatar: String,
    pub dob: Option<String>,
    pub dark_theme: Option<bool>,
}

const DOB_INVALID: &str = "date of birth format is invalid";

fn parse_dob(dob: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match dob.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(None),
        Some(value) => parse_event_date(value)
            .map(Some)
            .ok_or_else(|| AppError::bad_request(DOB_INVALID)),
    }
}

fn hash(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| AppError::internal(e.to_string()))
}

#[derive(Clone)]
pub struct UserService {
    stores: Stores,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(stores: Stores, tokens: Arc<TokenService>) -> Self {
        Self { stores, tokens }
    }

    pub async fn find(&self, id: u64) -> Result<UserResponse, AppError> {
        let user = self.stores.users.find(id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Register a new account and sign the caller in
    pub async fn create(&self, request: UserRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;
        let dob = parse_dob(request.dob.as_deref())?;
        self.ensure_email_free(&request.email, None).await?;

        let user = User::new(
            request.name,
            request.email,
            hash(&request.password)?,
            request.gender,
            request.address,
            request.avatar,
            dob,
            false,
        );
        let user = self.stores.users.store(user).await?;

        let token = self
            .tokens
            .issue(user.id, &user.name, &user.email)
            .map_err(|_| AppError::internal("Error create token"))?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(AuthResponse {
            token,
            user: UserResponse::from(&user),
        })
    }

    /// Update the acting user's own profile
    pub async fn update(
        &self,
        acting_user: u64,
        id: u64,
        request: UserUpdateRequest,
    ) -> Result<UserResponse, AppError> {
        let mut user = self.own_account(acting_user, id).await?;

        if let Some(dob) = parse_dob(request.dob.as_deref())? {
            user.dob = Some(dob);
        }
        if !request.email.is_empty() && request.email != user.email {
            self.ensure_email_free(&request.email, Some(user.id)).await?;
            user.email = request.email;
        }
        if !request.password.is_empty() {
            user.password_hash = hash(&request.password)?;
        }
        if let Some(dark_theme) = request.dark_theme {
            user.dark_theme = dark_theme;
        }
        for (target, value) in [
            (&mut user.name, request.name),
            (&mut user.gender, request.gender),
            (&mut user.address, request.address),
            (&mut user.avatar, request.avatar),
        ] {
            if !value.is_empty() {
                *target = value;
            }
        }
        user.touch();

        let user = self.stores.users.update(user).await?;
        tracing::info!(user_id = user.id, "profile updated");
        Ok(UserResponse::from(&user))
    }

    /// Soft delete the acting user's own account and drop its memberships
    pub async fn delete(&self, acting_user: u64, id: u64) -> Result<(), AppError> {
        self.own_account(acting_user, id).await?;

        self.stores.users.delete(id).await?;
        let removed = self.stores.memberships.delete_by_user(id).await?;

        tracing::info!(user_id = id, memberships = removed, "account deleted");
        Ok(())
    }

    async fn own_account(&self, acting_user: u64, id: u64) -> Result<User, AppError> {
        if acting_user != id {
            tracing::warn!(acting_user, target_user = id, "rejected change to another account");
            return Err(AppError::unauthorized("Unauthorized user"));
        }
        require_user(&self.stores, id).await
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<u64>) -> Result<(), AppError> {
        let existing = self
            .stores
            .users
            .find_by("email", FieldValue::String(email.to_string()))
            .await?;

        match existing {
            Some(user) if Some(user.id) != owner => {
                Err(AppError::bad_request("Email is already registered"))
            }
            _ => Ok(()),
        }
    }
}
