//! Login and session lookup

use super::{Stores, require_user};
use crate::core::auth::{TokenService, verify_password};
use crate::core::error::AppError;
use crate::core::field::FieldValue;
use crate::entities::UserResponse;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the user it was issued for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Clone)]
pub struct AuthService {
    stores: Stores,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(stores: Stores, tokens: Arc<TokenService>) -> Self {
        Self { stores, tokens }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let user = self
            .stores
            .users
            .find_by("email", FieldValue::String(request.email.clone()))
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credential"))?;

        if !verify_password(&request.password, &user.password_hash) {
            tracing::warn!(user_id = user.id, "login with wrong password");
            return Err(AppError::unauthorized("Invalid password"));
        }

        let token = self
            .tokens
            .issue(user.id, &user.name, &user.email)
            .map_err(|e| {
                tracing::error!(user_id = user.id, error = %e, "token signing failed");
                AppError::internal("Error create token")
            })?;

        tracing::info!(user_id = user.id, "user logged in");
        Ok(AuthResponse {
            token,
            user: UserResponse::from(&user),
        })
    }

    /// Echo the caller's token with their current profile
    pub async fn me(&self, user_id: u64, token: String) -> Result<AuthResponse, AppError> {
        let user = require_user(&self.stores, user_id).await?;
        Ok(AuthResponse {
            token,
            user: UserResponse::from(&user),
        })
    }
}
