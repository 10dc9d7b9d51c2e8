//! Shared handler state
//!
//! Built once at startup from the configuration and a set of stores, then
//! cloned into every request.

use crate::config::AppConfig;
use crate::core::auth::TokenService;
use crate::services::{
    AuthService, CategoryService, CommentService, EventService, MembershipService, Stores,
    UserService,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub auth: AuthService,
    pub users: UserService,
    pub categories: CategoryService,
    pub events: EventService,
    pub comments: CommentService,
    pub memberships: MembershipService,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, stores: Stores) -> Self {
        let tokens = Arc::new(TokenService::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.token_ttl_hours,
        ));

        Self {
            auth: AuthService::new(stores.clone(), tokens.clone()),
            users: UserService::new(stores.clone(), tokens.clone()),
            categories: CategoryService::new(stores.clone()),
            events: EventService::new(stores.clone()),
            comments: CommentService::new(stores.clone()),
            memberships: MembershipService::new(stores),
            config,
            tokens,
        }
    }

    /// Base URL every link is built from
    pub fn base_url(&self) -> &str {
        &self.config.app.base_url
    }
}
