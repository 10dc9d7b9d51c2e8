//! # Tupulung
//!
//! REST backend for an event platform. Users register, publish events under
//! categories, join and like events and comment on them.
//!
//! ## Layers
//!
//! - **core**: records, query criteria, pagination, membership store
//!   contract, errors and auth collaborators
//! - **entities**: users, categories, events and comments
//! - **storage**: in-memory stores (default) and MySQL stores (`mysql` feature)
//! - **services**: business rules, one service per resource
//! - **server**: axum routes, extractors and the response envelope
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tupulung::prelude::*;
//!
//! let config = Arc::new(AppConfig::load()?);
//! let state = AppState::new(config.clone(), Stores::in_memory());
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AppError, Criteria, FieldError, FieldValue, Filter, FilterOp, IntoFieldValue,
        MembershipError, MembershipStore, PageRequest, Pagination, Record, RecordStore, Relation,
        Sort, SortDirection, StoreError, TokenService,
    };

    // === Entities ===
    pub use crate::entities::{
        Category, CategoryResponse, Comment, CommentResponse, Event, EventResponse, User,
        UserResponse,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryMembershipStore, InMemoryRecordStore};
    #[cfg(feature = "mysql")]
    pub use crate::storage::{MysqlMembershipStore, MysqlRecordStore, ensure_schema};

    // === Services ===
    pub use crate::services::{ListPage, Stores, paginate};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, AuthUser, Envelope, Links, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
