//! Application services: the layer between HTTP handlers and stores
//!
//! Services own the business rules (ownership checks, validation, response
//! hydration) and return [`AppError`] so handlers only translate to HTTP.

pub mod auth;
pub mod category;
pub mod comment;
pub mod event;
pub mod membership;
pub mod user;

pub use auth::{AuthResponse, AuthService, LoginRequest};
pub use category::{CategoryRequest, CategoryService};
pub use comment::{CommentRequest, CommentService};
pub use event::{EventRequest, EventService};
pub use membership::MembershipService;
pub use user::{UserRequest, UserService, UserUpdateRequest};

use crate::core::entity::Record;
use crate::core::error::AppError;
use crate::core::membership::MembershipStore;
use crate::core::query::{Criteria, PageRequest, Pagination};
use crate::core::store::RecordStore;
use crate::entities::{Category, Comment, Event, User};
use crate::storage::{InMemoryMembershipStore, InMemoryRecordStore};
use std::sync::Arc;

/// Every store the services need, behind trait objects
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn RecordStore<User>>,
    pub categories: Arc<dyn RecordStore<Category>>,
    pub events: Arc<dyn RecordStore<Event>>,
    pub comments: Arc<dyn RecordStore<Comment>>,
    pub memberships: Arc<dyn MembershipStore>,
}

impl Stores {
    /// Fresh, empty in-memory stores
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryRecordStore::<User>::new()),
            categories: Arc::new(InMemoryRecordStore::<Category>::new()),
            events: Arc::new(InMemoryRecordStore::<Event>::new()),
            comments: Arc::new(InMemoryRecordStore::<Comment>::new()),
            memberships: Arc::new(InMemoryMembershipStore::new()),
        }
    }

    /// Stores over a MySQL pool. Call `storage::ensure_schema` first.
    #[cfg(feature = "mysql")]
    pub fn mysql(pool: sqlx::MySqlPool) -> Self {
        use crate::storage::{MysqlMembershipStore, MysqlRecordStore};

        Self {
            users: Arc::new(MysqlRecordStore::<User>::new(pool.clone())),
            categories: Arc::new(MysqlRecordStore::<Category>::new(pool.clone())),
            events: Arc::new(MysqlRecordStore::<Event>::new(pool.clone())),
            comments: Arc::new(MysqlRecordStore::<Comment>::new(pool.clone())),
            memberships: Arc::new(MysqlMembershipStore::new(pool)),
        }
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Run `find_all` then `count_all` for one page.
///
/// The first failure wins and nothing partial is returned.
pub async fn paginate<T: Record>(
    store: &dyn RecordStore<T>,
    page: PageRequest,
    criteria: &Criteria,
) -> Result<ListPage<T>, AppError> {
    let items = store
        .find_all(page.fetch_limit(), page.offset(), criteria)
        .await?;
    let total = store.count_all(criteria).await?;

    Ok(ListPage {
        items,
        pagination: page.pagination(total),
    })
}

/// The acting user must exist; a dangling token is a 400
pub(crate) async fn require_user(stores: &Stores, user_id: u64) -> Result<User, AppError> {
    stores
        .users
        .find(user_id)
        .await
        .map_err(|_| AppError::bad_request("No user matched with this authenticated user"))
}

pub(crate) const RECORD_MISSING: &str = "The requested ID doesn't match with any record";
