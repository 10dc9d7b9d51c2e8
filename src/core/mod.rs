//! Core module containing the fundamental traits and types of the backend

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod membership;
pub mod query;
pub mod store;

pub use auth::{Claims, TokenService};
pub use entity::Record;
pub use error::{AppError, FieldError, MembershipError, RequestError, StoreError};
pub use field::{FieldValue, IntoFieldValue, LikePattern};
pub use membership::{Membership, MembershipStore, Relation};
pub use query::{Criteria, Filter, FilterOp, PageRequest, Pagination, Sort, SortDirection};
pub use store::RecordStore;
