//! Domain records and their response views

mod macros;

pub mod category;
pub mod comment;
pub mod event;
pub mod user;

pub use category::{Category, CategoryResponse};
pub use comment::{Comment, CommentResponse};
pub use event::{Event, EventResponse, parse_event_date};
pub use user::{User, UserResponse};
