//! HTTP surface: shared state, extractors, envelope and routes

pub mod extract;
pub mod handlers;
pub mod host;
pub mod params;
pub mod response;
pub mod router;

pub use extract::AuthUser;
pub use host::AppState;
pub use response::{ApiError, Envelope, Links};
pub use router::build_router;
