//! Registered accounts

use super::macros::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

impl_record!(
    /// A registered account. `password_hash` never leaves the service layer.
    User,
    "user",
    "users",
    filterable: ["email", "name"],
    sortable: ["name", "created_at"],
    {
        name: String,
        email: String,
        #[serde(skip_serializing)]
        password_hash: String,
        gender: String,
        address: String,
        avatar: String,
        dob: Option<DateTime<Utc>>,
        dark_theme: bool,
    }
);

/// Public view of a [`User`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub address: String,
    pub avatar: String,
    pub dob: Option<DateTime<Utc>>,
    pub dark_theme: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            gender: user.gender.clone(),
            address: user.address.clone(),
            avatar: user.avatar.clone(),
            dob: user.dob,
            dark_theme: user.dark_theme,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
