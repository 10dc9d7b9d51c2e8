//! Event categories

use super::macros::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

impl_record!(
    Category,
    "category",
    "categories",
    filterable: ["title"],
    sortable: ["title", "created_at"],
    {
        title: String,
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: u64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            title: category.title.clone(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
