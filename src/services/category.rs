//! Category management

use super::{ListPage, RECORD_MISSING, Stores, paginate};
use crate::core::entity::Record;
use crate::core::error::AppError;
use crate::core::query::{Criteria, PageRequest};
use crate::entities::{Category, CategoryResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CategoryRequest {
    #[validate(length(min = 1, message = "Title field must be filled"))]
    pub title: String,
}

#[derive(Clone)]
pub struct CategoryService {
    stores: Stores,
}

impl CategoryService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub async fn list(
        &self,
        page: PageRequest,
        criteria: &Criteria,
    ) -> Result<ListPage<CategoryResponse>, AppError> {
        let categories = paginate(self.stores.categories.as_ref(), page, criteria).await?;

        Ok(ListPage {
            items: categories.items.iter().map(CategoryResponse::from).collect(),
            pagination: categories.pagination,
        })
    }

    pub async fn find(&self, id: u64) -> Result<CategoryResponse, AppError> {
        let category = self.stores.categories.find(id).await?;
        Ok(CategoryResponse::from(&category))
    }

    pub async fn create(&self, request: CategoryRequest) -> Result<CategoryResponse, AppError> {
        request.validate()?;

        let category = self
            .stores
            .categories
            .store(Category::new(request.title))
            .await?;

        tracing::info!(category_id = category.id, "category created");
        Ok(CategoryResponse::from(&category))
    }

    pub async fn update(
        &self,
        id: u64,
        request: CategoryRequest,
    ) -> Result<CategoryResponse, AppError> {
        request.validate()?;
        let mut category = self
            .stores
            .categories
            .find(id)
            .await
            .map_err(|_| AppError::bad_request(RECORD_MISSING))?;

        category.title = request.title;
        category.touch();
        let category = self.stores.categories.update(category).await?;

        Ok(CategoryResponse::from(&category))
    }

    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        self.stores
            .categories
            .delete(id)
            .await
            .map_err(|_| AppError::bad_request(RECORD_MISSING))?;

        tracing::info!(category_id = id, "category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{Filter, Sort};

    fn titled(title: &str) -> CategoryRequest {
        CategoryRequest {
            title: title.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_title_substring() {
        let service = CategoryService::new(Stores::in_memory());
        for title in ["Music", "Sports", "Live Music"] {
            service.create(titled(title)).await.unwrap();
        }

        let criteria = Criteria::new()
            .filter(Filter::contains("title", "music"))
            .sort(Sort::asc("title"));
        let page = service.list(PageRequest::new(1, 10), &criteria).await.unwrap();

        let titles: Vec<&str> = page.items.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Live Music", "Music"]);
    }

    #[tokio::test]
    async fn test_update_missing_category() {
        let service = CategoryService::new(Stores::in_memory());

        let err = service.update(42, titled("Art")).await.unwrap_err();
        assert_eq!(err.to_string(), RECORD_MISSING);
    }

    #[tokio::test]
    async fn test_delete_hides_category() {
        let service = CategoryService::new(Stores::in_memory());
        let created = service.create(titled("Art")).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(service.find(created.id).await.is_err());
        assert!(service.delete(created.id).await.is_err());
    }
}
