//! The record store trait: dynamic queries plus plain CRUD

use crate::core::entity::Record;
use crate::core::error::StoreError;
use crate::core::field::FieldValue;
use crate::core::query::{Criteria, Filter, FilterOp};
use async_trait::async_trait;

/// Storage for one record type
///
/// Every read excludes soft-deleted rows. Filter and sort fields must appear
/// in the record's allow-lists; anything else fails with a 500
/// [`StoreError`] before the backend is touched.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Matching rows: filters AND-combined, sorts applied in order, then
    /// `offset` rows skipped and at most `limit` taken.
    ///
    /// An offset past the end yields an empty vector, not an error.
    async fn find_all(
        &self,
        limit: u64,
        offset: u64,
        criteria: &Criteria,
    ) -> Result<Vec<T>, StoreError>;

    /// Number of rows matching the filters. Sorts are ignored.
    async fn count_all(&self, criteria: &Criteria) -> Result<u64, StoreError>;

    /// Fetch a live row by id; a miss is a 400
    async fn find(&self, id: u64) -> Result<T, StoreError>;

    /// Insert and return the record with its assigned id
    async fn store(&self, record: T) -> Result<T, StoreError>;

    /// Replace the row with the same id
    async fn update(&self, record: T) -> Result<T, StoreError>;

    /// Soft delete by id
    async fn delete(&self, id: u64) -> Result<(), StoreError>;

    /// First live row whose `field` equals `value`
    async fn find_by(
        &self,
        field: &'static str,
        value: FieldValue,
    ) -> Result<Option<T>, StoreError> {
        let criteria = Criteria::new().filter(Filter::new(field, FilterOp::Eq, value));
        let mut rows = self.find_all(1, 0, &criteria).await?;
        Ok(rows.pop())
    }
}

/// Reject criteria that name a column outside the allow-lists
pub fn check_criteria<T: Record>(criteria: &Criteria) -> Result<(), StoreError> {
    if let Some(filter) = criteria.filters.iter().find(|f| !T::is_filterable(f.field)) {
        return Err(StoreError::unknown_field(T::resource_name(), filter.field));
    }
    if let Some(sort) = criteria.sorts.iter().find(|s| !T::is_sortable(s.field)) {
        return Err(StoreError::unknown_field(T::resource_name(), sort.field));
    }
    Ok(())
}
