//! The record abstraction shared by every persisted entity

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};

/// A persisted row with an auto-increment id and soft-delete timestamps.
///
/// The allow-lists are the only source of column names a store will ever
/// put into a query; anything else is rejected before it reaches SQL.
pub trait Record: Clone + Send + Sync + 'static {
    /// Singular resource name used in messages ("event", "category")
    fn resource_name() -> &'static str;

    /// Backing table name
    fn table_name() -> &'static str;

    /// Columns a caller may filter on
    const FILTERABLE_FIELDS: &'static [&'static str];

    /// Columns a caller may sort on
    const SORTABLE_FIELDS: &'static [&'static str];

    /// Every column except `id`, in insert order
    fn columns() -> &'static [&'static str];

    fn id(&self) -> u64;

    fn set_id(&mut self, id: u64);

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Get the value of a column by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Bump `updated_at`
    fn touch(&mut self);

    /// Mark the row deleted without removing it
    fn soft_delete(&mut self);

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    fn is_filterable(field: &str) -> bool {
        field == "id" || Self::FILTERABLE_FIELDS.contains(&field)
    }

    fn is_sortable(field: &str) -> bool {
        field == "id" || Self::SORTABLE_FIELDS.contains(&field)
    }
}
