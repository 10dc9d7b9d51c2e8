//! In-memory record and membership stores for testing and development

use crate::core::entity::Record;
use crate::core::error::{MembershipError, StoreError};
use crate::core::field::LikePattern;
use crate::core::membership::{Membership, MembershipStore, Relation};
use crate::core::query::{Criteria, FilterOp, SortDirection};
use crate::core::store::{RecordStore, check_criteria};
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Arc, RwLock};

fn lock_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::internal(format!("Failed to acquire lock: {}", e))
}

/// A filter compiled once per query
enum Predicate<'a> {
    Eq(&'a str, &'a crate::core::field::FieldValue),
    Like(&'a str, LikePattern),
}

impl Predicate<'_> {
    fn matches<T: Record>(&self, record: &T) -> bool {
        match self {
            Predicate::Eq(field, value) => record
                .field_value(field)
                .is_some_and(|actual| actual.sql_eq(value)),
            Predicate::Like(field, pattern) => record
                .field_value(field)
                .is_some_and(|actual| pattern.matches(&actual)),
        }
    }
}

fn compile(criteria: &Criteria) -> Result<Vec<Predicate<'_>>, StoreError> {
    criteria
        .filters
        .iter()
        .map(|filter| match filter.op {
            FilterOp::Eq => Ok(Predicate::Eq(filter.field, &filter.value)),
            FilterOp::Like => {
                let pattern = filter.value.as_string().unwrap_or_default();
                LikePattern::new(pattern)
                    .map(|p| Predicate::Like(filter.field, p))
                    .map_err(|e| StoreError::internal(format!("invalid LIKE pattern: {}", e)))
            }
        })
        .collect()
}

/// In-memory record store
///
/// Rows live in a `BTreeMap` keyed by id, so iteration order is insertion
/// order and ties in a sort keep that order.
#[derive(Clone)]
pub struct InMemoryRecordStore<T: Record> {
    rows: Arc<RwLock<BTreeMap<u64, T>>>,
}

impl<T: Record> InMemoryRecordStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Live rows matching the criteria, sorted but not paged
    fn select(&self, criteria: &Criteria) -> Result<Vec<T>, StoreError> {
        check_criteria::<T>(criteria)?;
        let predicates = compile(criteria)?;

        let rows = self.rows.read().map_err(lock_error)?;
        let mut matched: Vec<T> = rows
            .values()
            .filter(|row| !row.is_deleted())
            .filter(|row| predicates.iter().all(|p| p.matches(*row)))
            .cloned()
            .collect();
        drop(rows);

        if !criteria.sorts.is_empty() {
            matched.sort_by(|a, b| {
                criteria
                    .sorts
                    .iter()
                    .map(|sort| {
                        let ordering =
                            match (a.field_value(sort.field), b.field_value(sort.field)) {
                                (Some(x), Some(y)) => x.sql_cmp(&y),
                                _ => Ordering::Equal,
                            };
                        match sort.direction {
                            SortDirection::Asc => ordering,
                            SortDirection::Desc => ordering.reverse(),
                        }
                    })
                    .find(|ordering| *ordering != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        Ok(matched)
    }
}

impl<T: Record> Default for InMemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for InMemoryRecordStore<T> {
    async fn find_all(
        &self,
        limit: u64,
        offset: u64,
        criteria: &Criteria,
    ) -> Result<Vec<T>, StoreError> {
        let matched = self.select(criteria)?;
        tracing::debug!(
            resource = T::resource_name(),
            matched = matched.len(),
            limit,
            offset,
            "in-memory find_all"
        );

        Ok(matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_all(&self, criteria: &Criteria) -> Result<u64, StoreError> {
        check_criteria::<T>(criteria)?;
        let predicates = compile(criteria)?;

        let rows = self.rows.read().map_err(lock_error)?;
        let count = rows
            .values()
            .filter(|row| !row.is_deleted())
            .filter(|row| predicates.iter().all(|p| p.matches(*row)))
            .count();

        Ok(count as u64)
    }

    async fn find(&self, id: u64) -> Result<T, StoreError> {
        let rows = self.rows.read().map_err(lock_error)?;

        rows.get(&id)
            .filter(|row| !row.is_deleted())
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::resource_name()))
    }

    async fn store(&self, mut record: T) -> Result<T, StoreError> {
        let mut rows = self.rows.write().map_err(lock_error)?;

        let id = rows.keys().next_back().map_or(1, |last| last + 1);
        record.set_id(id);
        rows.insert(id, record.clone());

        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T, StoreError> {
        let mut rows = self.rows.write().map_err(lock_error)?;

        match rows.get_mut(&record.id()) {
            Some(existing) if !existing.is_deleted() => {
                *existing = record.clone();
                Ok(record)
            }
            _ => Err(StoreError::not_found(T::resource_name())),
        }
    }

    async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(lock_error)?;

        match rows.get_mut(&id) {
            Some(existing) if !existing.is_deleted() => {
                existing.soft_delete();
                Ok(())
            }
            _ => Err(StoreError::not_found(T::resource_name())),
        }
    }
}

type MembershipKey = (Relation, u64, u64);

/// In-memory membership store
///
/// The map key is the uniqueness key, so the occupied check and the insert
/// happen under one write lock.
#[derive(Clone, Default)]
pub struct InMemoryMembershipStore {
    inner: Arc<RwLock<MembershipTable>>,
}

#[derive(Default)]
struct MembershipTable {
    next_id: u64,
    rows: BTreeMap<MembershipKey, Membership>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids on one side of the relation, oldest membership first
    fn collect_ids(
        &self,
        keep: impl Fn(&Membership) -> bool,
        pick: impl Fn(&Membership) -> u64,
    ) -> Result<Vec<u64>, StoreError> {
        let table = self.inner.read().map_err(lock_error)?;

        let mut rows: Vec<&Membership> = table.rows.values().filter(|m| keep(m)).collect();
        rows.sort_by_key(|m| m.id);

        Ok(rows.into_iter().map(pick).collect())
    }

    fn remove_where(&self, keep: impl Fn(&Membership) -> bool) -> Result<u64, StoreError> {
        let mut table = self.inner.write().map_err(lock_error)?;

        let before = table.rows.len();
        table.rows.retain(|_, m| keep(m));

        Ok((before - table.rows.len()) as u64)
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn append(
        &self,
        relation: Relation,
        user_id: u64,
        event_id: u64,
    ) -> Result<(), MembershipError> {
        let mut guard = self.inner.write().map_err(lock_error)?;
        let table = &mut *guard;
        let id = table.next_id + 1;

        match table.rows.entry((relation, user_id, event_id)) {
            Entry::Occupied(_) => Err(MembershipError::Conflict(relation)),
            Entry::Vacant(slot) => {
                slot.insert(Membership {
                    id,
                    relation,
                    user_id,
                    event_id,
                    created_at: Utc::now(),
                });
                table.next_id = id;
                Ok(())
            }
        }
    }

    async fn delete(
        &self,
        relation: Relation,
        user_id: u64,
        event_id: u64,
    ) -> Result<(), MembershipError> {
        let mut table = self.inner.write().map_err(lock_error)?;

        table
            .rows
            .remove(&(relation, user_id, event_id))
            .map(|_| ())
            .ok_or(MembershipError::NotFound(relation))
    }

    async fn exists(
        &self,
        relation: Relation,
        user_id: u64,
        event_id: u64,
    ) -> Result<bool, StoreError> {
        let table = self.inner.read().map_err(lock_error)?;
        Ok(table.rows.contains_key(&(relation, user_id, event_id)))
    }

    async fn count_for_event(&self, relation: Relation, event_id: u64) -> Result<u64, StoreError> {
        let table = self.inner.read().map_err(lock_error)?;

        let count = table
            .rows
            .values()
            .filter(|m| m.relation == relation && m.event_id == event_id)
            .count();

        Ok(count as u64)
    }

    async fn users_for_event(
        &self,
        relation: Relation,
        event_id: u64,
    ) -> Result<Vec<u64>, StoreError> {
        self.collect_ids(
            |m| m.relation == relation && m.event_id == event_id,
            |m| m.user_id,
        )
    }

    async fn events_for_user(
        &self,
        relation: Relation,
        user_id: u64,
    ) -> Result<Vec<u64>, StoreError> {
        self.collect_ids(
            |m| m.relation == relation && m.user_id == user_id,
            |m| m.event_id,
        )
    }

    async fn delete_by_event(&self, event_id: u64) -> Result<u64, StoreError> {
        self.remove_where(|m| m.event_id != event_id)
    }

    async fn delete_by_user(&self, user_id: u64) -> Result<u64, StoreError> {
        self.remove_where(|m| m.user_id != user_id)
    }
}
