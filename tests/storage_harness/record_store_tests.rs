//! Macro-generated conformance suite for `RecordStore<Event>`.
//!
//! `$factory` is re-evaluated for each test, so every test starts from an
//! empty store.
//!
//! Covers CRUD with soft delete, filter and sort semantics, limit/offset
//! windows and pagination over the 20-event dataset.

macro_rules! record_store_tests {
    ($factory:expr) => {
        mod record_store_contract_tests {
            use super::*;
            use tupulung::core::entity::Record;
            use tupulung::core::field::FieldValue;
            use tupulung::core::query::{Criteria, Filter, PageRequest, Pagination, Sort};
            use tupulung::core::store::RecordStore;
            use tupulung::entities::Event;
            use tupulung::services::paginate;
            use std::collections::BTreeSet;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_store_assigns_ids_and_find_returns_row() {
                let store = $factory;

                let first = store.store(sample_event("a", 1, 1, "Bali")).await.unwrap();
                let second = store.store(sample_event("b", 1, 1, "Bali")).await.unwrap();
                assert!(first.id > 0);
                assert!(second.id > first.id);

                let found = store.find(second.id).await.unwrap();
                assert_eq!(found.title, "b");
                assert_eq!(found.location, "Bali");
            }

            #[tokio::test]
            async fn test_find_missing_is_bad_request() {
                let store = $factory;

                let err = store.find(404).await.unwrap_err();
                assert_eq!(err.code, 400);
            }

            #[tokio::test]
            async fn test_update_persists_changes() {
                let store = $factory;
                let mut event = store.store(sample_event("draft", 1, 1, "Bali")).await.unwrap();

                event.title = "final".to_string();
                event.touch();
                store.update(event.clone()).await.unwrap();

                assert_eq!(store.find(event.id).await.unwrap().title, "final");
            }

            #[tokio::test]
            async fn test_update_missing_fails() {
                let store = $factory;
                let mut ghost = sample_event("ghost", 1, 1, "Bali");
                ghost.set_id(77);

                assert!(store.update(ghost).await.is_err());
            }

            #[tokio::test]
            async fn test_delete_is_soft_and_hides_row() {
                let store = $factory;
                let events = seed_events(&store, 3).await;

                store.delete(events[1].id).await.unwrap();

                assert!(store.find(events[1].id).await.is_err());
                assert_eq!(store.count_all(&Criteria::new()).await.unwrap(), 2);
                assert!(store.delete(events[1].id).await.is_err());
            }

            #[tokio::test]
            async fn test_find_by_returns_first_match() {
                let store = $factory;
                seed_events(&store, 4).await;

                let hit = store
                    .find_by("title", FieldValue::String("event 02".to_string()))
                    .await
                    .unwrap();
                let miss = store
                    .find_by("title", FieldValue::String("nope".to_string()))
                    .await
                    .unwrap();

                assert_eq!(hit.map(|e| e.title), Some("event 02".to_string()));
                assert!(miss.is_none());
            }

            // ==================================================================
            // Criteria
            // ==================================================================

            #[tokio::test]
            async fn test_zero_filters_is_full_scan() {
                let store = $factory;
                let seeded = seed_events(&store, 6).await;

                let all = store.find_all(100, 0, &Criteria::new()).await.unwrap();
                let ids: Vec<u64> = all.iter().map(|e| e.id).collect();
                let expected: Vec<u64> = seeded.iter().map(|e| e.id).collect();
                assert_eq!(ids, expected);
            }

            #[tokio::test]
            async fn test_equality_filter() {
                let store = $factory;
                seed_events(&store, 9).await;

                let criteria = Criteria::new().filter(Filter::eq("category_id", 2u64));
                let rows = store.find_all(100, 0, &criteria).await.unwrap();

                assert_eq!(rows.len(), 3);
                assert!(rows.iter().all(|e| e.category_id == 2));
                assert_eq!(store.count_all(&criteria).await.unwrap(), 3);
            }

            #[tokio::test]
            async fn test_like_filter_matches_substring() {
                let store = $factory;
                for title in ["Jazz Night", "Rock Fest", "jazz brunch"] {
                    store.store(sample_event(title, 1, 1, "Bali")).await.unwrap();
                }

                let criteria = Criteria::new().filter(Filter::contains("title", "Jazz"));
                let rows = store.find_all(10, 0, &criteria).await.unwrap();

                assert_eq!(titles(&rows), vec!["Jazz Night", "jazz brunch"]);
            }

            #[tokio::test]
            async fn test_filters_combine_with_and() {
                let store = $factory;
                store.store(sample_event("Jazz A", 1, 1, "Bali")).await.unwrap();
                store.store(sample_event("Jazz B", 2, 1, "Bali")).await.unwrap();
                store.store(sample_event("Rock C", 1, 1, "Bali")).await.unwrap();

                let criteria = Criteria::new()
                    .filter(Filter::contains("title", "jazz"))
                    .filter(Filter::eq("category_id", 1u64));
                let rows = store.find_all(10, 0, &criteria).await.unwrap();

                assert_eq!(titles(&rows), vec!["Jazz A"]);
            }

            #[tokio::test]
            async fn test_sorts_apply_in_order() {
                let store = $factory;
                store.store(sample_event("b", 1, 1, "Medan")).await.unwrap();
                store.store(sample_event("a", 1, 1, "Bali")).await.unwrap();
                store.store(sample_event("c", 1, 1, "Bali")).await.unwrap();

                let criteria = Criteria::new()
                    .sort(Sort::asc("location"))
                    .sort(Sort::desc("title"));
                let rows = store.find_all(10, 0, &criteria).await.unwrap();

                assert_eq!(titles(&rows), vec!["c", "a", "b"]);
            }

            #[tokio::test]
            async fn test_unknown_field_is_rejected() {
                let store = $factory;

                let criteria = Criteria::new().filter(Filter::eq("password_hash", "x"));
                let err = store.find_all(10, 0, &criteria).await.unwrap_err();
                assert_eq!(err.code, 500);

                let criteria = Criteria::new().sort(Sort::asc("description"));
                assert!(store.find_all(10, 0, &criteria).await.is_err());
            }

            // ==================================================================
            // Windows and pagination
            // ==================================================================

            #[tokio::test]
            async fn test_five_then_three_over_eight_rows() {
                let store = $factory;
                seed_events(&store, 8).await;

                let first = store.find_all(5, 0, &Criteria::new()).await.unwrap();
                let second = store.find_all(5, 5, &Criteria::new()).await.unwrap();

                assert_eq!(first.len(), 5);
                assert_eq!(second.len(), 3);

                let ids: BTreeSet<u64> = first.iter().chain(second.iter()).map(|e| e.id).collect();
                assert_eq!(ids.len(), 8);
            }

            #[tokio::test]
            async fn test_offset_past_end_is_empty() {
                let store = $factory;
                seed_events(&store, 3).await;

                let rows = store.find_all(5, 10, &Criteria::new()).await.unwrap();
                assert!(rows.is_empty());
            }

            #[tokio::test]
            async fn test_twenty_events_limit_five() {
                let store = $factory;
                seed_events(&store, 20).await;

                let page = paginate::<Event>(&store, PageRequest::new(1, 5), &Criteria::new())
                    .await
                    .unwrap();
                assert_eq!(page.items.len(), 5);
                assert_eq!(
                    page.pagination,
                    Pagination {
                        page: 1,
                        limit: 5,
                        total_pages: 4
                    }
                );
            }

            #[tokio::test]
            async fn test_twenty_events_limit_one() {
                let store = $factory;
                seed_events(&store, 20).await;

                let page = paginate::<Event>(&store, PageRequest::new(1, 1), &Criteria::new())
                    .await
                    .unwrap();
                assert_eq!(page.pagination.total_pages, 20);
            }

            #[tokio::test]
            async fn test_empty_dataset_has_one_page() {
                let store = $factory;

                let page = paginate::<Event>(&store, PageRequest::new(1, 1), &Criteria::new())
                    .await
                    .unwrap();
                assert!(page.items.is_empty());
                assert_eq!(page.pagination.total_pages, 1);
            }
        }
    };
}
