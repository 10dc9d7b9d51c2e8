//! Macro-generated conformance suite for `MembershipStore`.
//!
//! `$factory` must produce a fresh store implementing `Clone + 'static` with
//! shared state, so the concurrency test can hand copies to spawned tasks.

macro_rules! membership_store_tests {
    ($factory:expr) => {
        mod membership_store_contract_tests {
            use super::*;
            use tupulung::core::error::MembershipError;
            use tupulung::core::membership::{MembershipStore, Relation};

            #[tokio::test]
            async fn test_double_append_conflicts_and_keeps_one_row() {
                let store = $factory;

                store.append(Relation::Participation, 1, 2).await.unwrap();
                let err = store
                    .append(Relation::Participation, 1, 2)
                    .await
                    .unwrap_err();

                assert_eq!(err, MembershipError::Conflict(Relation::Participation));
                assert_eq!(
                    store.count_for_event(Relation::Participation, 2).await.unwrap(),
                    1
                );
            }

            #[tokio::test]
            async fn test_delete_missing_is_not_found() {
                let store = $factory;
                store.append(Relation::Participation, 1, 2).await.unwrap();

                let err = store
                    .delete(Relation::Participation, 1, 99)
                    .await
                    .unwrap_err();

                assert_eq!(err, MembershipError::NotFound(Relation::Participation));
                assert!(store.exists(Relation::Participation, 1, 2).await.unwrap());
            }

            #[tokio::test]
            async fn test_count_after_two_appends_and_one_delete() {
                let store = $factory;

                store.append(Relation::Like, 1, 5).await.unwrap();
                store.append(Relation::Like, 2, 5).await.unwrap();
                assert_eq!(store.count_for_event(Relation::Like, 5).await.unwrap(), 2);

                store.delete(Relation::Like, 1, 5).await.unwrap();
                assert_eq!(store.count_for_event(Relation::Like, 5).await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_relations_are_independent() {
                let store = $factory;

                store.append(Relation::Participation, 1, 3).await.unwrap();
                store.append(Relation::Like, 1, 3).await.unwrap();

                assert_eq!(store.count_for_event(Relation::Like, 3).await.unwrap(), 1);
                assert!(!store.exists(Relation::Like, 2, 3).await.unwrap());

                let err = store.delete(Relation::Like, 2, 3).await.unwrap_err();
                assert_eq!(err, MembershipError::NotFound(Relation::Like));
            }

            #[tokio::test]
            async fn test_reappend_after_delete() {
                let store = $factory;

                store.append(Relation::Like, 4, 4).await.unwrap();
                store.delete(Relation::Like, 4, 4).await.unwrap();
                store.append(Relation::Like, 4, 4).await.unwrap();

                assert!(store.exists(Relation::Like, 4, 4).await.unwrap());
            }

            #[tokio::test]
            async fn test_listing_in_membership_order() {
                let store = $factory;

                store.append(Relation::Participation, 9, 1).await.unwrap();
                store.append(Relation::Participation, 3, 1).await.unwrap();
                store.append(Relation::Participation, 9, 2).await.unwrap();

                assert_eq!(
                    store.users_for_event(Relation::Participation, 1).await.unwrap(),
                    vec![9, 3]
                );
                assert_eq!(
                    store.events_for_user(Relation::Participation, 9).await.unwrap(),
                    vec![1, 2]
                );
            }

            #[tokio::test]
            async fn test_cascade_deletes() {
                let store = $factory;

                store.append(Relation::Participation, 1, 7).await.unwrap();
                store.append(Relation::Like, 2, 7).await.unwrap();
                store.append(Relation::Like, 1, 8).await.unwrap();

                assert_eq!(store.delete_by_event(7).await.unwrap(), 2);
                assert_eq!(store.delete_by_user(1).await.unwrap(), 1);
                assert_eq!(store.count_for_event(Relation::Like, 8).await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_concurrent_appends_yield_one_success() {
                let store = $factory;

                let mut handles = Vec::new();
                for _ in 0..8 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.append(Relation::Participation, 1, 1).await
                    }));
                }

                let mut successes = 0;
                for handle in handles {
                    match handle.await.unwrap() {
                        Ok(()) => successes += 1,
                        Err(e) => assert_eq!(e, MembershipError::Conflict(Relation::Participation)),
                    }
                }

                assert_eq!(successes, 1);
                assert_eq!(
                    store.count_for_event(Relation::Participation, 1).await.unwrap(),
                    1
                );
            }
        }
    };
}
