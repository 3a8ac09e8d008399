//! Macro-generated test suites for repository contract validation.
//!
//! `repository_contract_tests!` validates any `Repository<TestEntity>`
//! implementation: CRUD operations, shared-pointer reads, duplicate ids and
//! access through a lock. `searchable_repository_tests!` validates any
//! `SearchableRepository<TestEntity>` whose filter matches names
//! case-insensitively and whose sortable fields are `TEST_SORTABLE_FIELDS`.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use seedwork::storage::InMemoryRepository;
//!
//! repository_contract_tests!(in_memory, InMemoryRepository::<TestEntity>::new());
//! searchable_repository_tests!(in_memory_search, searchable_repository());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_insert_and_find`: insert then retrieve, same plain object
//! - `test_find_returns_stored_pointer`: reads hand out the stored `Arc`
//! - `test_find_nonexistent`: unknown id is `NotFound`
//! - `test_find_all_empty` / `test_find_all_in_insertion_order`
//! - `test_update_existing` / `test_update_nonexistent`
//! - `test_delete_existing` / `test_delete_nonexistent`
//!
//! ## Edge Cases
//! - `test_duplicate_ids`: both copies are stored, the first one wins
//! - `test_shared_behind_lock`: inserts from spawned tasks through `RwLock`
//!
//! ## Search
//! - defaults, filter + paginate, sort per `FieldValue` variant, undeclared
//!   sort fields, out-of-range pages, echoed directives

/// Generate a `Repository<TestEntity>` conformance test suite.
///
/// `$factory` is re-evaluated for each test to ensure isolation. For the lock
/// test the value must also be `Send + Sync + 'static`.
macro_rules! repository_contract_tests {
    ($suite:ident, $factory:expr) => {
        mod $suite {
            use super::*;
            use seedwork::prelude::*;
            use std::sync::Arc;

            // ==================================================================
            // CRUD: Insert & Find
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_find() {
                let mut repository = $factory;
                let entity = create_test_entity("Alice", "alice@test.com", 30, 4.5, true);
                let id = entity.id().to_string();

                repository.insert(entity.clone()).await.unwrap();

                let found = repository.find_by_id(&id).await.unwrap();
                assert_eq!(found.as_ref(), &entity);
                assert_eq!(
                    found.to_plain_object().unwrap(),
                    entity.to_plain_object().unwrap()
                );
            }

            #[tokio::test]
            async fn test_find_returns_stored_pointer() {
                let mut repository = $factory;
                let entity = named("Alice");
                let id = entity.id().to_string();
                repository.insert(entity).await.unwrap();

                let first = repository.find_by_id(&id).await.unwrap();
                let second = repository.find_by_id(&id).await.unwrap();
                let all = repository.find_all().await.unwrap();

                assert!(Arc::ptr_eq(&first, &second));
                assert!(Arc::ptr_eq(&first, &all[0]));
            }

            #[tokio::test]
            async fn test_find_nonexistent() {
                let repository = $factory;

                let err = repository.find_by_id("fake id").await.unwrap_err();
                assert!(err.is_not_found(), "expected NotFound, got {:?}", err);
                assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
            }

            // ==================================================================
            // CRUD: Find all
            // ==================================================================

            #[tokio::test]
            async fn test_find_all_empty() {
                let repository = $factory;

                let all = repository.find_all().await.unwrap();
                assert!(all.is_empty(), "a new repository should be empty");
            }

            #[tokio::test]
            async fn test_find_all_in_insertion_order() {
                let mut repository = $factory;
                let batch = sample_batch(5);
                for entity in batch.clone() {
                    repository.insert(entity).await.unwrap();
                }

                let all = repository.find_all().await.unwrap();
                assert_count(&all, 5);
                for (stored, expected) in all.iter().zip(&batch) {
                    assert_eq!(stored.as_ref(), expected);
                }
            }

            // ==================================================================
            // CRUD: Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_existing() {
                let mut repository = $factory;
                let first = named("first");
                let mut second = named("second");
                repository.insert(first.clone()).await.unwrap();
                repository.insert(second.clone()).await.unwrap();

                second
                    .update_props(|props| props.name = "updated".to_string())
                    .unwrap();
                repository.update(second.clone()).await.unwrap();

                let all = repository.find_all().await.unwrap();
                assert_eq!(names(&all), vec!["first", "updated"]);
                let found = repository.find_by_id(second.id().as_str()).await.unwrap();
                assert_eq!(found.as_ref(), &second);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let mut repository = $factory;
                let stored = named("stored");
                repository.insert(stored.clone()).await.unwrap();

                let err = repository.update(named("stranger")).await.unwrap_err();
                assert!(err.is_not_found());

                let all = repository.find_all().await.unwrap();
                assert_count(&all, 1);
                assert_eq!(all[0].as_ref(), &stored);
            }

            // ==================================================================
            // CRUD: Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let mut repository = $factory;
                let batch = sample_batch(3);
                for entity in batch.clone() {
                    repository.insert(entity).await.unwrap();
                }

                repository.delete(batch[1].id().as_str()).await.unwrap();

                let err = repository
                    .find_by_id(batch[1].id().as_str())
                    .await
                    .unwrap_err();
                assert!(err.is_not_found());
                let all = repository.find_all().await.unwrap();
                assert_eq!(names(&all), vec!["Entity_0", "Entity_2"]);
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let mut repository = $factory;
                repository.insert(named("stored")).await.unwrap();

                let err = repository.delete("fake id").await.unwrap_err();
                assert!(err.is_not_found());
                assert_count(&repository.find_all().await.unwrap(), 1);
            }

            // ==================================================================
            // Edge cases
            // ==================================================================

            #[tokio::test]
            async fn test_duplicate_ids() {
                let mut repository = $factory;
                let id = "d6a3814f-31af-4c4d-b0d0-3fa483edfae6";
                repository
                    .insert(create_test_entity_with_id(id, "first"))
                    .await
                    .unwrap();
                repository
                    .insert(create_test_entity_with_id(id, "second"))
                    .await
                    .unwrap();

                assert_count(&repository.find_all().await.unwrap(), 2);
                assert_eq!(repository.find_by_id(id).await.unwrap().props().name, "first");

                repository.delete(id).await.unwrap();
                assert_eq!(repository.find_by_id(id).await.unwrap().props().name, "second");
            }

            #[tokio::test]
            async fn test_shared_behind_lock() {
                let repository = Arc::new(tokio::sync::RwLock::new($factory));

                let mut handles = Vec::new();
                for i in 0..10 {
                    let repository = Arc::clone(&repository);
                    handles.push(tokio::spawn(async move {
                        let entity = named(&format!("Concurrent_{}", i));
                        repository.write().await.insert(entity).await.unwrap();
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                let all = repository.read().await.find_all().await.unwrap();
                assert_count(&all, 10);
            }
        }
    };
}

/// Generate a `SearchableRepository<TestEntity>` conformance test suite.
///
/// The repository built by `$factory` must filter on names case-insensitively
/// and sort by exactly `TEST_SORTABLE_FIELDS`.
macro_rules! searchable_repository_tests {
    ($suite:ident, $factory:expr) => {
        mod $suite {
            use super::*;
            use seedwork::prelude::*;

            fn params(raw: serde_json::Value) -> SearchParams {
                SearchParams::from_json(raw)
            }

            // ==================================================================
            // Pagination
            // ==================================================================

            #[tokio::test]
            async fn test_search_default_params() {
                let mut repository = $factory;
                let entity = named("same");
                for _ in 0..16 {
                    repository.insert(entity.clone()).await.unwrap();
                }
                let all = repository.find_all().await.unwrap();

                let result = repository.search(SearchParams::default()).await.unwrap();

                assert_same_items(result.items(), &all[..15]);
                assert_eq!(result.total(), 16);
                assert_eq!(result.current_page(), 1);
                assert_eq!(result.per_page(), 15);
                assert_eq!(result.last_page(), 2);
                assert_eq!(result.sort(), None);
                assert_eq!(result.sort_dir(), None);
                assert_eq!(result.filter(), None);
            }

            #[tokio::test]
            async fn test_search_filter_and_paginate() {
                let mut repository = $factory;
                for name in ["test", "a", "TEST", "TeSt"] {
                    repository.insert(named(name)).await.unwrap();
                }
                let all = repository.find_all().await.unwrap();

                let result = repository
                    .search(params(serde_json::json!({"page": 1, "perPage": 2, "filter": "TEST"})))
                    .await
                    .unwrap();
                assert_same_items(result.items(), &[all[0].clone(), all[2].clone()]);
                assert_eq!(result.total(), 3);
                assert_eq!(result.last_page(), 2);
                assert_eq!(result.filter(), Some("TEST"));

                let result = repository
                    .search(params(serde_json::json!({"page": 2, "perPage": 2, "filter": "TEST"})))
                    .await
                    .unwrap();
                assert_same_items(result.items(), &[all[3].clone()]);
                assert_eq!(result.total(), 3);
                assert_eq!(result.current_page(), 2);
            }

            #[tokio::test]
            async fn test_search_page_out_of_range() {
                let mut repository = $factory;
                for entity in sample_batch(5) {
                    repository.insert(entity).await.unwrap();
                }

                let result = repository
                    .search(params(serde_json::json!({"page": 4, "perPage": 2})))
                    .await
                    .unwrap();
                assert!(result.items().is_empty());
                assert_eq!(result.total(), 5);
                assert_eq!(result.last_page(), 3);
                assert!(!result.has_next());
            }

            #[tokio::test]
            async fn test_search_without_match() {
                let mut repository = $factory;
                for entity in sample_batch(3) {
                    repository.insert(entity).await.unwrap();
                }

                let result = repository
                    .search(params(serde_json::json!({"filter": "nothing like this"})))
                    .await
                    .unwrap();
                assert!(result.items().is_empty());
                assert_eq!(result.total(), 0);
                assert_eq!(result.last_page(), 0);
            }

            // ==================================================================
            // Sorting: one test per FieldValue variant
            // ==================================================================

            #[tokio::test]
            async fn test_sort_string_field() {
                let mut repository = $factory;
                for name in ["b", "a", "d", "e", "c"] {
                    repository.insert(named(name)).await.unwrap();
                }

                let result = repository
                    .search(params(serde_json::json!({"sort": "name", "sortDir": "asc"})))
                    .await
                    .unwrap();
                assert_eq!(names(result.items()), vec!["a", "b", "c", "d", "e"]);

                let result = repository
                    .search(params(serde_json::json!({"sort": "name", "sortDir": "desc"})))
                    .await
                    .unwrap();
                assert_eq!(names(result.items()), vec!["e", "d", "c", "b", "a"]);
            }

            #[tokio::test]
            async fn test_sort_integer_field() {
                let mut repository = $factory;
                repository.insert(create_test_entity("hundred", "a@test.com", 100, 1.0, true)).await.unwrap();
                repository.insert(create_test_entity("twenty", "b@test.com", 20, 1.0, true)).await.unwrap();
                repository.insert(create_test_entity("five", "c@test.com", 5, 1.0, true)).await.unwrap();

                let result = repository
                    .search(params(serde_json::json!({"sort": "age", "sortDir": "asc"})))
                    .await
                    .unwrap();
                assert_eq!(names(result.items()), vec!["five", "twenty", "hundred"]);
            }

            #[tokio::test]
            async fn test_sort_float_field() {
                let mut repository = $factory;
                repository.insert(create_test_entity("mid", "a@test.com", 1, 2.5, true)).await.unwrap();
                repository.insert(create_test_entity("low", "b@test.com", 1, -1.5, true)).await.unwrap();
                repository.insert(create_test_entity("high", "c@test.com", 1, 10.0, true)).await.unwrap();

                let result = repository
                    .search(params(serde_json::json!({"sort": "score"})))
                    .await
                    .unwrap();
                assert_eq!(names(result.items()), vec!["high", "mid", "low"]);
                assert_eq!(result.sort_dir(), Some(SortDirection::Desc));
            }

            #[tokio::test]
            async fn test_sort_boolean_field_is_stable() {
                let mut repository = $factory;
                for entity in sample_batch(4) {
                    repository.insert(entity).await.unwrap();
                }

                let result = repository
                    .search(params(serde_json::json!({"sort": "active", "sortDir": "asc"})))
                    .await
                    .unwrap();
                assert_eq!(
                    names(result.items()),
                    vec!["Entity_1", "Entity_3", "Entity_0", "Entity_2"]
                );
            }

            #[tokio::test]
            async fn test_sort_datetime_field() {
                let mut repository = $factory;
                let now = Utc::now();
                for (name, offset) in [("b", 1), ("a", 0), ("c", 2)] {
                    let mut entity = named(name);
                    entity
                        .update_props(|props| {
                            props.created_at = now + chrono::Duration::seconds(offset)
                        })
                        .unwrap();
                    repository.insert(entity).await.unwrap();
                }

                let result = repository
                    .search(params(serde_json::json!({"sort": "created_at", "sortDir": "ASC"})))
                    .await
                    .unwrap();
                assert_eq!(names(result.items()), vec!["a", "b", "c"]);
                assert_eq!(result.sort_dir(), Some(SortDirection::Asc));
            }

            #[tokio::test]
            async fn test_sort_undeclared_field_keeps_order() {
                let mut repository = $factory;
                for name in ["b", "a", "c"] {
                    repository.insert(named(name)).await.unwrap();
                }

                let result = repository
                    .search(params(serde_json::json!({"sort": "email", "sortDir": "asc"})))
                    .await
                    .unwrap();
                assert_eq!(names(result.items()), vec!["b", "a", "c"]);
                assert_eq!(result.sort(), Some("email"));
            }

            #[tokio::test]
            async fn test_search_leaves_collection_untouched() {
                let mut repository = $factory;
                for name in ["b", "a", "c"] {
                    repository.insert(named(name)).await.unwrap();
                }

                repository
                    .search(params(serde_json::json!({"sort": "name", "sortDir": "asc"})))
                    .await
                    .unwrap();

                let all = repository.find_all().await.unwrap();
                assert_eq!(names(&all), vec!["b", "a", "c"]);
            }

            // ==================================================================
            // Composition
            // ==================================================================

            #[tokio::test]
            async fn test_filter_then_sort_then_paginate() {
                let mut repository = $factory;
                for entity in sample_batch(6) {
                    repository.insert(entity).await.unwrap();
                }
                repository.insert(named("outsider")).await.unwrap();

                let result = repository
                    .search(params(serde_json::json!({
                        "page": 2,
                        "perPage": 2,
                        "sort": "age",
                        "sortDir": "desc",
                        "filter": "entity_"
                    })))
                    .await
                    .unwrap();

                // ages 20..=25, descending: 25 24 | 23 22 | 21 20
                assert_eq!(names(result.items()), vec!["Entity_3", "Entity_2"]);
                assert_eq!(result.total(), 6);
                assert_eq!(result.last_page(), 3);
                assert_eq!(result.sort(), Some("age"));
                assert_eq!(result.sort_dir(), Some(SortDirection::Desc));
                assert_eq!(result.filter(), Some("entity_"));
                assert!(result.has_next());
                assert!(result.has_prev());
            }

            #[test]
            fn test_sortable_fields() {
                let repository = $factory;
                assert_eq!(repository.sortable_fields(), TEST_SORTABLE_FIELDS.to_vec());
            }
        }
    };
}
