//! Page navigation.

use contrib_store::{FetchOutcome, SkipReason};

use crate::support::{ids, loaded_store, requested_pages};

#[tokio::test]
async fn go_to_page_fetches_requested_page() {
    let (store, _) = loaded_store().await;
    assert_eq!(store.pagination().total_pages(), 5);
    assert_eq!(store.pagination().current_page(), 1);

    let outcome = store.go_to_page(3).await;
    assert_eq!(outcome, FetchOutcome::Applied);

    assert_eq!(store.pagination().current_page(), 3);
    assert_eq!(requested_pages(&store), vec!["3"]);
    assert_eq!(ids(&store).first().map(String::as_str), Some("p21"));
    assert_eq!(ids(&store).len(), 10);
}

#[tokio::test]
async fn go_to_page_rejects_invalid_targets() {
    let (store, _) = loaded_store().await;
    let before = store.snapshot();

    assert_eq!(
        store.go_to_page(0).await,
        FetchOutcome::Skipped(SkipReason::OutOfRange { requested: 0, total_pages: 5 })
    );
    assert_eq!(
        store.go_to_page(6).await,
        FetchOutcome::Skipped(SkipReason::OutOfRange { requested: 6, total_pages: 5 })
    );
    assert_eq!(store.go_to_page(1).await, FetchOutcome::Skipped(SkipReason::SamePage));

    assert_eq!(store.snapshot(), before);
    assert_eq!(store.transport().request_count(), 0);
}

#[tokio::test]
async fn next_and_prev_walk_the_pages() {
    let (store, _) = loaded_store().await;

    assert!(store.prev_page().await.is_skipped());
    assert!(store.next_page().await.is_applied());
    assert!(store.next_page().await.is_applied());
    assert!(store.prev_page().await.is_applied());

    assert_eq!(requested_pages(&store), vec!["2", "3", "2"]);
    assert_eq!(store.pagination().current_page(), 2);
    assert!(store.pagination().has_prev_page());
    assert!(store.pagination().has_next_page());
}

#[tokio::test]
async fn last_page_has_no_next() {
    let (store, _) = loaded_store().await;
    store.go_to_page(5).await;

    let pagination = store.pagination();
    assert!(!pagination.has_next_page());
    assert!(matches!(
        store.next_page().await,
        FetchOutcome::Skipped(SkipReason::OutOfRange { requested: 6, .. })
    ));
}

#[tokio::test]
async fn refetching_unchanged_state_is_idempotent() {
    let (store, _) = loaded_store().await;
    store.go_to_page(2).await;
    let first = store.snapshot();

    assert!(store.fetch_current_page().await.is_applied());
    let second = store.snapshot();

    assert_eq!(first.items, second.items);
    assert_eq!(first.pagination, second.pagination);
}

#[tokio::test]
async fn set_limit_resets_to_first_page() {
    let (store, _) = loaded_store().await;
    store.go_to_page(4).await;
    store.transport().clear_requests();

    assert!(store.set_limit(25).await.is_applied());
    let request = store.transport().last_request().unwrap();
    assert_eq!(request.param("page"), Some("1"));
    assert_eq!(request.param("limit"), Some("25"));
    assert_eq!(store.pagination().total_pages(), 2);

    assert_eq!(store.set_limit(25).await, FetchOutcome::Skipped(SkipReason::Unchanged));
    assert_eq!(store.set_limit(0).await, FetchOutcome::Skipped(SkipReason::InvalidLimit));
}
