//! Filter, sort and clear actions.

use contrib_store::{keys, Endpoint, FetchOutcome, ProjectsEndpoint, SkipReason, Sort};

use crate::support::{ids, loaded_store};

#[tokio::test]
async fn set_filter_resets_page_and_sends_filter() {
    let (store, _) = loaded_store().await;
    store.go_to_page(4).await;
    store.transport().clear_requests();

    let outcome = store.set_filter(keys::TAGS, ["react"]).await;
    assert_eq!(outcome, FetchOutcome::Applied);

    let request = store.transport().last_request().unwrap();
    assert_eq!(request.param("tags"), Some("react"));
    assert_eq!(request.param("page"), Some("1"));

    assert_eq!(store.pagination().current_page(), 1);
    assert_eq!(store.pagination().total_count(), 25);
    assert!(ids(&store).iter().all(|id| {
        let n: u32 = id[1..].parse().unwrap();
        n % 2 == 0
    }));
}

#[tokio::test]
async fn every_filter_change_requests_page_one() {
    let (store, _) = loaded_store().await;

    store.go_to_page(3).await;
    store.set_filter(keys::TECH, ["tokio"]).await;
    store.go_to_page(2).await;
    store.set_filter(keys::TAGS, ["rust", "react"]).await;

    let requests = store.transport().requests();
    let tail: Vec<(Option<&str>, Option<&str>)> = requests
        .iter()
        .map(|r| (r.param("page"), r.param("tech_stack")))
        .collect();
    assert_eq!(
        tail,
        vec![
            (Some("3"), None),
            (Some("1"), Some("tokio")),
            (Some("2"), Some("tokio")),
            (Some("1"), Some("tokio")),
        ]
    );
    assert_eq!(requests[3].param("tags"), Some("rust,react"));
}

#[tokio::test]
async fn clear_filters_twice_fetches_once() {
    let (store, _) = loaded_store().await;
    store.set_filter(keys::TAGS, ["react"]).await;
    store.transport().clear_requests();

    assert_eq!(store.clear_filters().await, FetchOutcome::Applied);
    assert_eq!(
        store.clear_filters().await,
        FetchOutcome::Skipped(SkipReason::AlreadyDefault)
    );

    assert_eq!(store.transport().request_count(), 1);
    assert_eq!(store.transport().last_request().unwrap().param("tags"), None);
    assert_eq!(store.filters(), ProjectsEndpoint.default_filters());
}

#[tokio::test]
async fn clear_filters_on_defaults_is_noop() {
    let (store, _) = loaded_store().await;
    assert_eq!(
        store.clear_filters().await,
        FetchOutcome::Skipped(SkipReason::AlreadyDefault)
    );
    assert_eq!(store.transport().request_count(), 0);
}

#[tokio::test]
async fn clear_filters_restores_sort() {
    let (store, _) = loaded_store().await;
    assert!(store.set_sort(Sort::desc("stars")).await.is_applied());
    assert_eq!(store.transport().last_request().unwrap().param("sort"), Some("stars"));

    assert!(store.clear_filters().await.is_applied());
    assert_eq!(store.sort(), Sort::desc("newest"));
    assert_eq!(store.transport().last_request().unwrap().param("sort"), Some("newest"));
}

#[tokio::test]
async fn set_sort_unchanged_is_skipped() {
    let (store, _) = loaded_store().await;
    assert_eq!(
        store.set_sort(Sort::desc("newest")).await,
        FetchOutcome::Skipped(SkipReason::Unchanged)
    );
    assert_eq!(store.transport().request_count(), 0);
}
