//! Debounced free-text search.

use std::time::Duration;

use contrib_store::{keys, FetchOutcome};

use crate::support::{loaded_store, store, Catalogue, DEBOUNCE};

#[tokio::test(start_paused = true)]
async fn rapid_typing_issues_one_fetch_with_last_term() {
    let (store, _) = loaded_store().await;

    assert_eq!(store.set_search("a"), FetchOutcome::Scheduled);
    tokio::time::sleep(Duration::from_millis(100)).await;
    store.set_search("ab");
    tokio::time::sleep(Duration::from_millis(100)).await;
    store.set_search("abc");

    assert_eq!(store.transport().request_count(), 0);
    assert!(store.has_pending_search());

    tokio::time::sleep(DEBOUNCE + Duration::from_millis(50)).await;

    let requests = store.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].param("search"), Some("abc"));
    assert!(!store.has_pending_search());
    assert!(!store.is_loading());
}

#[tokio::test(start_paused = true)]
async fn search_resets_page_before_fetch() {
    let (store, _) = loaded_store().await;
    store.go_to_page(3).await;
    store.transport().clear_requests();

    store.set_search("project");
    assert_eq!(store.pagination().current_page(), 1);
    assert_eq!(store.filters().text(keys::SEARCH), Some("project"));

    tokio::time::sleep(DEBOUNCE * 2).await;
    let request = store.transport().last_request().unwrap();
    assert_eq!(request.param("page"), Some("1"));
    assert_eq!(request.param("search"), Some("project"));
}

#[tokio::test(start_paused = true)]
async fn pauses_longer_than_window_fetch_each_time() {
    let (store, _) = loaded_store().await;

    store.set_search("ru");
    tokio::time::sleep(DEBOUNCE * 2).await;
    store.set_search("rust");
    tokio::time::sleep(DEBOUNCE * 2).await;

    let terms: Vec<String> = store
        .transport()
        .requests()
        .iter()
        .filter_map(|r| r.param("search").map(str::to_string))
        .collect();
    assert_eq!(terms, vec!["ru", "rust"]);
}

#[tokio::test(start_paused = true)]
async fn immediate_filter_absorbs_pending_search() {
    let (store, _) = loaded_store().await;

    store.set_search("cli");
    store.set_filter(keys::TAGS, ["rust"]).await;
    tokio::time::sleep(DEBOUNCE * 2).await;

    let requests = store.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].param("search"), Some("cli"));
    assert_eq!(requests[0].param("tags"), Some("rust"));
}

#[tokio::test(start_paused = true)]
async fn clearing_search_text_omits_parameter() {
    let (store, _) = loaded_store().await;

    store.set_search("graph");
    tokio::time::sleep(DEBOUNCE * 2).await;
    store.set_search("");
    tokio::time::sleep(DEBOUNCE * 2).await;

    let requests = store.transport().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].param("search"), None);
}

#[tokio::test(start_paused = true)]
async fn search_during_page_fetch_still_requests_page_one() {
    let catalogue = Catalogue::new(50);
    let store = store(catalogue.transport().with_fixed_latency(Duration::from_millis(100)));
    store.initialize_and_fetch().await;
    store.transport().clear_requests();

    let navigation = {
        let store = store.clone();
        tokio::spawn(async move { store.go_to_page(3).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    store.set_search("project");

    assert_eq!(navigation.await.unwrap(), FetchOutcome::Superseded);
    assert_eq!(store.pagination().current_page(), 1);
    assert!(!store.is_loading());

    tokio::time::sleep(DEBOUNCE * 2).await;
    let request = store.transport().last_request().unwrap();
    assert_eq!(request.param("page"), Some("1"));
    assert_eq!(request.param("search"), Some("project"));
    assert_eq!(store.pagination().current_page(), 1);
    assert_eq!(store.items()[0].id, "p1");
}

#[tokio::test(start_paused = true)]
async fn dropping_the_store_cancels_pending_search() {
    let (store, _) = loaded_store().await;
    let transport = store.transport().clone();

    store.set_search("orphan");
    drop(store);
    tokio::time::sleep(DEBOUNCE * 3).await;

    assert_eq!(transport.request_count(), 0);
}
