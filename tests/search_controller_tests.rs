use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::StatusCode;
use tokio::sync::oneshot;

use voicesearch::controller::SearchController;
use voicesearch::data_models::{RequestState, ResultItem, SearchQuery};
use voicesearch::error::FetchError;
use voicesearch::provider::{ProviderPage, SearchProvider};

mod test_helpers {
    use super::*;

    pub fn item(id: u64, name: &str) -> ResultItem {
        ResultItem {
            id,
            display_name: name.to_string(),
            username: name.to_lowercase(),
            highlightable_text: format!("{name} reads audiobooks"),
            ..ResultItem::default()
        }
    }

    pub fn page_of(items: Vec<ResultItem>, total_pages: u32) -> ProviderPage {
        ProviderPage { items, total_pages }
    }

    /// Answers every query through a plain function and counts the calls.
    pub struct StubProvider {
        respond: fn(&SearchQuery) -> Result<ProviderPage, FetchError>,
        pub calls: AtomicUsize,
        pub seen: Mutex<Vec<SearchQuery>>,
    }

    impl StubProvider {
        pub fn new(respond: fn(&SearchQuery) -> Result<ProviderPage, FetchError>) -> Self {
            StubProvider {
                respond,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl SearchProvider for StubProvider {
        async fn fetch(&self, query: &SearchQuery) -> Result<ProviderPage, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(query.clone());
            (self.respond)(query)
        }
    }

    /// Holds each page's response until the test releases it.
    pub struct GatedProvider {
        gates: Mutex<HashMap<u32, oneshot::Receiver<Result<ProviderPage, FetchError>>>>,
    }

    impl GatedProvider {
        pub fn new(pages: &[u32]) -> (Self, HashMap<u32, oneshot::Sender<Result<ProviderPage, FetchError>>>) {
            let mut gates = HashMap::new();
            let mut senders = HashMap::new();
            for &page in pages {
                let (tx, rx) = oneshot::channel();
                gates.insert(page, rx);
                senders.insert(page, tx);
            }
            (
                GatedProvider {
                    gates: Mutex::new(gates),
                },
                senders,
            )
        }
    }

    impl SearchProvider for GatedProvider {
        async fn fetch(&self, query: &SearchQuery) -> Result<ProviderPage, FetchError> {
            let gate = self.gates.lock().unwrap().remove(&query.page);
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(FetchError::Other("gate dropped".into()))),
                None => Err(FetchError::Other(format!("no gate for page {}", query.page))),
            }
        }
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_single_item_success() {
    let controller = SearchController::new(StubProvider::new(|_| {
        Ok(page_of(vec![item(1, "Ana")], 1))
    }));

    controller.execute_search("x", 1).await;

    match controller.state() {
        RequestState::Success(result) => {
            assert_eq!(result.items.len(), 1);
            assert_eq!(result.total_pages, 1);
            assert_eq!(result.page, 1);
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_zero_matches_is_success_not_failure() {
    let controller = SearchController::new(StubProvider::new(|_| Ok(page_of(vec![], 1))));

    controller.execute_search("nobody", 1).await;

    match controller.state() {
        RequestState::Success(result) => assert!(result.items.is_empty()),
        other => panic!("expected empty success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_provider_error_becomes_failure() {
    let controller = SearchController::new(StubProvider::new(|_| {
        Err(FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR))
    }));

    controller.execute_search("x", 1).await;

    match controller.state() {
        RequestState::Failure { reason } => {
            assert!(!reason.is_empty());
            assert!(reason.contains("Error fetching data"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failure_without_message_uses_default_reason() {
    let controller =
        SearchController::new(StubProvider::new(|_| Err(FetchError::Other(String::new()))));

    controller.execute_search("x", 1).await;

    assert_eq!(
        controller.state(),
        RequestState::Failure {
            reason: "An unexpected error occurred".into()
        }
    );
}

#[tokio::test]
async fn test_loading_is_set_before_polling() {
    let provider = StubProvider::new(|_| Ok(page_of(vec![], 1)));
    let controller = SearchController::new(provider);
    assert_eq!(controller.state(), RequestState::Idle);

    let search = controller.execute_search("x", 1);
    assert_eq!(controller.state(), RequestState::Loading);
    assert_eq!(controller.snapshot().keywords(), "x");

    search.await;
    assert!(matches!(controller.state(), RequestState::Success(_)));
}

#[tokio::test]
async fn test_one_request_per_search_with_keywords_forwarded() {
    let provider = Arc::new(StubProvider::new(|_| Ok(page_of(vec![], 1))));
    let controller = SearchController::new(provider.clone());

    controller.execute_search("", 1).await;
    controller.execute_search("  spaced  ", 2).await;

    // no retries, empty keywords passed through untouched
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        *provider.seen.lock().unwrap(),
        vec![SearchQuery::new("", 1), SearchQuery::new("  spaced  ", 2)]
    );
    assert_eq!(controller.snapshot().sequence(), 2);
}

#[tokio::test]
async fn test_stale_response_does_not_overwrite_newer_result() {
    let (provider, mut gates) = GatedProvider::new(&[1, 2]);
    let controller = SearchController::new(provider);

    let first = controller.execute_search("q", 1);
    let second = controller.execute_search("q", 2);
    let mut first = Box::pin(first);

    // page 1 is now waiting on its gate
    assert!(futures::poll!(&mut first).is_pending());

    gates
        .remove(&2)
        .unwrap()
        .send(Ok(page_of(vec![item(2, "Second")], 5)))
        .unwrap();
    second.await;

    gates
        .remove(&1)
        .unwrap()
        .send(Ok(page_of(vec![item(1, "First")], 5)))
        .unwrap();
    first.await;

    match controller.state() {
        RequestState::Success(result) => {
            assert_eq!(result.page, 2);
            assert_eq!(result.items[0].display_name, "Second");
        }
        other => panic!("expected page 2 result, got {other:?}"),
    }
}

#[tokio::test]
async fn test_stale_failure_is_discarded_too() {
    let (provider, mut gates) = GatedProvider::new(&[1, 2]);
    let controller = SearchController::new(provider);

    let mut first = Box::pin(controller.execute_search("q", 1));
    assert!(futures::poll!(&mut first).is_pending());

    let second = controller.execute_search("q", 2);
    gates.remove(&2).unwrap().send(Ok(page_of(vec![], 3))).unwrap();
    second.await;

    gates
        .remove(&1)
        .unwrap()
        .send(Err(FetchError::Status(StatusCode::BAD_GATEWAY)))
        .unwrap();
    first.await;

    assert!(matches!(controller.state(), RequestState::Success(r) if r.page == 2));
}

#[tokio::test]
async fn test_pending_search_stays_loading_after_stale_completion() {
    let (provider, mut gates) = GatedProvider::new(&[1, 2]);
    let controller = SearchController::new(provider);

    let first = controller.execute_search("q", 1);
    let mut second = Box::pin(controller.execute_search("q", 2));
    assert!(futures::poll!(&mut second).is_pending());

    gates.remove(&1).unwrap().send(Ok(page_of(vec![], 1))).unwrap();
    first.await;
    assert_eq!(controller.state(), RequestState::Loading);

    gates.remove(&2).unwrap().send(Ok(page_of(vec![], 4))).unwrap();
    second.await;
    assert!(matches!(controller.state(), RequestState::Success(r) if r.total_pages == 4));
}

#[tokio::test]
async fn test_change_page_reuses_current_keywords() {
    let controller = SearchController::new(StubProvider::new(|q| {
        Ok(page_of(vec![item(q.page as u64, &q.keywords)], 10))
    }));

    controller.execute_search("radio", 1).await;
    controller.change_page(4).await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.query, Some(SearchQuery::new("radio", 4)));
    match snapshot.request {
        RequestState::Success(result) => {
            assert_eq!(result.page, 4);
            assert_eq!(result.items[0].display_name, "radio");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_next_and_previous_are_bounded() {
    let controller = SearchController::new(StubProvider::new(|_| Ok(page_of(vec![item(1, "A")], 2))));

    assert!(controller.next_page().is_none());

    controller.execute_search("a", 1).await;
    assert!(controller.previous_page().is_none());

    controller.next_page().unwrap().await;
    assert_eq!(controller.pagination().unwrap().current, 2);
    assert!(controller.next_page().is_none());

    controller.previous_page().unwrap().await;
    assert_eq!(controller.pagination().unwrap().current, 1);
}

#[tokio::test]
async fn test_total_pages_raised_to_requested_page() {
    let controller = SearchController::new(StubProvider::new(|_| Ok(page_of(vec![], 2))));

    controller.execute_search("a", 5).await;

    match controller.state() {
        RequestState::Success(result) => {
            assert_eq!(result.page, 5);
            assert_eq!(result.total_pages, 5);
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_subscribers_see_transitions() {
    let controller = SearchController::new(StubProvider::new(|_| Ok(page_of(vec![], 1))));
    let mut rx = controller.subscribe();

    let search = controller.execute_search("a", 1);
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().request, RequestState::Loading);

    search.await;
    assert!(rx.has_changed().unwrap());
    assert!(matches!(rx.borrow_and_update().request, RequestState::Success(_)));
}

#[tokio::test]
async fn test_dropped_search_stays_loading_until_next_search() {
    let provider = Arc::new(StubProvider::new(|_| Ok(page_of(vec![], 1))));
    let controller = SearchController::new(provider.clone());

    drop(controller.execute_search("abandoned", 1));
    assert_eq!(controller.state(), RequestState::Loading);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

    controller.execute_search("kept", 1).await;
    assert!(matches!(controller.state(), RequestState::Success(_)));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}
